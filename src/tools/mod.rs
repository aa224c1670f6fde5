//! Tool registry and dispatch.
//!
//! Exposes the renderer as named tools with JSON Schema inputs so an agent
//! orchestrator can call it directly. Transport is left to the caller.

pub mod diagram;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::error::{DiagramError, Result};

/// A tool definition for a tools/list style response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "create_mermaid_diagram")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Registry of available tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create the registry with the diagram tools.
    pub fn new() -> Self {
        Self {
            tools: diagram::tools(),
        }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Look up a tool definition by name.
    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Dispatch a tool call to the appropriate handler.
    pub fn dispatch(&self, name: &str, args: Map<String, JsonValue>) -> Result<JsonValue> {
        if self.get(name).is_none() {
            return Err(DiagramError::UnknownTool(name.to_string()));
        }
        debug!(tool = name, "dispatching tool call");
        diagram::dispatch(name, args)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), $crate::schema!(@type $req_type));)*
        $(props.insert($opt_name.to_string(), $crate::schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only required properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? }
    }) => {{
        $crate::schema!(object { required: { $($req_name : $req_type),* }, optional: {} })
    }};

    // Type mappings
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type integer) => { serde_json::json!({"type": "integer", "minimum": 0}) };
    (@type boolean) => { serde_json::json!({"type": "boolean"}) };
    (@type direction) => {
        serde_json::json!({"type": "string", "enum": ["top-down", "left-right"]})
    };
    (@type categories) => {
        serde_json::json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "id": {"type": ["string", "integer"]},
                    "name": {"type": "string"},
                    "parent_id": {"type": ["string", "integer", "null"]},
                    "email_count": {"type": "integer", "minimum": 0}
                },
                "required": ["id", "name"]
            }
        })
    };
}
