//! # inbox-diagram
//!
//! Renders the category hierarchy of an email inbox as a Mermaid diagram or
//! as an indented plain-text tree.
//!
//! Categories arrive as flat records with parent references, typically read
//! from a category store after classification has filled in per-category
//! email counts. The records are validated (unique ids, no dangling parents,
//! no cycles), assembled into an ordered forest and rendered.
//!
//! ## Library Usage
//!
//! ```
//! use inbox_diagram::{build_tree, render_diagram, CategoryRecord, RenderOptions};
//!
//! let records = vec![
//!     CategoryRecord::root("1", "Work", 1245),
//!     CategoryRecord::child("2", "Project Alpha", "1", 480),
//!     CategoryRecord::child("3", "Project Beta", "1", 320),
//! ];
//!
//! let roots = build_tree(&records).expect("valid categories");
//! let diagram = render_diagram(&roots, &RenderOptions::default());
//! assert!(diagram.starts_with("graph TD"));
//! assert!(diagram.contains("Work (1245 emails)"));
//! ```
//!
//! ## Tool Usage
//!
//! An agent orchestrator can call the renderer as a named tool:
//!
//! ```
//! use inbox_diagram::ToolRegistry;
//! use serde_json::json;
//!
//! let registry = ToolRegistry::new();
//! let args = json!({"categories": [{"id": "1", "name": "Hockey", "email_count": 30}]});
//! let result = registry
//!     .dispatch("create_mermaid_diagram", args.as_object().cloned().unwrap_or_default())
//!     .expect("diagram");
//! assert!(result.as_str().unwrap().starts_with("```mermaid"));
//! ```

#![warn(missing_docs)]

mod convert;
mod error;
mod options;
mod record;
mod render;
mod tools;
mod tree;

pub use convert::{read_records, read_records_file, records_from_json};
pub use error::{DiagramError, Result};
pub use options::{Direction, RenderOptions};
pub use record::CategoryRecord;
pub use render::{
    escape_label, normalize_label, render_diagram, render_plain_tree, CategoryTreeRenderer,
    RenderedTree, UNNAMED_LABEL,
};
pub use tools::{ToolDef, ToolRegistry};
pub use tree::{build_tree, forest_size, CategoryTreeNode, PreOrder};
