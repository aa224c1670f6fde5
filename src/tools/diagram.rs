//! Category diagram tools.
//!
//! - `create_mermaid_diagram`: Mermaid flowchart of the category hierarchy
//! - `render_category_tree`: indented plain-text fallback
//!
//! Both validate the category list before rendering and fail without
//! output when it references unknown parents, repeats ids or loops.

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::convert::{get_optional_bool, get_optional_string, get_optional_u64, get_records_arg};
use crate::error::{DiagramError, Result};
use crate::options::{Direction, RenderOptions};
use crate::render::{render_diagram, render_plain_tree};
use crate::schema;
use crate::tools::ToolDef;
use crate::tree::{build_tree, forest_size};

/// Get all diagram tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "create_mermaid_diagram",
            "Generate a Mermaid diagram visualizing the email inbox category hierarchy. Pass the \
             categories as a list of objects with id, name, parent_id (null for root categories) \
             and email_count. Siblings are ordered by email count, busiest first. Use max_depth \
             to collapse deep levels into a summary node, inbox_root to hang everything under an \
             Inbox node, and cumulative_counts to show totals including subcategories. Returns \
             the diagram in a ```mermaid fence unless fenced is false.",
            schema!(object {
                required: { "categories": categories },
                optional: {
                    "direction": direction,
                    "include_counts": boolean,
                    "max_depth": integer,
                    "cumulative_counts": boolean,
                    "inbox_root": boolean,
                    "fenced": boolean
                }
            }),
        ),
        ToolDef::new(
            "render_category_tree",
            "Render the email category hierarchy as an indented plain-text tree, one \
             'name (count)' line per category. Use this where Mermaid diagrams cannot be \
             displayed. Accepts the same categories list as create_mermaid_diagram.",
            schema!(object {
                required: { "categories": categories },
                optional: {
                    "max_depth": integer,
                    "cumulative_counts": boolean,
                    "indent": integer
                }
            }),
        ),
    ]
}

/// Dispatch a diagram tool call.
pub fn dispatch(name: &str, args: Map<String, JsonValue>) -> Result<JsonValue> {
    match name {
        "create_mermaid_diagram" => dispatch_diagram(args),
        "render_category_tree" => dispatch_plain(args),
        _ => Err(DiagramError::UnknownTool(name.to_string())),
    }
}

// ── Options ──────────────────────────────────────────────────────────────

const DIAGRAM_ARGS: &[&str] = &[
    "categories",
    "direction",
    "include_counts",
    "max_depth",
    "cumulative_counts",
    "inbox_root",
    "fenced",
];

const PLAIN_ARGS: &[&str] = &["categories", "max_depth", "cumulative_counts", "indent"];

/// Reject arguments outside the tool's input schema.
fn check_known_args(tool: &str, args: &Map<String, JsonValue>, known: &[&str]) -> Result<()> {
    match args.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(DiagramError::InvalidArg {
            name: key.clone(),
            reason: format!("Not accepted by {}", tool),
        }),
        None => Ok(()),
    }
}

/// Options shared by both tools.
fn common_options(args: &Map<String, JsonValue>) -> Result<RenderOptions> {
    let mut options = RenderOptions::default();
    if let Some(max_depth) = get_optional_u64(args, "max_depth")? {
        options.max_depth = Some(to_usize("max_depth", max_depth)?);
    }
    if let Some(cumulative) = get_optional_bool(args, "cumulative_counts")? {
        options.cumulative_counts = cumulative;
    }
    Ok(options)
}

fn diagram_options(args: &Map<String, JsonValue>) -> Result<RenderOptions> {
    check_known_args("create_mermaid_diagram", args, DIAGRAM_ARGS)?;
    let mut options = common_options(args)?;

    if let Some(direction) = get_optional_string(args, "direction")? {
        options.direction = direction.parse::<Direction>()?;
    }
    if let Some(include_counts) = get_optional_bool(args, "include_counts")? {
        options.include_counts = include_counts;
    }
    if let Some(inbox_root) = get_optional_bool(args, "inbox_root")? {
        options.inbox_root = inbox_root;
    }

    // Tool output is pasted into Markdown, so fence unless told otherwise.
    options.fenced = get_optional_bool(args, "fenced")?.unwrap_or(true);

    Ok(options)
}

fn plain_options(args: &Map<String, JsonValue>) -> Result<RenderOptions> {
    check_known_args("render_category_tree", args, PLAIN_ARGS)?;
    let mut options = common_options(args)?;
    if let Some(indent) = get_optional_u64(args, "indent")? {
        options.indent = to_usize("indent", indent)?;
    }
    Ok(options)
}

fn to_usize(name: &str, value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| DiagramError::InvalidArg {
        name: name.to_string(),
        reason: "Value out of range".to_string(),
    })
}

// ── Diagram ──────────────────────────────────────────────────────────────

fn dispatch_diagram(args: Map<String, JsonValue>) -> Result<JsonValue> {
    let options = diagram_options(&args)?;
    let records = get_records_arg(&args, "categories")?;

    let roots = build_tree(&records)?;
    let diagram = render_diagram(&roots, &options);
    debug!(
        categories = forest_size(&roots),
        bytes = diagram.len(),
        "created mermaid diagram"
    );

    Ok(JsonValue::String(diagram))
}

// ── Plain tree ───────────────────────────────────────────────────────────

fn dispatch_plain(args: Map<String, JsonValue>) -> Result<JsonValue> {
    let options = plain_options(&args)?;
    let records = get_records_arg(&args, "categories")?;

    let roots = build_tree(&records)?;
    Ok(JsonValue::String(render_plain_tree(&roots, &options)))
}
