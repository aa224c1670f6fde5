//! Indented plain-text output.

use super::{normalize_label, summary_text, walk, EntryKind};
use crate::options::RenderOptions;
use crate::tree::CategoryTreeNode;

/// Render the forest as one `name (count)` line per node.
///
/// Uses the same traversal and depth limit as the diagram. Lines are
/// indented by `options.indent` spaces per level and joined without a
/// trailing newline.
pub fn render_plain_tree(roots: &[CategoryTreeNode], options: &RenderOptions) -> String {
    walk(roots, options)
        .iter()
        .map(|entry| {
            let indent = " ".repeat(options.indent * entry.depth);
            match entry.kind {
                EntryKind::Category(node) => format!(
                    "{}{} ({})",
                    indent,
                    normalize_label(&node.record.name),
                    entry.count
                ),
                EntryKind::Summary { omitted } => {
                    format!("{}{} ({})", indent, summary_text(omitted), entry.count)
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
