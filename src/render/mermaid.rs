//! Mermaid flowchart output.

use super::{normalize_label, summary_text, walk, Entry, EntryKind};
use crate::options::RenderOptions;
use crate::tree::CategoryTreeNode;

const INDENT: &str = "    ";
const INBOX_ID: &str = "inbox";
const INBOX_LABEL: &str = "📬 Inbox";
const EMPTY_INBOX_LABEL: &str = "Inbox - No categories yet";
const INBOX_STYLE: [&str; 2] = [
    "classDef inboxStyle fill:#4A90E2,stroke:#2E5C8A,color:#fff",
    "class inbox inboxStyle",
];

/// Escape a category name for use inside a quoted Mermaid label.
///
/// The name is normalised to a single line first. Characters Mermaid
/// treats specially are replaced with its entity codes. Backticks are
/// included so a name cannot close the surrounding Markdown fence.
pub fn escape_label(name: &str) -> String {
    let normalized = normalize_label(name);
    let mut out = String::with_capacity(normalized.len());
    for ch in normalized.chars() {
        match ch {
            '#' => out.push_str("#35;"),
            '"' => out.push_str("#quot;"),
            '|' => out.push_str("#124;"),
            '<' => out.push_str("#lt;"),
            '>' => out.push_str("#gt;"),
            '`' => out.push_str("#96;"),
            c => out.push(c),
        }
    }
    out
}

fn node_id(index: usize) -> String {
    format!("node{}", index)
}

fn with_count(label: String, count: u64, options: &RenderOptions) -> String {
    if options.include_counts && count > 0 {
        format!("{} ({} emails)", label, count)
    } else {
        label
    }
}

fn declaration(entry: &Entry<'_>, options: &RenderOptions) -> String {
    let id = node_id(entry.index);
    match entry.kind {
        EntryKind::Category(node) => {
            let label = with_count(escape_label(&node.record.name), entry.count, options);
            format!("{}{}[\"{}\"]", INDENT, id, label)
        }
        EntryKind::Summary { omitted } => {
            let label = with_count(summary_text(omitted), entry.count, options);
            format!("{}{}([\"{}\"])", INDENT, id, label)
        }
    }
}

/// Render the forest as a Mermaid flowchart.
///
/// Nodes are numbered by pre-order position, so identical input always
/// yields identical output. Every declaration is followed by the edge
/// from its parent.
pub fn render_diagram(roots: &[CategoryTreeNode], options: &RenderOptions) -> String {
    let mut lines = Vec::new();

    if options.fenced {
        lines.push("```mermaid".to_string());
    }
    lines.push(format!("graph {}", options.direction.keyword()));

    if options.inbox_root {
        let label = if roots.is_empty() {
            EMPTY_INBOX_LABEL
        } else {
            INBOX_LABEL
        };
        lines.push(format!("{}{}[\"{}\"]", INDENT, INBOX_ID, label));
    }

    for entry in walk(roots, options) {
        lines.push(declaration(&entry, options));
        match entry.parent {
            Some(parent) => lines.push(format!(
                "{}{} --> {}",
                INDENT,
                node_id(parent),
                node_id(entry.index)
            )),
            None if options.inbox_root => lines.push(format!(
                "{}{} --> {}",
                INDENT,
                INBOX_ID,
                node_id(entry.index)
            )),
            None => {}
        }
    }

    if options.inbox_root && !roots.is_empty() {
        lines.push(String::new());
        lines.extend(INBOX_STYLE.iter().map(|style| format!("{}{}", INDENT, style)));
    }

    if options.fenced {
        lines.push("```".to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Direction;
    use crate::record::CategoryRecord;
    use crate::tree::build_tree;

    fn work() -> Vec<CategoryRecord> {
        vec![
            CategoryRecord::root("1", "Work", 1245),
            CategoryRecord::child("2", "Project Alpha", "1", 480),
            CategoryRecord::child("3", "Project Beta", "1", 320),
        ]
    }

    #[test]
    fn test_work_scenario() {
        let roots = build_tree(&work()).unwrap();
        let diagram = render_diagram(&roots, &RenderOptions::default());
        let expected = [
            "graph TD",
            "    node0[\"Work (1245 emails)\"]",
            "    node1[\"Project Alpha (480 emails)\"]",
            "    node0 --> node1",
            "    node2[\"Project Beta (320 emails)\"]",
            "    node0 --> node2",
        ]
        .join("\n");
        assert_eq!(diagram, expected);
    }

    #[test]
    fn test_left_right_without_counts() {
        let roots = build_tree(&work()).unwrap();
        let opts = RenderOptions::default()
            .with_direction(Direction::LeftRight)
            .with_counts(false);
        let diagram = render_diagram(&roots, &opts);
        assert!(diagram.starts_with("graph LR\n"));
        assert!(diagram.contains("node0[\"Work\"]"));
        assert!(!diagram.contains("emails"));
    }

    #[test]
    fn test_zero_count_has_no_suffix() {
        let roots = build_tree(&[CategoryRecord::root("x", "Empty", 0)]).unwrap();
        let diagram = render_diagram(&roots, &RenderOptions::default());
        assert!(diagram.contains("node0[\"Empty\"]"));
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("A|B"), "A#124;B");
        assert_eq!(escape_label("Say \"hi\""), "Say #quot;hi#quot;");
        assert_eq!(escape_label("<b>"), "#lt;b#gt;");
        assert_eq!(escape_label("C# news"), "C#35; news");
        assert_eq!(escape_label("two\nlines"), "two lines");
        assert_eq!(escape_label(" \n "), "(unnamed)");
        assert_eq!(escape_label("Release ``` notes"), "Release #96;#96;#96; notes");
    }

    #[test]
    fn test_backticks_cannot_close_fence() {
        let roots = build_tree(&[
            CategoryRecord::root("1", "Release ``` notes", 2),
            CategoryRecord::child("2", "```", "1", 1),
        ])
        .unwrap();
        let diagram = render_diagram(&roots, &RenderOptions::default().with_fence(true));
        let fences = diagram.lines().filter(|line| line.contains("```")).count();
        assert_eq!(fences, 2);
        assert!(diagram.contains("node0[\"Release #96;#96;#96; notes (2 emails)\"]"));
        assert!(diagram.contains("node1[\"#96;#96;#96; (1 emails)\"]"));
    }

    #[test]
    fn test_escaped_labels_stay_on_one_line() {
        let roots = build_tree(&[
            CategoryRecord::root("a", "Bills \"2024\" | <due>", 3),
            CategoryRecord::root("b", "\n", 1),
        ])
        .unwrap();
        let diagram = render_diagram(&roots, &RenderOptions::default());
        assert_eq!(diagram.lines().count(), 3);
        assert!(diagram.contains("node0[\"Bills #quot;2024#quot; #124; #lt;due#gt; (3 emails)\"]"));
        assert!(diagram.contains("node1[\"(unnamed) (1 emails)\"]"));
    }

    #[test]
    fn test_summary_node() {
        let records = vec![
            CategoryRecord::root("r", "Root", 1),
            CategoryRecord::child("c", "Child", "r", 2),
            CategoryRecord::child("g", "Grandchild", "c", 3),
        ];
        let roots = build_tree(&records).unwrap();
        let diagram = render_diagram(&roots, &RenderOptions::default().with_max_depth(0));
        assert!(diagram.contains("    node1([\"+2 more categories (5 emails)\"])"));
        assert!(diagram.contains("    node0 --> node1"));
        assert!(!diagram.contains("Grandchild"));
    }

    #[test]
    fn test_inbox_root_and_fence() {
        let roots = build_tree(&work()).unwrap();
        let opts = RenderOptions::default().with_inbox_root(true).with_fence(true);
        let diagram = render_diagram(&roots, &opts);
        let lines: Vec<_> = diagram.lines().collect();
        assert_eq!(lines[0], "```mermaid");
        assert_eq!(lines[1], "graph TD");
        assert_eq!(lines[2], "    inbox[\"📬 Inbox\"]");
        assert!(lines.contains(&"    inbox --> node0"));
        assert!(lines.contains(&"    class inbox inboxStyle"));
        assert_eq!(lines.last(), Some(&"```"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_diagram(&[], &RenderOptions::default()), "graph TD");

        let opts = RenderOptions::default().with_inbox_root(true).with_fence(true);
        assert_eq!(
            render_diagram(&[], &opts),
            "```mermaid\ngraph TD\n    inbox[\"Inbox - No categories yet\"]\n```"
        );
    }
}
