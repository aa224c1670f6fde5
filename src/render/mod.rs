//! Rendering of category forests.
//!
//! Both renderers consume the same pre-order emission list, so truncation
//! and node numbering are identical between the diagram and the plain tree.

mod mermaid;
mod plain;

pub use mermaid::{escape_label, render_diagram};
pub use plain::render_plain_tree;

use tracing::debug;

use crate::error::Result;
use crate::options::RenderOptions;
use crate::record::CategoryRecord;
use crate::tree::{build_tree, forest_size, CategoryTreeNode};

/// Label used when a name is empty after cleanup.
pub const UNNAMED_LABEL: &str = "(unnamed)";

/// What a single emitted line stands for.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EntryKind<'a> {
    Category(&'a CategoryTreeNode),
    /// Stand-in for the subtree below a node at the depth limit
    Summary { omitted: usize },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry<'a> {
    /// Pre-order position, also the diagram node number
    pub index: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    /// Count shown next to the label; for summaries, the omitted items
    pub count: u64,
    pub kind: EntryKind<'a>,
}

/// Per-node subtree measures, indexed by position in the full forest
/// pre-order. Item sums saturate at `u64::MAX`.
struct Subtrees {
    sizes: Vec<usize>,
    descendant_items: Vec<u64>,
}

impl Subtrees {
    fn measure(roots: &[CategoryTreeNode]) -> Self {
        let mut own = Vec::new();
        let mut parents = Vec::new();
        let mut stack: Vec<(&CategoryTreeNode, Option<usize>)> =
            roots.iter().rev().map(|root| (root, None)).collect();
        while let Some((node, parent)) = stack.pop() {
            let idx = own.len();
            own.push(node.record.item_count);
            parents.push(parent);
            stack.extend(node.children.iter().rev().map(|child| (child, Some(idx))));
        }

        // Children always follow their parent in pre-order.
        let mut sizes = vec![1usize; own.len()];
        let mut descendant_items = vec![0u64; own.len()];
        for idx in (0..own.len()).rev() {
            if let Some(p) = parents[idx] {
                sizes[p] += sizes[idx];
                let subtree = own[idx].saturating_add(descendant_items[idx]);
                descendant_items[p] = descendant_items[p].saturating_add(subtree);
            }
        }

        Self {
            sizes,
            descendant_items,
        }
    }

    fn push_siblings<'a>(
        &self,
        stack: &mut Vec<(&'a CategoryTreeNode, Option<usize>, usize)>,
        siblings: &'a [CategoryTreeNode],
        parent: Option<usize>,
        first: usize,
    ) {
        let mut position = first;
        let mut frames = Vec::with_capacity(siblings.len());
        for node in siblings {
            frames.push((node, parent, position));
            position += self.sizes[position];
        }
        stack.extend(frames.into_iter().rev());
    }
}

/// Flatten the forest into emission order, applying `max_depth`.
pub(crate) fn walk<'a>(roots: &'a [CategoryTreeNode], options: &RenderOptions) -> Vec<Entry<'a>> {
    let subtrees = Subtrees::measure(roots);
    let mut entries = Vec::new();
    let mut stack = Vec::new();
    subtrees.push_siblings(&mut stack, roots, None, 0);

    while let Some((node, parent, position)) = stack.pop() {
        let index = entries.len();
        let own = node.record.item_count;
        let below = subtrees.descendant_items[position];
        entries.push(Entry {
            index,
            parent,
            depth: node.depth,
            count: if options.cumulative_counts {
                own.saturating_add(below)
            } else {
                own
            },
            kind: EntryKind::Category(node),
        });

        if node.children.is_empty() {
            continue;
        }

        if options.max_depth.is_some_and(|max| node.depth >= max) {
            entries.push(Entry {
                index: index + 1,
                parent: Some(index),
                depth: node.depth + 1,
                count: below,
                kind: EntryKind::Summary {
                    omitted: subtrees.sizes[position] - 1,
                },
            });
            continue;
        }

        subtrees.push_siblings(&mut stack, &node.children, Some(index), position + 1);
    }

    entries
}

pub(crate) fn summary_text(omitted: usize) -> String {
    let noun = if omitted == 1 { "category" } else { "categories" };
    format!("+{} more {}", omitted, noun)
}

/// Single-line form of a category name.
///
/// Control characters and line breaks become spaces, whitespace runs are
/// collapsed. Empty results fall back to [`UNNAMED_LABEL`].
pub fn normalize_label(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        UNNAMED_LABEL.to_string()
    } else {
        collapsed
    }
}

/// Both renderings of one category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    /// Mermaid markup
    pub diagram: String,
    /// Indented plain-text tree
    pub plain: String,
    /// Number of categories in the input
    pub node_count: usize,
}

/// Renders category lists with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct CategoryTreeRenderer {
    options: RenderOptions,
}

impl CategoryTreeRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// See [`build_tree`].
    pub fn build_tree(&self, records: &[CategoryRecord]) -> Result<Vec<CategoryTreeNode>> {
        build_tree(records)
    }

    /// See [`render_diagram`].
    pub fn render_diagram(&self, roots: &[CategoryTreeNode]) -> String {
        render_diagram(roots, &self.options)
    }

    /// See [`render_plain_tree`].
    pub fn render_plain_tree(&self, roots: &[CategoryTreeNode]) -> String {
        render_plain_tree(roots, &self.options)
    }

    /// Validate `records` and produce both renderings.
    ///
    /// Fails before producing any output if the records are invalid.
    pub fn render(&self, records: &[CategoryRecord]) -> Result<RenderedTree> {
        let roots = build_tree(records)?;
        let rendered = RenderedTree {
            diagram: self.render_diagram(&roots),
            plain: self.render_plain_tree(&roots),
            node_count: forest_size(&roots),
        };
        debug!(
            nodes = rendered.node_count,
            diagram_bytes = rendered.diagram.len(),
            "rendered category tree"
        );
        Ok(rendered)
    }
}
