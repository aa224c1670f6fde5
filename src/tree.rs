//! Category tree assembly.
//!
//! Records are held in an arena and linked by index, so parent/child
//! relations never form owning cycles. The input is validated in full
//! before any node is built.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::error::{DiagramError, Result};
use crate::record::CategoryRecord;

/// A category with its ordered children.
///
/// Dropping a node releases its subtree iteratively, so arbitrarily deep
/// chains are safe to build and discard.
#[derive(Debug)]
pub struct CategoryTreeNode {
    /// Source record
    pub record: CategoryRecord,
    /// Children, most items first
    pub children: Vec<CategoryTreeNode>,
    /// Distance from the root, roots are 0
    pub depth: usize,
}

impl CategoryTreeNode {
    /// Pre-order iterator over this node and all of its descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of descendants, excluding `self`.
    pub fn descendant_count(&self) -> usize {
        self.node_count() - 1
    }

    /// Sum of `item_count` over the descendants, excluding `self`.
    ///
    /// Saturates at `u64::MAX`.
    pub fn descendant_item_count(&self) -> u64 {
        self.iter()
            .skip(1)
            .fold(0u64, |total, node| total.saturating_add(node.record.item_count))
    }

    /// Sum of `item_count` over this node and its descendants.
    ///
    /// Saturates at `u64::MAX`. Renderers compute the same totals for a
    /// whole forest in one pass instead of calling this per node.
    pub fn subtree_item_count(&self) -> u64 {
        self.record
            .item_count
            .saturating_add(self.descendant_item_count())
    }
}

impl Drop for CategoryTreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Iterator returned by [`CategoryTreeNode::iter`].
pub struct PreOrder<'a> {
    stack: Vec<&'a CategoryTreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a CategoryTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Total number of nodes in a forest.
pub fn forest_size(roots: &[CategoryTreeNode]) -> usize {
    roots.iter().map(CategoryTreeNode::node_count).sum()
}

/// Build the category forest from a flat record list.
///
/// Returns the roots; every record appears exactly once in the result.
/// Siblings (and roots) are ordered by `item_count` descending, then
/// case-insensitive name, then id.
///
/// # Errors
///
/// - [`DiagramError::DuplicateId`] if two records share an id
/// - [`DiagramError::DanglingReference`] if a parent id is unknown
/// - [`DiagramError::Cycle`] if a category is its own ancestor
pub fn build_tree(records: &[CategoryRecord]) -> Result<Vec<CategoryTreeNode>> {
    let index = index_records(records)?;
    let parents = resolve_parents(records, &index)?;
    check_acyclic(records, &parents)?;

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (idx, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(idx),
            None => roots.push(idx),
        }
    }

    sort_siblings(records, &mut roots);
    for siblings in &mut children {
        sort_siblings(records, siblings);
    }

    // Breadth-first order puts every parent before its children; building
    // in reverse means each child is finished before its parent needs it.
    let mut depths = vec![0usize; records.len()];
    let mut order = Vec::with_capacity(records.len());
    let mut queue: VecDeque<usize> = roots.iter().copied().collect();
    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for &child in &children[idx] {
            depths[child] = depths[idx] + 1;
            queue.push_back(child);
        }
    }

    let mut built: Vec<Option<CategoryTreeNode>> = (0..records.len()).map(|_| None).collect();
    for &idx in order.iter().rev() {
        let node = CategoryTreeNode {
            record: records[idx].clone(),
            children: children[idx]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect(),
            depth: depths[idx],
        };
        built[idx] = Some(node);
    }

    let forest: Vec<CategoryTreeNode> = roots
        .iter()
        .filter_map(|&idx| built[idx].take())
        .collect();

    debug!(
        records = records.len(),
        roots = forest.len(),
        max_depth = depths.iter().max().copied().unwrap_or(0),
        "built category tree"
    );

    Ok(forest)
}

fn index_records(records: &[CategoryRecord]) -> Result<HashMap<&str, usize>> {
    let mut index = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        if index.insert(record.id.as_str(), idx).is_some() {
            return Err(DiagramError::DuplicateId(record.id.clone()));
        }
    }
    Ok(index)
}

fn resolve_parents(
    records: &[CategoryRecord],
    index: &HashMap<&str, usize>,
) -> Result<Vec<Option<usize>>> {
    records
        .iter()
        .map(|record| match &record.parent_id {
            None => Ok(None),
            Some(parent_id) => index.get(parent_id.as_str()).copied().map(Some).ok_or_else(|| {
                DiagramError::DanglingReference {
                    id: record.id.clone(),
                    parent_id: parent_id.clone(),
                }
            }),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

fn check_acyclic(records: &[CategoryRecord], parents: &[Option<usize>]) -> Result<()> {
    let mut marks = vec![Mark::Unvisited; records.len()];
    let mut path = Vec::new();

    for start in 0..records.len() {
        let mut current = Some(start);
        while let Some(idx) = current {
            match marks[idx] {
                Mark::Done => break,
                Mark::OnPath => {
                    return Err(DiagramError::Cycle {
                        id: records[idx].id.clone(),
                    })
                }
                Mark::Unvisited => {
                    marks[idx] = Mark::OnPath;
                    path.push(idx);
                    current = parents[idx];
                }
            }
        }
        for idx in path.drain(..) {
            marks[idx] = Mark::Done;
        }
    }

    Ok(())
}

fn sort_siblings(records: &[CategoryRecord], siblings: &mut [usize]) {
    siblings.sort_by_cached_key(|&idx| {
        let record = &records[idx];
        (
            Reverse(record.item_count),
            record.name.to_lowercase(),
            record.id.clone(),
        )
    });
}
