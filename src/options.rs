//! Rendering options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiagramError;

/// Layout direction of the diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Parents above children (`graph TD`)
    #[default]
    #[serde(alias = "TD", alias = "TB")]
    TopDown,
    /// Parents left of children (`graph LR`)
    #[serde(alias = "LR")]
    LeftRight,
}

impl Direction {
    /// Mermaid direction keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::TopDown => "TD",
            Direction::LeftRight => "LR",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => f.write_str("top-down"),
            Direction::LeftRight => f.write_str("left-right"),
        }
    }
}

impl FromStr for Direction {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-down" | "TD" | "TB" => Ok(Direction::TopDown),
            "left-right" | "LR" => Ok(Direction::LeftRight),
            other => Err(DiagramError::InvalidArg {
                name: "direction".to_string(),
                reason: format!("expected 'top-down' or 'left-right', got '{}'", other),
            }),
        }
    }
}

/// Options shared by the diagram and plain-text renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Diagram direction (ignored by the plain renderer)
    pub direction: Direction,
    /// Append `(N emails)` to diagram labels
    pub include_counts: bool,
    /// Deepest level rendered; deeper subtrees collapse into a summary node
    pub max_depth: Option<usize>,
    /// Show subtree totals instead of each category's own count
    pub cumulative_counts: bool,
    /// Hang every root under a synthetic inbox node
    pub inbox_root: bool,
    /// Wrap the diagram in a Markdown code fence
    pub fenced: bool,
    /// Spaces per level in the plain tree
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            direction: Direction::TopDown,
            include_counts: true,
            max_depth: None,
            cumulative_counts: false,
            inbox_root: false,
            fenced: false,
            indent: 2,
        }
    }
}

impl RenderOptions {
    /// Set the diagram direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Limit rendering depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Toggle count suffixes on diagram labels.
    pub fn with_counts(mut self, include_counts: bool) -> Self {
        self.include_counts = include_counts;
        self
    }

    /// Toggle subtree totals.
    pub fn with_cumulative_counts(mut self, cumulative: bool) -> Self {
        self.cumulative_counts = cumulative;
        self
    }

    /// Toggle the synthetic inbox root.
    pub fn with_inbox_root(mut self, inbox_root: bool) -> Self {
        self.inbox_root = inbox_root;
        self
    }

    /// Toggle the Markdown fence.
    pub fn with_fence(mut self, fenced: bool) -> Self {
        self.fenced = fenced;
        self
    }

    /// Set the plain-tree indent width.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
