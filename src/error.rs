//! Error types for category tree rendering.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, DiagramError>;

/// Errors raised while validating categories or handling tool calls.
///
/// The first three variants are input-validation failures: the category
/// list handed in by the caller is malformed. They are reported before any
/// output is produced.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Two records share the same id
    #[error("duplicate category id: {0}")]
    DuplicateId(String),

    /// A record points at a parent that is not in the input
    #[error("category '{id}' references unknown parent '{parent_id}'")]
    DanglingReference {
        /// Record holding the bad reference
        id: String,
        /// The parent id that could not be resolved
        parent_id: String,
    },

    /// Following parent links leads back to a category on the same path
    #[error("cycle detected in category hierarchy at '{id}'")]
    Cycle {
        /// A category that is its own ancestor
        id: String,
    },

    /// Tool name not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Required tool argument missing
    #[error("Missing required argument: {0}")]
    MissingArg(String),

    /// Tool argument present but unusable
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArg {
        /// Argument name
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiagramError {
    /// The offending category id for validation failures.
    pub fn category_id(&self) -> Option<&str> {
        match self {
            DiagramError::DuplicateId(id) => Some(id.as_str()),
            DiagramError::DanglingReference { parent_id, .. } => Some(parent_id.as_str()),
            DiagramError::Cycle { id } => Some(id.as_str()),
            _ => None,
        }
    }
}
