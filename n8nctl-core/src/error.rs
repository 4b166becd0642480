//! Error types for core transforms

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while manipulating workflow documents locally
#[derive(Debug, Error)]
pub enum CoreError {
    /// A node referenced by name does not exist in the workflow
    #[error("node '{name}' not found in workflow")]
    NodeNotFound {
        /// The name that was looked up
        name: String,
    },

    /// The addressed node is not a code-bearing node
    #[error("node '{name}' is not a Code node")]
    NotACodeNode {
        /// The node's name
        name: String,
    },

    /// The manifest file is missing from the import directory
    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// A manifest entry no longer matches the current workflow
    #[error("stale manifest: {reason}")]
    StaleManifest {
        /// What went out of sync
        reason: String,
    },

    /// Filesystem failure while reading or writing script files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
