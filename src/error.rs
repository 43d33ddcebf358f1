//! Error types for the dialog engine
//!
//! Only failures that leave no dialog to show cross the engine boundary.
//! Everything user-facing (validation failures, collaborator errors) is
//! handled inside the running dialog via secondary modals.

use thiserror::Error;

/// Result type for dialog operations
pub type DialogResult<T> = std::result::Result<T, DialogError>;

/// Dialog-specific error types
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("invalid dialog specification: {0}")]
    BadSpec(String),

    #[error("terminal toolkit failed: {0}")]
    Toolkit(#[from] std::io::Error),

    #[error("dialog operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

impl DialogError {
    /// Shorthand for a structural specification error
    pub fn bad_spec(message: impl Into<String>) -> Self {
        Self::BadSpec(message.into())
    }
}
