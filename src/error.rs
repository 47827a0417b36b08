// Caller-visible failure taxonomy for snapshot queries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Missing or empty host identifier; never reaches the metric store.
    #[error("{0}")]
    Validation(String),

    /// Well-formed identifier without a joined row in any window.
    #[error("Instance with ID '{host_id}' not found")]
    NotFound { host_id: String },

    /// Store unreachable, malformed query or execution fault. Details are logged, not returned.
    #[error("metric store query failed")]
    Infrastructure(#[from] anyhow::Error),
}

impl SnapshotError {
    /// Full context chain for server-side logs; never sent to callers.
    pub fn detail(&self) -> String {
        match self {
            SnapshotError::Infrastructure(e) => format!("{:#}", e),
            other => other.to_string(),
        }
    }
}
