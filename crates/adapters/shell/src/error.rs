//! Shell-specific error type wrapping process failures.

use lumihub_domain::error::HubError;

/// Errors originating from the shell execution layer.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The shell process could not be spawned.
    #[error("failed to spawn shell")]
    Spawn(#[from] std::io::Error),

    /// The script ran but exited unsuccessfully.
    #[error("script exited unsuccessfully: {status}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

impl From<ShellError> for HubError {
    fn from(err: ShellError) -> Self {
        Self::Script(Box::new(err))
    }
}
