//! # lumihub-adapter-shell
//!
//! Script adapter: the renderer and executor behind a trigger's action.
//!
//! Templating proper is an external collaborator, so [`LiteralRenderer`]
//! passes template source through unchanged. [`ShellExecutor`] hands the
//! rendered text to the system shell and treats a non-zero exit as a script
//! error.
//!
//! ## Dependency rule
//!
//! Depends on `lumihub-app` (port traits) and `lumihub-domain` only.

mod error;

pub use error::ShellError;

use std::process::Command;

use lumihub_app::ports::{ScriptExecutor, TemplateRenderer};
use lumihub_domain::error::HubError;
use lumihub_domain::script::ScriptTemplate;

/// Default shell used when none is configured.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Renderer that returns template source unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralRenderer;

impl TemplateRenderer for LiteralRenderer {
    fn render(&self, template: &ScriptTemplate) -> Result<String, HubError> {
        Ok(template.source.clone())
    }
}

/// Executor that runs script text through `shell -c`.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    /// Create an executor using the given shell binary.
    #[must_use]
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    fn run(&self, script: &str) -> Result<(), ShellError> {
        let output = Command::new(&self.shell).arg("-c").arg(script).output()?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::warn!(status = %output.status, %stderr, "script exited unsuccessfully");
        Err(ShellError::Failed {
            status: output.status,
            stderr,
        })
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ScriptExecutor for ShellExecutor {
    fn execute(&self, script: &str) -> Result<(), HubError> {
        tracing::debug!(shell = %self.shell, "executing script");
        self.run(script).map_err(HubError::from)
    }
}
