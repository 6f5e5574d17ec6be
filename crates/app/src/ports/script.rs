//! Script port — rendering and executing a trigger's action.
//!
//! The real templating engine and script interpreter are external
//! collaborators; the core only sees these two seams.

use std::rc::Rc;
use std::sync::Arc;

use lumihub_domain::error::HubError;
use lumihub_domain::script::ScriptTemplate;

/// Turns a template into executable script text.
pub trait TemplateRenderer {
    /// Render `template` into script text.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Script`] when rendering fails.
    fn render(&self, template: &ScriptTemplate) -> Result<String, HubError>;
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for &R {
    fn render(&self, template: &ScriptTemplate) -> Result<String, HubError> {
        (**self).render(template)
    }
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for Rc<R> {
    fn render(&self, template: &ScriptTemplate) -> Result<String, HubError> {
        (**self).render(template)
    }
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for Arc<R> {
    fn render(&self, template: &ScriptTemplate) -> Result<String, HubError> {
        (**self).render(template)
    }
}

/// Runs rendered script text.
pub trait ScriptExecutor {
    /// Execute `script` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Script`] when execution fails.
    fn execute(&self, script: &str) -> Result<(), HubError>;
}

impl<X: ScriptExecutor + ?Sized> ScriptExecutor for &X {
    fn execute(&self, script: &str) -> Result<(), HubError> {
        (**self).execute(script)
    }
}

impl<X: ScriptExecutor + ?Sized> ScriptExecutor for Rc<X> {
    fn execute(&self, script: &str) -> Result<(), HubError> {
        (**self).execute(script)
    }
}

impl<X: ScriptExecutor + ?Sized> ScriptExecutor for Arc<X> {
    fn execute(&self, script: &str) -> Result<(), HubError> {
        (**self).execute(script)
    }
}
