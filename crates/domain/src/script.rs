//! Script template — the value handed to the renderer port.
//!
//! Templating itself is an external collaborator; the domain only carries
//! the raw source around.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::name::InstanceName;

/// A named, unrendered script template bound to one trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTemplate {
    /// The owning trigger's instance name, for log attribution.
    pub name: InstanceName,
    /// Unrendered template source.
    pub source: String,
}

impl ScriptTemplate {
    /// Build a template for the given trigger.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: InstanceName::new(name)?,
            source: source.into(),
        })
    }
}
