//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubError`]
//! via `#[from]` or an explicit `From` impl (adapter crates box their error
//! behind the `Script` variant).

/// Top-level error type shared by the application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A named resource does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Rendering or executing a trigger script failed.
    #[error("script failed: {0}")]
    Script(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A name field was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// An LED channel value fell outside `0.0..=1.0`.
    #[error("LED channel {channel} out of range: {value}")]
    LevelOutOfRange {
        channel: &'static str,
        value: f32,
    },
}

/// A required named resource was absent.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// The kind of resource (e.g. `"trigger"`, `"led"`).
    pub entity: &'static str,
    /// The name or id that failed to resolve.
    pub id: String,
}
