//! Error types for the showcase runtime
//!
//! Every failure in the page runtime is local and non-fatal: callers log the
//! error and carry on. The variants exist so that tests (and the CLI) can
//! tell the failure modes apart.

use thiserror::Error;

/// Errors produced by the page controllers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShowcaseError {
    /// An element the DOM contract expects is missing
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A diagram container is missing
    #[error("diagram container not found: {0}")]
    ContainerNotFound(String),

    /// No diagram definition is registered under this id
    #[error("diagram definition not found: {0}")]
    DiagramNotFound(String),

    /// The id is not a member of the section registry
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// The diagramming library failed to render a definition
    #[error("failed to render diagram '{diagram}': {message}")]
    Render { diagram: String, message: String },

    /// The diagramming library is not loaded
    #[error("diagram renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// A selector could not be parsed
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// Configuration could not be read or written
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for showcase operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;
