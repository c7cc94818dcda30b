//! # Error Handling
//!
//! This module defines the centralized error type for `jenkins-job-addons`.
//! It uses the `thiserror` library to create an `Error` enum that covers every
//! way a generation call can fail, with enough context (field names, offending
//! values, allowed choices) for the caller to fix the definition.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Generation aborts on the first error; nothing
//!   is retried and nothing is partially written.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Unknown job filters and unknown columns are deliberately *not* errors: the
//! generators skip them and log a warning instead.

use thiserror::Error;

/// Main error type for jenkins-job-addons operations
#[derive(Error, Debug)]
pub enum Error {
    /// A field marked as required is absent from the configuration.
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A field restricted to a fixed set of values holds something else.
    #[error("Invalid value '{value}' for {field}: must be one of {}", allowed.join(", "))]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A view or project kind was dispatched that no generator is registered for.
    #[error("Unknown generator: {kind}")]
    UnknownGenerator { kind: String },

    /// A definitions file or configuration value has an unexpected shape.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred while expanding a view template.
    ///
    /// May include the name of the problematic variable when applicable.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// The XML serializer rejected the generated tree.
    #[error("XML error: {message}")]
    Xml { message: String },

    /// A configuration value could not be rendered as element text.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A directory traversal error, wrapped from `walkdir::Error`.
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    /// Shorthand for a [`Error::ConfigParse`] without a hint.
    pub fn config(message: impl Into<String>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            hint: None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
