//! Error types for svg-gate-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while parsing or serializing markup.
///
/// The sanitizer catches every variant and reports it as an entry in
/// [`SanitizationResult::errors`](crate::sanitize::SanitizationResult);
/// these never escape [`sanitize`](crate::sanitize::sanitize).
#[derive(Error, Debug)]
pub enum MarkupError {
    /// The input contained no markup at all.
    #[error("SVG content is empty")]
    Empty,

    /// The reader hit malformed XML syntax.
    #[error("SVG content is not well-formed: {0}")]
    Malformed(String),

    /// An attribute could not be decoded.
    #[error("unreadable attribute on <{tag}>: {detail}")]
    BadAttribute {
        /// Tag carrying the attribute.
        tag: String,
        /// Decoder detail.
        detail: String,
    },

    /// Markup ended before the document element was closed.
    #[error("SVG content ended before the root element was closed")]
    Truncated,

    /// No element was found in the input.
    #[error("SVG content has no root element")]
    NoRoot,
}

/// Result type alias using [`MarkupError`].
pub type MarkupResult<T> = Result<T, MarkupError>;
