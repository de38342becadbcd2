//! Error types for configuration and tag parsing.
//!
//! Runtime operations on the overlay never fail; anomalies there are logged
//! and resolved by fallback. Only configuration and textual input can be
//! rejected.

use kurbo::Size;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Permitted edge set must contain at least one edge")]
    EmptyPermittedEdges,
    #[error("Attraction radius must be finite and non-negative, got {0}")]
    InvalidAttractionRadius(f64),
    #[error("Size '{name}' must be finite and positive, got {size:?}")]
    InvalidSize { name: &'static str, size: Size },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error returned when a textual edge, state or action tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} tag: '{tag}'")]
pub struct ParseTagError {
    pub kind: &'static str,
    pub tag: String,
}

impl ParseTagError {
    pub(crate) fn new(kind: &'static str, tag: &str) -> Self {
        Self {
            kind,
            tag: tag.to_string(),
        }
    }
}
