//! Error types for reply parsing

use crate::types::Span;
use thiserror::Error;

/// Errors that can occur while configuring a reply parser or loading a
/// serialized fragment
///
/// Parsing itself never fails; only an unusable language configuration or
/// inconsistent stored spans are reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// None of the requested languages is known and no default is configured
    #[error("No known language among {requested:?} and no default language configured")]
    NoLanguage { requested: Vec<String> },

    /// The configured default language is not in the registry
    #[error("Unknown default language: {0}")]
    UnknownDefaultLanguage(String),

    /// Stored fragment spans do not partition its content
    #[error("Fragment spans {headers:?} and {signatures:?} do not partition {len} bytes of content")]
    InvalidSpans {
        headers: Span,
        signatures: Span,
        len: usize,
    },
}

/// Result type for reply parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
