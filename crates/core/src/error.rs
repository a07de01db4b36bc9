//! Error types for the pair-merge tokenizer library.

use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// Encoding and decoding never fail; errors only come from invalid
/// training configuration or from rebuilding state out of a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// Invalid training configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot contents violate the vocabulary or merge table invariants
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Invalid merge rule
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
