//! Error types for configuration assembly and compilation.

use thiserror::Error;

use fresco_preset::ChainError;

/// A rejection from the external CSS compiler pipeline.
#[derive(Debug, Clone, Error)]
#[error("CSS compilation failed: {message}")]
pub struct CompileError {
    /// The compiler's own message, including its position information.
    pub message: String,

    /// The authoring template that was handed to the compiler, kept for
    /// diagnostics alongside the message.
    pub template: String,
}

/// Errors from a full preset generation run.
///
/// Compile failures carry the serialized configuration: it was assembled
/// before the compiler ran and is the most useful diagnostic for the
/// caller. Chain failures happen before configuration serialization and
/// carry none.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{error}")]
    Compile {
        error: CompileError,
        /// The serialized configuration object at the time of failure.
        json: String,
    },
}
