//! Error types for stack composition and synthesis

use thiserror::Error;

use crate::domain::network::NetworkError;

/// Errors that can occur while composing or synthesizing a stack
#[derive(Debug, Error)]
pub enum SynthError {
    /// Two constructs resolved to the same logical id
    #[error("Duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    /// An output name was registered twice on the same stack
    #[error("Duplicate output: {0}")]
    DuplicateOutput(String),

    /// Two stacks with the same name were added to one app
    #[error("Duplicate stack: {0}")]
    DuplicateStack(String),

    /// An explicit dependency names a resource that does not exist
    #[error("Resource '{from}' depends on unknown resource '{to}'")]
    UnknownDependency { from: String, to: String },

    /// A Ref or GetAtt marker points at a resource that does not exist
    #[error("'{from}' references unknown resource '{to}'")]
    UnknownReference { from: String, to: String },

    /// The dependency graph contains a cycle
    #[error("Dependency cycle involving resource '{0}'")]
    DependencyCycle(String),

    /// Network address error
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for synthesis operations
pub type SynthResult<T> = Result<T, SynthError>;

impl From<NetworkError> for SynthError {
    fn from(err: NetworkError) -> Self {
        SynthError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SynthError {
    fn from(err: serde_json::Error) -> Self {
        SynthError::Serialization(err.to_string())
    }
}
