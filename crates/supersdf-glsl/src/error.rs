//! Error types for shader generation

use thiserror::Error;

/// Result type alias using the generator's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a shader compile. No partial shader is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The tree contains a node kind with no GLSL lowering
    #[error("Unsupported node: {kind} cannot be lowered to GLSL")]
    UnsupportedNode { kind: &'static str },

    /// A parameter is NaN or infinite and has no GLSL literal
    #[error("Non-finite literal: {value}")]
    NonFiniteLiteral { value: f32 },

    /// The template does not contain the scene placeholder
    #[error("Shader template is missing the `{marker}` placeholder")]
    MissingPlaceholder { marker: &'static str },
}
