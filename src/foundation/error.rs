/// Convenience result type used across qrshape.
pub type QrShapeResult<T> = Result<T, QrShapeError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Layout problems (degenerate canvas, out-of-range style values) are not errors: they are
/// clamped or degrade to an empty geometry. Only malformed inputs and encoder failures surface.
#[derive(thiserror::Error, Debug)]
pub enum QrShapeError {
    /// Invalid user-provided data (non-square matrix, malformed color, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// The payload could not be encoded at the requested error-correction level.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QrShapeError {
    /// Build a [`QrShapeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QrShapeError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`QrShapeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
