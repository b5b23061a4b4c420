/// Result alias used across the crate.
pub type VirtImgResult<T> = Result<T, VirtImgError>;

/// Errors raised while building or querying a virtual image graph.
#[derive(thiserror::Error, Debug)]
pub enum VirtImgError {
    /// A transform or gradient was given parameters it cannot be built from.
    #[error("construction error: {0}")]
    Construction(String),

    /// A coordinate query fell outside the image's bounds.
    #[error("bounds error: {0}")]
    Bounds(String),

    /// Options or configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A recipe document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, typically I/O or codec errors from the surface layer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VirtImgError {
    /// Build a [`VirtImgError::Construction`].
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build a [`VirtImgError::Bounds`].
    pub fn bounds(msg: impl Into<String>) -> Self {
        Self::Bounds(msg.into())
    }

    /// Build a [`VirtImgError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VirtImgError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
