use crate::foundation::core::Resolution;

/// Convenience result type used across zmerge.
pub type ZMergeResult<T> = Result<T, ZMergeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ZMergeError {
    /// Two layers (or the color and depth pass of one layer) disagree on size.
    #[error("resolution mismatch: layer {layer} is {found}, expected {expected}")]
    ResolutionMismatch {
        /// Index of the offending layer in input order.
        layer: usize,
        /// Resolution of the first layer.
        expected: Resolution,
        /// Resolution of the offending layer.
        found: Resolution,
    },

    /// A blend-mode identifier does not name one of the supported modes.
    #[error("invalid blend mode: {0}")]
    InvalidMode(String),

    /// Invalid user-provided settings or layer data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image decoded, but not into something usable as a layer pass.
    #[error("decode error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ZMergeError {
    /// Build a [`ZMergeError::ResolutionMismatch`] value.
    pub fn resolution_mismatch(layer: usize, expected: Resolution, found: Resolution) -> Self {
        Self::ResolutionMismatch {
            layer,
            expected,
            found,
        }
    }

    /// Build a [`ZMergeError::InvalidMode`] value.
    pub fn invalid_mode(msg: impl Into<String>) -> Self {
        Self::InvalidMode(msg.into())
    }

    /// Build a [`ZMergeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ZMergeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
