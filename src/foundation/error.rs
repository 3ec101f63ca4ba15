/// Convenience result type used across the crate.
pub type RecolorResult<T> = Result<T, RecolorError>;

/// Top-level error taxonomy used by the recoloring APIs.
///
/// Every variant is terminal for the invocation that raised it; nothing in the
/// crate retries.
#[derive(thiserror::Error, Debug)]
pub enum RecolorError {
    /// A color string was not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// The input file extension is neither `.png` nor `.svg`.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A raster input could not be decoded into a pixel buffer.
    #[error("decode error: {0}")]
    Decode(String),

    /// A vector input could not be parsed or rasterized.
    #[error("render error: {0}")]
    Render(String),

    /// The output could not be durably persisted.
    #[error("write error: {0}")]
    Write(String),

    /// Pixel buffer sizing is internally inconsistent.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid user-provided job or manifest data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RecolorError {
    /// Build a [`RecolorError::InvalidColorFormat`] value.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColorFormat(msg.into())
    }

    /// Build a [`RecolorError::UnsupportedFormat`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`RecolorError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`RecolorError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RecolorError::Write`] value.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Build a [`RecolorError::DimensionMismatch`] value.
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`RecolorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
