//! Error types for the domain layer.

/// Errors raised while turning raw control values into form state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("alpha value is not an integer: {0:?}")]
    InvalidAlpha(String),

    /// Slider text parsed, but lies outside 0..=255. Never clamped.
    #[error("alpha value {0} is outside 0..=255")]
    AlphaOutOfRange(i64),
}

/// Errors raised while decoding a data URL.
#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}
