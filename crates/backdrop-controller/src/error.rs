use backdrop_core::FormError;
use backdrop_frontend_core::FrontendError;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error("invalid form value: {0}")]
    Form(#[from] FormError),
}

/// Why an image preview read produced no source.
#[derive(Debug, thiserror::Error)]
pub enum PreviewLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("superseded by a newer file selection")]
    Cancelled,
}
