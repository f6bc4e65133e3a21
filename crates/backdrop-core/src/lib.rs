//! Backdrop Core — domain layer for the background-options form.
//!
//! This crate contains the color composition rules, the explicit form state
//! and the pure update functions that act on it, the image-preview state
//! machine, and the data-URL codec. No I/O, async runtime, or presentation
//! dependencies.

pub mod color;
pub mod data_url;
pub mod error;
pub mod form;
pub mod preview;

// Re-exports for convenience.
pub use color::{AlphaPercent, ComposedColor, PresetColor, RgbHex};
pub use error::{DataUrlError, FormError};
pub use form::{BackgroundType, FormState, SwatchStyle};
pub use preview::{ImagePreview, PreviewDisplay, ReadTicket, SelectedFile};
