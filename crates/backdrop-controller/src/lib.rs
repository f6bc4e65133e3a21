//! Backdrop controller — drives a [`FormSurface`] from user events.
//!
//! Each entry point reads a [`FormState`] snapshot from the surface, runs the
//! matching pure update from `backdrop-core`, and writes back only the
//! fields that update touched. The image preview read runs as a cancellable
//! tokio task.
//!
//! [`FormSurface`]: backdrop_frontend_core::FormSurface
//! [`FormState`]: backdrop_core::FormState

pub mod controller;
pub mod error;
pub mod events;
pub mod loader;

pub use controller::FormController;
pub use error::{ControllerError, PreviewLoadError};
pub use events::FormEvent;
