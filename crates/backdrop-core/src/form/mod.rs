//! Explicit form state and the pure functions that update it.

pub mod state;
pub mod update;

pub use state::{BackgroundType, FormField, FormState, SwatchStyle};
pub use update::{
    initialize, select_preset_color, toggle_background_options, update_alpha, update_color,
    update_color_preview,
};
