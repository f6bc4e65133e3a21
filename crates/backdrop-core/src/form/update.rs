//! Pure update functions over [`FormState`].
//!
//! Each function recomputes the derived values an event affects and returns
//! the fields it wrote, in write order, so an adapter can push exactly those
//! back to the page.

use crate::color::{AlphaPercent, ComposedColor, PresetColor, RgbHex, compose};

use super::state::{FormField, FormState, SwatchStyle};

/// Run once when the page is ready: sync the panel and the swatch with
/// whatever defaults the markup carries.
pub fn initialize(state: &mut FormState) -> Vec<FormField> {
    let mut touched = toggle_background_options(state);
    touched.extend(update_color_preview(state));
    touched
}

/// Show the color options only for the `color` background type.
pub fn toggle_background_options(state: &mut FormState) -> Vec<FormField> {
    state.color_options_visible = state.background_type.shows_color_options();
    vec![FormField::ColorOptionsVisible]
}

/// Compose picker + alpha into the hidden field, then refresh the swatch.
pub fn update_color(state: &mut FormState) -> Vec<FormField> {
    state.composed = compose(&state.color_picker, state.alpha);
    let mut touched = vec![FormField::Composed];
    touched.extend(update_color_preview(state));
    touched
}

/// Refresh the percent label, then recompose from the same alpha.
pub fn update_alpha(state: &mut FormState) -> Vec<FormField> {
    state.alpha_percent = AlphaPercent::from_alpha(state.alpha);
    let mut touched = vec![FormField::AlphaPercent];
    touched.extend(update_color(state));
    touched
}

/// Pick the swatch style for the current composed value.
pub fn update_color_preview(state: &mut FormState) -> Vec<FormField> {
    state.swatch = SwatchStyle::for_color(&state.composed);
    vec![FormField::Swatch]
}

/// Snap to a preset: fully transparent black, or the given color opaque.
pub fn select_preset_color(state: &mut FormState, preset: &PresetColor) -> Vec<FormField> {
    match preset {
        PresetColor::Transparent => {
            state.color_picker = RgbHex::black();
            state.alpha = 0;
            state.composed = ComposedColor::transparent();
            state.alpha_percent = AlphaPercent::ZERO;
        }
        PresetColor::Opaque(rgb) => {
            state.color_picker = rgb.clone();
            state.alpha = u8::MAX;
            state.composed = ComposedColor::opaque(rgb);
            state.alpha_percent = AlphaPercent::FULL;
        }
    }

    let mut touched = vec![
        FormField::ColorPicker,
        FormField::Alpha,
        FormField::Composed,
        FormField::AlphaPercent,
    ];
    touched.extend(update_color_preview(state));
    touched
}
