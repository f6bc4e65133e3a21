//! `FormState` is a snapshot of the form's controls plus the values derived
//! from them. It is rebuilt from the page for every event.

use serde::{Deserialize, Serialize};

use crate::color::{AlphaPercent, ComposedColor, RgbHex, compose};

/// Token of the background type that reveals the color options.
pub const COLOR_TOKEN: &str = "color";

/// CSS class of the swatch element.
pub const PREVIEW_CLASS: &str = "color-preview";

/// CSS classes of the swatch when showing the checkerboard.
pub const TRANSPARENT_PREVIEW_CLASS: &str = "color-preview transparent-preview";

/// Value of the background type selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackgroundType {
    /// Replace the removed background with a solid color.
    Color,
    /// Any other option the page offers. Unknown tokens land here too.
    Other(String),
}

impl BackgroundType {
    pub fn from_token(token: &str) -> Self {
        if token == COLOR_TOKEN {
            Self::Color
        } else {
            Self::Other(token.to_string())
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::Color => COLOR_TOKEN,
            Self::Other(token) => token,
        }
    }

    pub fn shows_color_options(&self) -> bool {
        matches!(self, Self::Color)
    }
}

impl From<String> for BackgroundType {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<BackgroundType> for String {
    fn from(ty: BackgroundType) -> Self {
        ty.token().to_string()
    }
}

/// How the color swatch is painted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwatchStyle {
    /// Checkerboard class, no inline background color.
    Transparent,
    /// Normal class, composed value as the inline background color.
    Solid(ComposedColor),
}

impl SwatchStyle {
    pub fn for_color(color: &ComposedColor) -> Self {
        if color.is_transparent() {
            Self::Transparent
        } else {
            Self::Solid(color.clone())
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Transparent => TRANSPARENT_PREVIEW_CLASS,
            Self::Solid(_) => PREVIEW_CLASS,
        }
    }

    /// `None` means the inline background color is cleared.
    pub fn background_color(&self) -> Option<&str> {
        match self {
            Self::Transparent => None,
            Self::Solid(color) => Some(color.as_str()),
        }
    }
}

/// Fields an update function wrote, in the order it wrote them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ColorOptionsVisible,
    ColorPicker,
    Alpha,
    AlphaPercent,
    Composed,
    Swatch,
}

/// Snapshot of the background options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Background type selector value.
    pub background_type: BackgroundType,
    /// Color picker value, `#RRGGBB`.
    pub color_picker: RgbHex,
    /// Alpha slider value.
    pub alpha: u8,
    /// Hidden field submitted with the form, `#RRGGBBAA`.
    pub composed: ComposedColor,
    /// Whether the color options panel is shown.
    pub color_options_visible: bool,
    /// Percent label next to the slider.
    pub alpha_percent: AlphaPercent,
    /// Swatch preview.
    pub swatch: SwatchStyle,
}

impl FormState {
    /// Build a snapshot from control values. Derived fields start consistent
    /// with the inputs; `composed` is taken as-is from the hidden field.
    pub fn new(
        background_type: BackgroundType,
        color_picker: RgbHex,
        alpha: u8,
        composed: ComposedColor,
    ) -> Self {
        Self {
            color_options_visible: background_type.shows_color_options(),
            alpha_percent: AlphaPercent::from_alpha(alpha),
            swatch: SwatchStyle::for_color(&composed),
            background_type,
            color_picker,
            alpha,
            composed,
        }
    }
}

impl Default for FormState {
    /// Markup defaults: no background replacement, opaque white.
    fn default() -> Self {
        let picker = RgbHex::new("#ffffff");
        let composed = compose(&picker, 255);
        Self::new(BackgroundType::from_token("transparent"), picker, 255, composed)
    }
}
