//! Preset color shortcuts.

use serde::{Deserialize, Serialize};

use super::hex::RgbHex;

/// Token the page sends for the transparent shortcut.
pub const TRANSPARENT_TOKEN: &str = "transparent";

/// A preset either snaps to fully transparent or to an opaque RGB color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetColor {
    Transparent,
    Opaque(RgbHex),
}

impl PresetColor {
    /// Shortcut tokens rendered as swatch buttons, in display order.
    pub const ALL: [&'static str; 6] = [
        TRANSPARENT_TOKEN,
        "#ffffff",
        "#000000",
        "#ff0000",
        "#00ff00",
        "#0000ff",
    ];

    /// Interpret a token from the page. Anything but `transparent` is taken
    /// as an RGB value.
    pub fn from_token(token: &str) -> Self {
        if token == TRANSPARENT_TOKEN {
            Self::Transparent
        } else {
            Self::Opaque(RgbHex::new(token))
        }
    }
}
