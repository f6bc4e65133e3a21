//! Hex string newtypes for the picker value and the composed color.

use std::fmt;

use palette::Srgba;
use serde::{Deserialize, Serialize};

use super::parse::parse_color;

/// The fully transparent composed value. Matched by exact string comparison.
pub const TRANSPARENT_HEX: &str = "#00000000";

/// Picker value used by the transparent preset.
pub const BLACK_HEX: &str = "#000000";

/// Alpha suffix appended by the opaque presets. Uppercase, unlike the
/// suffix [`compose`] writes from the slider.
pub const OPAQUE_SUFFIX: &str = "FF";

/// A `#RRGGBB` string as produced by a native color input.
///
/// The value is not validated and its case is preserved: the control that
/// produces it only emits well-formed colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RgbHex(String);

impl RgbHex {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn black() -> Self {
        Self(BLACK_HEX.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RgbHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `#RRGGBBAA` value written to the hidden form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposedColor(String);

impl ComposedColor {
    /// Wrap a value read back from the hidden field.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn transparent() -> Self {
        Self(TRANSPARENT_HEX.to_string())
    }

    /// The value an opaque preset writes: `rgb` followed by `FF`.
    pub fn opaque(rgb: &RgbHex) -> Self {
        Self(format!("{rgb}{OPAQUE_SUFFIX}"))
    }

    /// Exact match against `#00000000`. `#00000000` spelled any other way
    /// (uppercase digits, no `#`) is not considered transparent.
    pub fn is_transparent(&self) -> bool {
        self.0 == TRANSPARENT_HEX
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the composed string into channels, if it is well formed.
    pub fn to_rgba(&self) -> Option<Srgba<u8>> {
        parse_color(&self.0)
    }
}

impl fmt::Display for ComposedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two lowercase hex digits for an alpha value, zero-padded on the left.
pub fn alpha_hex(alpha: u8) -> String {
    format!("{alpha:02x}")
}

/// Concatenate the picker value with the hex-encoded alpha.
///
/// ```text
/// compose("#112233", 15) == "#1122330f"
/// ```
pub fn compose(rgb: &RgbHex, alpha: u8) -> ComposedColor {
    let mut out = String::with_capacity(rgb.0.len() + 2);
    out.push_str(&rgb.0);
    out.push_str(&alpha_hex(alpha));
    ComposedColor(out)
}
