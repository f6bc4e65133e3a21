//! Alpha slider parsing and the percent label derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Opacity as a whole percentage, shown next to the alpha slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlphaPercent(u8);

impl AlphaPercent {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Round `alpha / 255 × 100` to the nearest integer, halves up.
    ///
    /// Computed in integers so there is no float drift. A half can never
    /// occur: `200 × alpha` is even while `255 × (2n + 1)` is odd.
    pub const fn from_alpha(alpha: u8) -> Self {
        let scaled = alpha as u32 * 100;
        Self(((scaled + 127) / 255) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Label text, e.g. `"50%"`.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AlphaPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Parse the range control's text value.
///
/// Values outside 0..=255 are reported, not clamped.
pub fn parse_alpha(raw: &str) -> Result<u8, FormError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| FormError::InvalidAlpha(raw.to_string()))?;
    u8::try_from(value).map_err(|_| FormError::AlphaOutOfRange(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_boundaries() {
        assert_eq!(AlphaPercent::from_alpha(0).value(), 0);
        assert_eq!(AlphaPercent::from_alpha(1).value(), 0);
        assert_eq!(AlphaPercent::from_alpha(2).value(), 1);
        assert_eq!(AlphaPercent::from_alpha(127).value(), 50);
        assert_eq!(AlphaPercent::from_alpha(128).value(), 50);
        assert_eq!(AlphaPercent::from_alpha(254).value(), 100);
        assert_eq!(AlphaPercent::from_alpha(255).value(), 100);
    }

    #[test]
    fn test_percent_matches_float_rounding_everywhere() {
        for alpha in 0..=255u8 {
            let expected = (alpha as f64 / 255.0 * 100.0).round() as u8;
            assert_eq!(AlphaPercent::from_alpha(alpha).value(), expected, "alpha {alpha}");
        }
    }

    #[test]
    fn test_label_format() {
        assert_eq!(AlphaPercent::from_alpha(128).label(), "50%");
        assert_eq!(AlphaPercent::ZERO.label(), "0%");
        assert_eq!(AlphaPercent::FULL.label(), "100%");
    }

    #[test]
    fn test_parse_alpha() {
        assert_eq!(parse_alpha("0"), Ok(0));
        assert_eq!(parse_alpha(" 200 "), Ok(200));
        assert_eq!(parse_alpha("255"), Ok(255));
        assert_eq!(parse_alpha("256"), Err(FormError::AlphaOutOfRange(256)));
        assert_eq!(parse_alpha("-1"), Err(FormError::AlphaOutOfRange(-1)));
        assert_eq!(parse_alpha("half"), Err(FormError::InvalidAlpha("half".into())));
    }
}
