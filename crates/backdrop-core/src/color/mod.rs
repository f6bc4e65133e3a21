//! Color values handled by the form: the picker RGB, its alpha and the composed
//! `#RRGGBBAA` string submitted with the upload.

pub mod alpha;
pub mod hex;
pub mod parse;
pub mod preset;

pub use alpha::{AlphaPercent, parse_alpha};
pub use hex::{ComposedColor, RgbHex, alpha_hex, compose};
pub use parse::{color_to_hex, describe_color, parse_color};
pub use preset::PresetColor;
