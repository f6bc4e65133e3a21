//! Lenient hex parsing and human-readable descriptions.
//!
//! Used to interpret the composed value the form submits and to describe it
//! in logs. Composition itself never goes through here.

use palette::{Srgb, Srgba};

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
///
/// Six-digit forms are fully opaque. Returns `None` for anything else.
pub fn parse_color(input: &str) -> Option<Srgba<u8>> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    let alpha = if expanded.len() == 8 { channel(6)? } else { 255 };
    Some(Srgba::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Channels that can be written as a hex string.
pub trait HexChannels {
    fn hex_channels(&self) -> Vec<u8>;
}

impl HexChannels for Srgb<u8> {
    fn hex_channels(&self) -> Vec<u8> {
        vec![self.red, self.green, self.blue]
    }
}

impl HexChannels for Srgba<u8> {
    fn hex_channels(&self) -> Vec<u8> {
        vec![self.red, self.green, self.blue, self.alpha]
    }
}

/// Lowercase `#rrggbb` for RGB colors, `#rrggbbaa` for RGBA colors.
pub fn color_to_hex(color: &impl HexChannels) -> String {
    let channels = color.hex_channels();
    let mut out = String::with_capacity(1 + channels.len() * 2);
    out.push('#');
    for c in channels {
        out.push_str(&format!("{c:02x}"));
    }
    out
}

/// Readable description of a background color.
///
/// `None` and near-zero opacity are both "transparent".
pub fn describe_color(color: Option<Srgba<u8>>) -> String {
    let Some(color) = color else {
        return "transparent".to_string();
    };

    let opacity = color.alpha as f32 / 255.0;
    if opacity < 0.01 {
        "transparent".to_string()
    } else if color.alpha < 255 {
        format!(
            "RGB({}, {}, {}), opacity: {:.2}",
            color.red, color.green, color.blue, opacity
        )
    } else {
        format!("RGB({}, {}, {})", color.red, color.green, color.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels(c: Srgba<u8>) -> (u8, u8, u8, u8) {
        (c.red, c.green, c.blue, c.alpha)
    }

    #[test]
    fn test_parse_long_forms() {
        assert_eq!(channels(parse_color("#FF0000").unwrap()), (255, 0, 0, 255));
        assert_eq!(channels(parse_color("ff000080").unwrap()), (255, 0, 0, 128));
    }

    #[test]
    fn test_parse_short_forms_expand_digits() {
        assert_eq!(channels(parse_color("#f0a").unwrap()), (0xff, 0x00, 0xaa, 255));
        assert_eq!(channels(parse_color("#f0a8").unwrap()), (0xff, 0x00, 0xaa, 0x88));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_color("").is_none());
        assert!(parse_color("#").is_none());
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("#gg0000").is_none());
        assert!(parse_color("#ff0000ff00").is_none());
        assert!(parse_color("#é00").is_none());
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(color_to_hex(&Srgb::new(255u8, 0, 16)), "#ff0010");
        assert_eq!(color_to_hex(&Srgba::new(255u8, 0, 16, 0)), "#ff001000");
    }

    #[test]
    fn test_describe_color() {
        assert_eq!(describe_color(None), "transparent");
        assert_eq!(describe_color(Some(Srgba::new(1, 2, 3, 0))), "transparent");
        assert_eq!(
            describe_color(Some(Srgba::new(255, 0, 0, 128))),
            "RGB(255, 0, 0), opacity: 0.50"
        );
        assert_eq!(describe_color(Some(Srgba::new(10, 20, 30, 255))), "RGB(10, 20, 30)");
    }
}
