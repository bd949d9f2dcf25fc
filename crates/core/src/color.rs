//! Hex color conversion and linear mixing.
//!
//! Colors travel through the deck as six-digit uppercase hex strings without
//! a leading `#` (the form OOXML `srgbClr` expects).

use serde::{Deserialize, Serialize};

pub const WHITE: &str = "FFFFFF";
pub const BLACK: &str = "000000";

/// An RGB triple with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from fractional channels, rounding and clamping each to [0, 255].
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: to_channel(r),
            g: to_channel(g),
            b: to_channel(b),
        }
    }

    /// Uppercase `RRGGBB` without a leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Per-channel linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let lerp = |a: u8, b: u8| f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        Rgb::from_channels(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

fn to_channel(n: f64) -> u8 {
    if n.is_nan() {
        return 0;
    }
    n.round().clamp(0.0, 255.0) as u8
}

/// Strip a leading `#` and uppercase.
pub fn normalize_hex(hex: &str) -> String {
    hex.trim().trim_start_matches('#').to_uppercase()
}

/// Parse `RRGGBB` (optionally `#`-prefixed). Returns `None` unless exactly
/// six hex digits remain.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let h = hex.trim().trim_start_matches('#');
    if h.len() != 6 || !h.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format fractional channels as uppercase hex, rounding and clamping.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::from_channels(r, g, b).to_hex()
}

/// Mix two hex colors. An unparsable operand is replaced by the other one,
/// so the function is total.
pub fn mix(a: &str, b: &str, t: f64) -> String {
    match (hex_to_rgb(a), hex_to_rgb(b)) {
        (Some(a), Some(b)) => a.mix(b, t).to_hex(),
        (Some(only), None) | (None, Some(only)) => {
            log::debug!("mix: ignoring unparsable color in ({a}, {b})");
            only.to_hex()
        }
        (None, None) => BLACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_distance(a: &str, b: &str) -> u8 {
        let a = hex_to_rgb(a).unwrap();
        let b = hex_to_rgb(b).unwrap();
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#F4A900"), Some(Rgb::new(0xF4, 0xA9, 0x00)));
        assert_eq!(hex_to_rgb("c1666b"), Some(Rgb::new(0xC1, 0x66, 0x6B)));
        assert_eq!(hex_to_rgb("12345"), None);
        assert_eq!(hex_to_rgb("GG0000"), None);
    }

    #[test]
    fn test_round_trip_uppercases() {
        for s in ["aabbcc", "#d4b896", "4A403A", "000000", "ffffff"] {
            let rgb = hex_to_rgb(s).unwrap();
            assert_eq!(
                rgb_to_hex(rgb.r.into(), rgb.g.into(), rgb.b.into()),
                normalize_hex(s)
            );
        }
    }

    #[test]
    fn test_rgb_to_hex_clamps_and_rounds() {
        assert_eq!(rgb_to_hex(-20.0, 300.0, 127.5), "00FF80");
        assert_eq!(rgb_to_hex(0.4, 254.6, 15.0), "00FF0F");
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix("D4B896", WHITE, 0.0), "D4B896");
        assert_eq!(mix("D4B896", WHITE, 1.0), "FFFFFF");
        assert!(channel_distance(&mix("4A403A", BLACK, 0.5), "25201D") <= 1);
    }

    #[test]
    fn test_mix_same_color_is_identity() {
        for t in [0.0, 0.12, 0.5, 0.68, 1.0] {
            assert_eq!(mix("C1666B", "C1666B", t), "C1666B");
        }
    }

    #[test]
    fn test_mix_tolerates_bad_operand() {
        assert_eq!(mix("nope", "F4A900", 0.5), "F4A900");
        assert_eq!(mix("F4A900", "", 0.5), "F4A900");
        assert_eq!(mix("x", "y", 0.5), BLACK);
    }
}
