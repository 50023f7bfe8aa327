//! ARGB color decoding and CLI color parsing.
//!
//! Colors use the framework format `0xAARRGGBB`. The alpha byte never
//! affects what the LEDs show.

use super::Channel;

const RGB_MASK: u32 = 0x00FF_FFFF;
const OPAQUE: u32 = 0xFF00_0000;

/// True if any of the red, green or blue bytes is non-zero.
pub fn is_lit(color: u32) -> bool {
    color & RGB_MASK != 0
}

/// 8-bit channel values extracted from an ARGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl Rgb {
    pub fn from_argb(color: u32) -> Self {
        Rgb {
            red: (color >> 16) & 0xFF,
            green: (color >> 8) & 0xFF,
            blue: color & 0xFF,
        }
    }

    pub fn component(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Number of channels with a non-zero value.
    pub fn lit_count(&self) -> usize {
        [self.red, self.green, self.blue]
            .iter()
            .filter(|&&v| v != 0)
            .count()
    }

    /// More than one channel lit at once; the driver derates brightness.
    pub fn is_mixed(&self) -> bool {
        self.lit_count() > 1
    }
}

/// Parse a color string into `0xAARRGGBB`.
///
/// Accepts:
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`, `"off"`
/// - Hex RGB: `"#FF0000"`, `"ff0000"` (alpha set to `0xFF`)
/// - Hex ARGB: `"0xFF00FF00"` (taken verbatim)
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(0xFFFF_0000),
        "green" => return Ok(0xFF00_FF00),
        "blue" => return Ok(0xFF00_00FF),
        "white" => return Ok(0xFFFF_FFFF),
        "orange" => return Ok(0xFFFF_8000),
        "yellow" => return Ok(0xFFFF_FF00),
        "purple" => return Ok(0xFF80_00FF),
        "cyan" => return Ok(0xFF00_FFFF),
        "off" | "black" => return Ok(0x0000_0000),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.is_empty() || hex.len() > 8 || !is_hex(hex) {
            return Err(crate::LightsError::Color(format!(
                "Invalid color: {s} (use 0xAARRGGBB)"
            )));
        }
        return u32::from_str_radix(hex, 16)
            .map_err(|_| crate::LightsError::Color(format!("Invalid hex color: {s}")));
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !is_hex(hex) {
        return Err(crate::LightsError::Color(format!(
            "Invalid color: {s} (use #RRGGBB, 0xAARRGGBB or a color name)"
        )));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| crate::LightsError::Color(format!("Invalid hex color: {s}")))?;
    Ok(OPAQUE | val)
}

// `from_str_radix` alone would accept a leading sign.
fn is_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Format a color as `#AARRGGBB`.
pub fn format_color(val: u32) -> String {
    format!("#{val:08X}")
}
