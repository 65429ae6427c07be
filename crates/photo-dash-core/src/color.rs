//! Color definitions and `#RRGGBB` parsing
//!
//! All drawing happens in 24-bit `Rgb888`, the same depth the encoded JPEG
//! carries, so no channel conversion is needed before encoding.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

// ============================================================================
// Fixed Colors
// ============================================================================

/// Canvas background
pub const BACKGROUND: Rgb888 = Rgb888::BLACK;

/// Header, footer, value label and first gauge marker (`#FFFFFF`)
pub const TEXT_COLOR: Rgb888 = Rgb888::WHITE;

/// Gauge value indicator line and value label outline (`#808080`)
pub const GAUGE_LINE_COLOR: Rgb888 = Rgb888::new(0x80, 0x80, 0x80);

// ============================================================================
// Parsing
// ============================================================================

/// Parse a `#RRGGBB` hex string.
///
/// Returns `None` for anything else (missing `#`, short forms, non-hex digits).
pub fn parse_hex(input: &str) -> Option<Rgb888> {
    let hex = input.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb888::new(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_channels() {
        assert_eq!(parse_hex("#00FF00"), Some(Rgb888::GREEN));
        assert_eq!(parse_hex("#ff0000"), Some(Rgb888::RED));
        assert_eq!(parse_hex("#909090"), Some(Rgb888::new(0x90, 0x90, 0x90)));
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        assert_eq!(parse_hex("00FF00"), None, "missing hash");
        assert_eq!(parse_hex("#0F0"), None, "short form is not accepted");
        assert_eq!(parse_hex("#GG0000"), None);
        assert_eq!(parse_hex("#00FF00FF"), None);
        assert_eq!(parse_hex("#é0000"), None);
    }
}
