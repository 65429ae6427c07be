//! Fixed-pitch text metrics
//!
//! Width math assumes every glyph occupies the same cell, which is what the
//! `embedded-graphics` mono fonts guarantee. The per-character width can be
//! recalibrated in configuration when a different cell should be charged.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoFont;

use crate::config::CanvasConfig;
use crate::instruction::FontRole;

/// Maximum length of a formatted numeric label (characters)
pub const MAX_NUMBER_LABEL_LENGTH: usize = 32;

/// Formatted numeric label
pub type NumberLabel = heapless::String<MAX_NUMBER_LABEL_LENGTH>;

/// Width and height answers for one font at one size.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    char_width: u32,
    point_width: u32,
    line_height: u32,
}

impl Metrics {
    /// Metrics read straight from the font's cell size.
    pub fn from_font(font: &MonoFont<'_>) -> Self {
        let pitch = font.character_size.width + font.character_spacing;
        Self {
            char_width: pitch,
            point_width: pitch,
            line_height: font.character_size.height,
        }
    }

    /// Metrics with calibrated overrides for the character and decimal point widths.
    pub fn calibrated(
        font: &MonoFont<'_>,
        char_width: Option<u32>,
        point_width: Option<u32>,
    ) -> Self {
        let base = Self::from_font(font);
        let char_width = char_width.unwrap_or(base.char_width);
        Self {
            char_width,
            point_width: point_width.unwrap_or(char_width),
            line_height: base.line_height,
        }
    }

    pub fn char_width(&self) -> u32 {
        self.char_width
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Pixel width of an arbitrary string.
    pub fn width_of(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.char_width
    }

    /// Pixel width of a numeric label as it will be rendered.
    ///
    /// Digits and the sign cost one character cell each; a decimal point costs
    /// the (possibly narrower) point width.
    pub fn number_width(&self, value: f64) -> u32 {
        let label = format_number(value);
        label
            .chars()
            .map(|c| {
                if c == '.' {
                    self.point_width
                } else {
                    self.char_width
                }
            })
            .sum()
    }
}

/// Fonts and metrics for the three text roles of a canvas.
///
/// Immutable after construction, so one set can back any number of
/// concurrent renders.
#[derive(Clone, Copy)]
pub struct FontSet {
    header: &'static MonoFont<'static>,
    section: &'static MonoFont<'static>,
    footer: &'static MonoFont<'static>,
    section_metrics: Metrics,
}

impl FontSet {
    pub fn from_config(config: &CanvasConfig) -> Self {
        let section = config.section_font.font();
        Self {
            header: config.header_font.font(),
            section,
            footer: config.footer_font.font(),
            section_metrics: Metrics::calibrated(
                section,
                config.section_char_width,
                config.decimal_point_width,
            ),
        }
    }

    pub fn font(&self, role: FontRole) -> &'static MonoFont<'static> {
        match role {
            FontRole::Header => self.header,
            FontRole::Section => self.section,
            FontRole::Footer => self.footer,
        }
    }

    /// Metrics for a role. Only the section role carries calibration overrides.
    pub fn metrics(&self, role: FontRole) -> Metrics {
        match role {
            FontRole::Section => self.section_metrics,
            other => Metrics::from_font(self.font(other)),
        }
    }
}

/// Format a number the way gauge labels display it.
///
/// Integral values print without a fractional part; everything else uses the
/// shortest representation that round-trips. Numbers whose plain decimal form
/// does not fit a label switch to exponent notation (`1e40`, `1.5e-33`).
pub fn format_number(value: f64) -> NumberLabel {
    let mut s = NumberLabel::new();
    let plain = if value.fract() == 0.0 && value.abs() < 1e15 {
        write!(s, "{}", value as i64)
    } else {
        write!(s, "{}", value)
    };

    if plain.is_err() {
        s.clear();
        // At most 24 characters for any finite f64
        let exponent = write!(s, "{:e}", value);
        debug_assert!(exponent.is_ok(), "exponent form of {value} overflowed");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15};

    #[test]
    fn test_from_font() {
        let metrics = Metrics::from_font(&FONT_9X15);
        assert_eq!(metrics.char_width(), 9);
        assert_eq!(metrics.line_height(), 15);
        assert_eq!(metrics.width_of("hello"), 45);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(50.0).as_str(), "50");
        assert_eq!(format_number(-3.0).as_str(), "-3");
        assert_eq!(format_number(42.5).as_str(), "42.5");
        assert_eq!(format_number(10.0001).as_str(), "10.0001");
        assert_eq!(format_number(0.0).as_str(), "0");
    }

    #[test]
    fn test_long_numbers_switch_to_exponent_form() {
        assert_eq!(format_number(1e40).as_str(), "1e40");
        assert_eq!(format_number(-1e40).as_str(), "-1e40");
        assert_eq!(format_number(1.5e-33).as_str(), "1.5e-33");
        assert_eq!(
            format_number(1.2345678901234568e32).as_str(),
            "1.2345678901234568e32"
        );
        for v in [1e40, -1e40, 1.5e-33, 1.2345678901234568e32, -f64::MAX, f64::MIN_POSITIVE] {
            let label = format_number(v);
            assert_eq!(label.parse::<f64>().unwrap(), v, "{label} must read back as {v}");
        }
    }

    #[test]
    fn test_plain_form_kept_while_it_fits() {
        // 32 digits, exactly the label capacity
        assert_eq!(
            format_number(1e31).as_str(),
            "10000000000000000000000000000000"
        );
        assert_eq!(format_number(0.000125).as_str(), "0.000125");
    }

    #[test]
    fn test_exponent_label_width_matches_text() {
        let metrics = Metrics::from_font(&FONT_6X10);
        assert_eq!(metrics.number_width(1e40), 4 * 6);
        assert_eq!(metrics.number_width(-1.5e-33), 8 * 6);
    }

    #[test]
    fn test_number_width_counts_sign_and_digits() {
        let metrics = Metrics::from_font(&FONT_6X10);
        assert_eq!(metrics.number_width(100.0), 18);
        assert_eq!(metrics.number_width(-7.0), 12);
        assert_eq!(metrics.number_width(0.5), 18, "'0.5' is three cells");
    }

    #[test]
    fn test_narrow_decimal_point() {
        let metrics = Metrics::calibrated(&FONT_6X10, Some(10), Some(4));
        assert_eq!(metrics.number_width(12.5), 34);
        assert_eq!(metrics.number_width(125.0), 30);
        assert_eq!(metrics.width_of("abc"), 30);
    }

    #[test]
    fn test_font_set_roles() {
        let config = CanvasConfig {
            section_char_width: Some(10),
            ..CanvasConfig::default()
        };
        let fonts = FontSet::from_config(&config);
        assert_eq!(fonts.metrics(FontRole::Header).line_height(), 20);
        assert_eq!(fonts.metrics(FontRole::Footer).char_width(), 6);
        assert_eq!(fonts.metrics(FontRole::Section).char_width(), 10);
        assert_eq!(
            fonts.font(FontRole::Section).character_size.width,
            9,
            "calibration does not change the glyphs"
        );
    }

    #[test]
    fn test_point_width_follows_calibrated_char_width() {
        let metrics = Metrics::calibrated(&FONT_6X10, Some(8), None);
        assert_eq!(metrics.number_width(1.5), 24);
    }
}
