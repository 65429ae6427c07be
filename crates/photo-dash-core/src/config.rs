//! Canvas configuration
//!
//! Dimensions, insets, spacing and font selection for one output image.
//! Every field has a default so a configuration file only needs to name the
//! values it changes.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{
    FONT_5X8, FONT_6X10, FONT_6X13, FONT_7X14, FONT_8X13, FONT_9X15, FONT_9X18, FONT_10X20,
};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Default canvas width in pixels
pub const DEFAULT_WIDTH_PX: u32 = 480;

/// Default canvas height in pixels
pub const DEFAULT_HEIGHT_PX: u32 = 234;

/// Fixed-pitch fonts available for the three text roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFace {
    #[serde(rename = "5x8")]
    Font5x8,
    #[serde(rename = "6x10")]
    Font6x10,
    #[serde(rename = "6x13")]
    Font6x13,
    #[serde(rename = "7x14")]
    Font7x14,
    #[serde(rename = "8x13")]
    Font8x13,
    #[serde(rename = "9x15")]
    Font9x15,
    #[serde(rename = "9x18")]
    Font9x18,
    #[serde(rename = "10x20")]
    Font10x20,
}

impl FontFace {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            FontFace::Font5x8 => &FONT_5X8,
            FontFace::Font6x10 => &FONT_6X10,
            FontFace::Font6x13 => &FONT_6X13,
            FontFace::Font7x14 => &FONT_7X14,
            FontFace::Font8x13 => &FONT_8X13,
            FontFace::Font9x15 => &FONT_9X15,
            FontFace::Font9x18 => &FONT_9X18,
            FontFace::Font10x20 => &FONT_10X20,
        }
    }
}

/// Canvas configuration
///
/// The usable drawing band is `[h_spacer, width - h_spacer]` horizontally and
/// `[v_spacer, height - v_spacer]` vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    #[serde(alias = "length")]
    pub height: u32,
    /// Horizontal inset from the left and right edges
    pub h_spacer: u32,
    /// Vertical inset from the top and bottom edges
    pub v_spacer: u32,
    /// Vertical gap after the header and after every section
    pub spacer: u32,
    /// Extra space below a text line, inside the text section
    pub line_spacer: u32,
    /// Gap between a gauge's marker row and its bar
    pub gauge_gap: u32,
    /// Font for the title
    pub header_font: FontFace,
    /// Font for text sections and gauge labels
    pub section_font: FontFace,
    /// Font for the timestamp footer
    pub footer_font: FontFace,
    /// Calibrated per-character width of the section font; `None` reads it
    /// from the font itself
    pub section_char_width: Option<u32>,
    /// Width charged for a decimal point in numeric labels; `None` charges a
    /// full character cell
    pub decimal_point_width: Option<u32>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH_PX,
            height: DEFAULT_HEIGHT_PX,
            h_spacer: 5,
            v_spacer: 5,
            spacer: 10,
            line_spacer: 2,
            gauge_gap: 5,
            header_font: FontFace::Font10x20,
            section_font: FontFace::Font9x15,
            footer_font: FontFace::Font6x10,
            section_char_width: None,
            decimal_point_width: None,
        }
    }
}

impl CanvasConfig {
    /// Parse a configuration from JSON, defaulting missing fields.
    pub fn from_json_str(input: &str) -> RenderResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| RenderError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check dimensions and insets leave a non-empty drawing band.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::Configuration(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.h_spacer.saturating_mul(2) >= self.width {
            return Err(RenderError::Configuration(format!(
                "horizontal inset {} leaves no drawing band in width {}",
                self.h_spacer, self.width
            )));
        }
        if self.v_spacer.saturating_mul(2) >= self.height {
            return Err(RenderError::Configuration(format!(
                "vertical inset {} leaves no drawing band in height {}",
                self.v_spacer, self.height
            )));
        }
        if self.section_char_width == Some(0) {
            return Err(RenderError::Configuration(
                "section_char_width must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Left edge of the usable band
    pub fn band_left(&self) -> i32 {
        self.h_spacer as i32
    }

    /// Right edge of the usable band
    pub fn band_right(&self) -> i32 {
        self.width.saturating_sub(self.h_spacer) as i32
    }

    /// Bottom edge of the usable band
    pub fn band_bottom(&self) -> i32 {
        self.height.saturating_sub(self.v_spacer) as i32
    }
}
