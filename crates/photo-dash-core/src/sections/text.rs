//! Single-line text section

use embedded_graphics::pixelcolor::Rgb888;

use crate::instruction::{Anchor, DrawInstruction, FontRole};
use crate::layout::LayoutContext;

use super::SectionLayout;

/// One line of colored text.
///
/// Strings wider than the drawing band are laid out anyway; the rasterizer
/// clips whatever falls off the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSection {
    pub value: String,
    pub color: Rgb888,
}

impl TextSection {
    pub fn new(value: impl Into<String>, color: Rgb888) -> Self {
        Self {
            value: value.into(),
            color,
        }
    }

    pub fn layout(&self, ctx: &LayoutContext<'_>) -> SectionLayout {
        let config = ctx.config();
        let line_height = ctx.metrics(FontRole::Section).line_height();

        SectionLayout {
            instructions: vec![DrawInstruction::text(
                config.band_left(),
                ctx.y(),
                self.value.clone(),
                self.color,
                FontRole::Section,
                Anchor::LeftTop,
            )],
            height: (line_height + config.line_spacer) as i32,
        }
    }
}
