//! Primitive draw instructions
//!
//! Sections describe what they want drawn as a flat list of these; only the
//! rasterizer turns them into pixels.

use embedded_graphics::pixelcolor::Rgb888;

/// Which configured font a text instruction uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Header,
    Section,
    Footer,
}

/// Which point of the text's bounding box sits at the instruction position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left corner
    LeftTop,
    /// Middle of the top edge
    CenterTop,
    /// Bottom-right corner
    RightBottom,
}

/// One primitive drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    /// Solid rectangle between two inclusive corners
    FilledRect {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb888,
    },
    /// Straight line segment
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb888,
        /// Stroke width in pixels
        width: u32,
    },
    /// Single line of text
    TextAt {
        x: i32,
        y: i32,
        text: String,
        color: Rgb888,
        font: FontRole,
        anchor: Anchor,
        /// Optional 1px outline drawn underneath the text
        outline: Option<Rgb888>,
    },
}

impl DrawInstruction {
    /// Plain text with no outline.
    pub fn text(
        x: i32,
        y: i32,
        text: impl Into<String>,
        color: Rgb888,
        font: FontRole,
        anchor: Anchor,
    ) -> Self {
        DrawInstruction::TextAt {
            x,
            y,
            text: text.into(),
            color,
            font,
            anchor,
            outline: None,
        }
    }

    pub fn is_filled_rect(&self) -> bool {
        matches!(self, DrawInstruction::FilledRect { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, DrawInstruction::Line { .. })
    }

    /// Text content, when this is a text instruction.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            DrawInstruction::TextAt { text, .. } => Some(text),
            _ => None,
        }
    }
}
