//! Renderable dashboard sections
//!
//! A [`Section`] is either a line of text or a gauge. Given the layout
//! context it produces the draw instructions for its slot plus the height it
//! occupies; the layout engine owns the vertical stacking.

mod collision;
mod gauge;
mod text;

pub use collision::{CollisionPlanner, LabelSpan, MarkerPlan, PlacedMarker};
pub use gauge::{GAUGE_VALUE_LINE_WIDTH_PX, Gauge, GaugeBounds};
pub use text::TextSection;

use crate::error::RenderResult;
use crate::instruction::DrawInstruction;
use crate::layout::LayoutContext;

/// Instructions and height produced by laying out one section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub instructions: Vec<DrawInstruction>,
    /// Height of the slot in pixels, excluding the gap to the next section
    pub height: i32,
}

/// One unit of dashboard content
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Text(TextSection),
    Gauge(Gauge),
}

impl Section {
    /// Prepare the section for layout.
    ///
    /// Gauges sort their range in place here; text needs nothing.
    pub fn normalize(&mut self) -> RenderResult<()> {
        match self {
            Section::Text(_) => Ok(()),
            Section::Gauge(gauge) => gauge.normalize().map(|_| ()),
        }
    }

    pub fn layout(&self, ctx: &LayoutContext<'_>) -> RenderResult<SectionLayout> {
        match self {
            Section::Text(text) => Ok(text.layout(ctx)),
            Section::Gauge(gauge) => gauge.layout(ctx),
        }
    }

    /// Short name used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Text(_) => "text",
            Section::Gauge(_) => "gauge",
        }
    }
}
