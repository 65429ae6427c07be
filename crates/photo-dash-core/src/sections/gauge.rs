//! Gauge section: colored partition bar with marker labels and a value indicator
//!
//! A gauge fills one section slot with two rows. The top row carries the
//! numeric marker labels and the value label; the bottom row is the bar,
//! one filled rectangle per partition, crossed by the value indicator line.
//!
//! ```text
//!  0        42      50                 100     <- marker row
//!  [========|=======][====================]    <- bar
//! ```

use embedded_graphics::pixelcolor::Rgb888;
use log::warn;

use crate::color::{GAUGE_LINE_COLOR, TEXT_COLOR};
use crate::error::{RenderError, RenderResult};
use crate::instruction::{Anchor, DrawInstruction, FontRole};
use crate::layout::LayoutContext;
use crate::mapper::{GaugeScale, to_pixel};

use super::SectionLayout;
use super::collision::CollisionPlanner;

/// Stroke width of the value indicator line in pixels
pub const GAUGE_VALUE_LINE_WIDTH_PX: u32 = 5;

/// A horizontal gauge.
///
/// `colors[i]` fills the partition between `range[i]` and `range[i + 1]`,
/// so `colors.len() == range.len() - 1` always holds for gauges built from a
/// validated request.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub range: Vec<f64>,
    pub colors: Vec<Rgb888>,
    pub value: f64,
}

impl Gauge {
    pub fn new(range: Vec<f64>, colors: Vec<Rgb888>, value: f64) -> Self {
        Self {
            range,
            colors,
            value,
        }
    }

    /// Sort `range` ascending in place and return its bounds.
    ///
    /// The colors are left untouched: if the caller's order encoded which color
    /// belongs to which partition, that pairing changes here. Sorting an
    /// already sorted range is a no-op.
    pub fn normalize(&mut self) -> RenderResult<GaugeBounds> {
        if !self.range.is_sorted() {
            warn!("Gauge range was unsorted: {:?}", self.range);
            self.range.sort_by(f64::total_cmp);
        }
        self.bounds()
    }

    fn bounds(&self) -> RenderResult<GaugeBounds> {
        let (Some(&min), Some(&max)) = (self.range.first(), self.range.last()) else {
            return Err(RenderError::invalid_section(0, "gauge range is empty"));
        };
        if min == max {
            return Err(RenderError::DegenerateRange { min, max });
        }
        Ok(GaugeBounds { min, max })
    }

    /// Color of the label drawn for marker `index`.
    ///
    /// The minimum marker uses the plain text color, every other marker takes
    /// the color of the partition it closes.
    fn marker_color(&self, index: usize) -> Rgb888 {
        index
            .checked_sub(1)
            .and_then(|i| self.colors.get(i).copied())
            .unwrap_or(TEXT_COLOR)
    }

    /// Lay out a normalized gauge at the context's current y.
    pub fn layout(&self, ctx: &LayoutContext<'_>) -> RenderResult<SectionLayout> {
        let bounds = self.bounds()?;
        let config = ctx.config();
        let metrics = ctx.metrics(FontRole::Section);
        let scale = GaugeScale::new(bounds.min, bounds.max, ctx.gauge_band())?;

        let line_height = metrics.line_height() as i32;
        let label_y = ctx.y();
        let bar_top = label_y + line_height + config.gauge_gap as i32;
        let bar_bottom = bar_top + line_height - 1;

        let mut instructions = Vec::with_capacity(self.range.len() * 2 + 2);

        // Partition bar: always complete, independent of label collisions
        for (edges, color) in self.range.windows(2).zip(&self.colors) {
            instructions.push(DrawInstruction::FilledRect {
                x0: to_pixel(scale.x(edges[0])),
                y0: bar_top,
                x1: to_pixel(scale.x(edges[1])),
                y1: bar_bottom,
                color: *color,
            });
        }

        let planner = CollisionPlanner::new(&metrics, &scale);
        let plan = planner.plan_markers(&self.range);

        for marker in &plan.placed {
            instructions.push(DrawInstruction::text(
                to_pixel(marker.span.center),
                label_y,
                marker.span.text.as_str(),
                self.marker_color(marker.index),
                FontRole::Section,
                Anchor::CenterTop,
            ));
        }

        let value_x = to_pixel(scale.x(self.value));

        if let Some(span) = planner.plan_value(&plan, self.value) {
            instructions.push(DrawInstruction::TextAt {
                x: value_x,
                y: label_y,
                text: span.text.as_str().into(),
                color: TEXT_COLOR,
                font: FontRole::Section,
                anchor: Anchor::CenterTop,
                outline: Some(GAUGE_LINE_COLOR),
            });
        }

        instructions.push(DrawInstruction::Line {
            x0: value_x,
            y0: bar_top,
            x1: value_x,
            y1: bar_bottom,
            color: GAUGE_LINE_COLOR,
            width: GAUGE_VALUE_LINE_WIDTH_PX,
        });

        Ok(SectionLayout {
            instructions,
            height: bar_bottom + 1 - label_y,
        })
    }
}

/// Bounds of a normalized gauge range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeBounds {
    pub min: f64,
    pub max: f64,
}
