//! Gauge label collision planning
//!
//! Marker labels are placed by a single left-to-right sweep over the sorted
//! range. A marker is kept when its left edge does not cross the right edge of
//! the last marker that was kept; skipped markers never move that edge. The
//! value label is then checked against the nearest kept marker on each side.

use log::debug;

use crate::mapper::GaugeScale;
use crate::metrics::{Metrics, NumberLabel, format_number};

/// Horizontal pixel span of one centered label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpan {
    /// Number the label shows
    pub value: f64,
    /// Formatted text
    pub text: NumberLabel,
    /// Anchor x the label is centered on
    pub center: f64,
    /// Left edge in pixels
    pub left: f64,
    /// Right edge in pixels
    pub right: f64,
}

impl LabelSpan {
    fn new(value: f64, scale: &GaugeScale, metrics: &Metrics) -> Self {
        let center = scale.x(value);
        let half_width = f64::from(metrics.number_width(value)) / 2.0;
        Self {
            value,
            text: format_number(value),
            center,
            left: center - half_width,
            right: center + half_width,
        }
    }
}

/// A marker label that survived collision planning
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    /// Index of the marker in the sorted range
    pub index: usize,
    pub span: LabelSpan,
}

/// Outcome of the marker sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerPlan {
    /// Markers whose labels will be drawn, in ascending order
    pub placed: Vec<PlacedMarker>,
    /// Range indices whose labels were omitted
    pub skipped: Vec<usize>,
}

impl MarkerPlan {
    /// Nearest placed label strictly below `value`.
    fn nearest_below(&self, value: f64) -> Option<&LabelSpan> {
        self.placed
            .iter()
            .rev()
            .map(|m| &m.span)
            .find(|span| span.value < value)
    }

    /// Nearest placed label strictly above `value`.
    fn nearest_above(&self, value: f64) -> Option<&LabelSpan> {
        self.placed
            .iter()
            .map(|m| &m.span)
            .find(|span| span.value > value)
    }

    fn contains_value(&self, value: f64) -> bool {
        self.placed.iter().any(|m| m.span.value == value)
    }
}

/// Decides which gauge labels can be drawn without overlapping.
pub struct CollisionPlanner<'a> {
    metrics: &'a Metrics,
    scale: &'a GaugeScale,
}

impl<'a> CollisionPlanner<'a> {
    pub fn new(metrics: &'a Metrics, scale: &'a GaugeScale) -> Self {
        Self { metrics, scale }
    }

    /// Sweep the markers of an ascending range.
    pub fn plan_markers(&self, range: &[f64]) -> MarkerPlan {
        let mut plan = MarkerPlan::default();
        let mut last_right_edge: Option<f64> = None;

        for (index, &marker) in range.iter().enumerate() {
            let span = LabelSpan::new(marker, self.scale, self.metrics);
            let fits = match last_right_edge {
                None => true,
                Some(edge) => span.left >= edge,
            };

            if fits {
                last_right_edge = Some(span.right);
                plan.placed.push(PlacedMarker { index, span });
            } else {
                debug!(
                    "Skipping marker label {} (left edge {:.1} < {:.1})",
                    span.text,
                    span.left,
                    last_right_edge.unwrap_or_default()
                );
                plan.skipped.push(index);
            }
        }

        plan
    }

    /// Span for the value label, or `None` when it would collide with a
    /// placed marker label.
    pub fn plan_value(&self, plan: &MarkerPlan, value: f64) -> Option<LabelSpan> {
        let span = LabelSpan::new(value, self.scale, self.metrics);

        if plan.contains_value(value) {
            debug!("Omitting value label {}: a marker shows it", span.text);
            return None;
        }

        if let Some(below) = plan.nearest_below(value)
            && span.left < below.right
        {
            debug!(
                "Omitting value label {}: collides with marker {}",
                span.text, below.text
            );
            return None;
        }

        if let Some(above) = plan.nearest_above(value)
            && span.right > above.left
        {
            debug!(
                "Omitting value label {}: collides with marker {}",
                span.text, above.text
            );
            return None;
        }

        Some(span)
    }
}
