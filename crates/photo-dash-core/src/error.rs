//! Error types for rendering operations
//!
//! Configuration failures are fatal and surface once at startup. Every other
//! variant is scoped to a single render call: the canvas and its fonts stay
//! usable for the next request.

use thiserror::Error;

use crate::layout::RenderPhase;

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Error types for rendering operations
#[derive(Debug, Error)]
pub enum RenderError {
    /// Malformed canvas configuration (dimensions, insets, fonts)
    #[error("Invalid canvas configuration: {0}")]
    Configuration(String),

    /// A section in the request cannot be rendered
    #[error("Invalid section {index}: {reason}")]
    InvalidSection {
        /// Position of the section in the request
        index: usize,
        /// Human-readable cause
        reason: String,
    },

    /// A gauge range whose minimum equals its maximum after sorting
    #[error("Degenerate gauge range (min == max == {min})")]
    DegenerateRange {
        /// Lower bound of the range
        min: f64,
        /// Upper bound of the range
        max: f64,
    },

    /// Stacked content does not fit between the header and the footer
    #[error("Content needs {required}px but only {available}px are available")]
    CanvasOverflow {
        /// Height the content would occupy, measured from the top inset
        required: i32,
        /// Height available above the footer, measured from the top inset
        available: i32,
    },

    /// A layout step was attempted in the wrong order
    #[error("Cannot {attempted} while the render is {current:?}")]
    Phase {
        /// Phase the render pass was in
        current: RenderPhase,
        /// Step that was attempted
        attempted: &'static str,
    },

    /// The bitmap could not be encoded
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl RenderError {
    /// Whether this error only affects the request that raised it.
    pub fn is_per_request(&self) -> bool {
        !matches!(self, RenderError::Configuration(_))
    }

    /// Whether this error rejects a section (degenerate ranges included).
    pub fn is_invalid_section(&self) -> bool {
        matches!(
            self,
            RenderError::InvalidSection { .. } | RenderError::DegenerateRange { .. }
        )
    }

    pub(crate) fn invalid_section(index: usize, reason: impl Into<String>) -> Self {
        RenderError::InvalidSection {
            index,
            reason: reason.into(),
        }
    }
}
