//! Value-to-pixel coordinate mapping
//!
//! Gauge partition boundaries, marker labels and the value indicator all go
//! through the same linear transform, so they line up exactly.

use log::debug;

use crate::error::{RenderError, RenderResult};

/// Horizontal pixel band a domain is mapped onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Pixel x of the domain minimum
    pub start: f64,
    /// Pixel x of the domain maximum
    pub end: f64,
}

impl Band {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Linearly interpolate `value` from `[domain_min, domain_max]` onto
/// `[band_start, band_end]`.
///
/// Values outside the domain are not clamped and land outside the band.
pub fn map(
    value: f64,
    domain_min: f64,
    domain_max: f64,
    band_start: f64,
    band_end: f64,
) -> RenderResult<f64> {
    if domain_min == domain_max {
        return Err(RenderError::DegenerateRange {
            min: domain_min,
            max: domain_max,
        });
    }
    Ok(lerp(value, domain_min, domain_max, band_start, band_end))
}

fn lerp(value: f64, domain_min: f64, domain_max: f64, band_start: f64, band_end: f64) -> f64 {
    band_start + (value - domain_min) / (domain_max - domain_min) * (band_end - band_start)
}

/// Round a mapped coordinate to the nearest pixel.
pub fn to_pixel(x: f64) -> i32 {
    x.round() as i32
}

/// A validated domain bound to a band, for repeated mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeScale {
    min: f64,
    max: f64,
    band: Band,
}

impl GaugeScale {
    /// Fails with [`RenderError::DegenerateRange`] when `min == max`.
    pub fn new(min: f64, max: f64, band: Band) -> RenderResult<Self> {
        if min == max {
            return Err(RenderError::DegenerateRange { min, max });
        }
        debug!(
            "Gauge scale [{}, {}] -> [{}, {}]px",
            min, max, band.start, band.end
        );
        Ok(Self { min, max, band })
    }

    /// Pixel x for a value; see [`map`].
    pub fn x(&self, value: f64) -> f64 {
        lerp(value, self.min, self.max, self.band.start, self.band.end)
    }

    pub fn band(&self) -> Band {
        self.band
    }
}
