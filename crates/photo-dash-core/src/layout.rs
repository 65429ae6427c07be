//! Layout engine: stacks header, sections and footer onto one canvas.
//!
//! A render pass walks a strict sequence of phases:
//!
//! ```text
//! Empty -> HeaderPlaced -> (SectionPlaced)* -> FooterPlaced -> Rasterized
//! ```
//!
//! [`LayoutContext`] carries the per-pass state (y cursor, accumulated
//! instructions, phase) and is handed to each section as it is laid out.
//! [`Canvas`] only holds configuration and fonts, so one canvas can serve
//! concurrent renders; every render gets its own context.
//!
//! Content that would run into the footer rejects the whole render with
//! [`RenderError::CanvasOverflow`]; nothing is truncated.

use log::{debug, info};

use crate::clock::Clock;
use crate::color::TEXT_COLOR;
use crate::config::CanvasConfig;
use crate::error::{RenderError, RenderResult};
use crate::framebuffer::FrameBuffer;
use crate::instruction::{Anchor, DrawInstruction, FontRole};
use crate::mapper::Band;
use crate::metrics::{FontSet, Metrics};
use crate::raster::paint_all;
use crate::request::DashboardRequest;
use crate::sections::Section;

/// Prefix of the footer timestamp line
pub const FOOTER_PREFIX: &str = "Generated at: ";

/// Phase of a single render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Empty,
    HeaderPlaced,
    SectionPlaced,
    FooterPlaced,
    Rasterized,
}

/// Per-render layout state
pub struct LayoutContext<'a> {
    config: &'a CanvasConfig,
    fonts: &'a FontSet,
    y_cursor: i32,
    phase: RenderPhase,
    instructions: Vec<DrawInstruction>,
}

impl<'a> LayoutContext<'a> {
    /// Start a render pass. `config` must already be validated, which
    /// [`Canvas::new`] guarantees.
    pub(crate) fn new(config: &'a CanvasConfig, fonts: &'a FontSet) -> Self {
        Self {
            config,
            fonts,
            y_cursor: config.v_spacer as i32,
            phase: RenderPhase::Empty,
            instructions: Vec::new(),
        }
    }

    /// Context positioned at an arbitrary y, for laying out single sections.
    #[cfg(test)]
    pub(crate) fn at(config: &'a CanvasConfig, fonts: &'a FontSet, y: i32) -> Self {
        Self {
            y_cursor: y,
            ..Self::new(config, fonts)
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        self.config
    }

    pub fn metrics(&self, role: FontRole) -> Metrics {
        self.fonts.metrics(role)
    }

    /// Current top y for the next placed element.
    pub fn y(&self) -> i32 {
        self.y_cursor
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<DrawInstruction> {
        self.instructions
    }

    /// Horizontal band gauges map their range onto.
    pub fn gauge_band(&self) -> Band {
        Band::new(
            f64::from(self.config.band_left()),
            f64::from(self.config.band_right()),
        )
    }

    /// Top edge of the footer line; stacked content must end above it.
    pub fn content_limit(&self) -> i32 {
        self.config.band_bottom() - self.fonts.metrics(FontRole::Footer).line_height() as i32
    }

    fn expect_phase(&self, allowed: &[RenderPhase], attempted: &'static str) -> RenderResult<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RenderError::Phase {
                current: self.phase,
                attempted,
            })
        }
    }

    fn check_fits(&self, height: i32) -> RenderResult<()> {
        let bottom = self.y_cursor + height;
        let limit = self.content_limit();
        if bottom > limit {
            let top = self.config.v_spacer as i32;
            return Err(RenderError::CanvasOverflow {
                required: bottom - top,
                available: limit - top,
            });
        }
        Ok(())
    }

    pub fn place_header(&mut self, title: &str) -> RenderResult<()> {
        self.expect_phase(&[RenderPhase::Empty], "place the header")?;

        let height = self.metrics(FontRole::Header).line_height() as i32;
        self.check_fits(height)?;

        self.instructions.push(DrawInstruction::text(
            self.config.band_left(),
            self.y_cursor,
            title,
            TEXT_COLOR,
            FontRole::Header,
            Anchor::LeftTop,
        ));
        self.y_cursor += height + self.config.spacer as i32;
        self.phase = RenderPhase::HeaderPlaced;
        Ok(())
    }

    /// Normalize, lay out and append one section below the previous one.
    ///
    /// On failure nothing is appended and the cursor does not move.
    pub fn place_section(&mut self, section: &mut Section) -> RenderResult<()> {
        self.expect_phase(
            &[RenderPhase::HeaderPlaced, RenderPhase::SectionPlaced],
            "place a section",
        )?;

        section.normalize()?;
        let layout = section.layout(self)?;
        self.check_fits(layout.height)?;

        debug!(
            "Placed {} section at y={} (height {})",
            section.kind(),
            self.y_cursor,
            layout.height
        );
        self.instructions.extend(layout.instructions);
        self.y_cursor += layout.height + self.config.spacer as i32;
        self.phase = RenderPhase::SectionPlaced;
        Ok(())
    }

    pub fn place_footer(&mut self, timestamp: &str) -> RenderResult<()> {
        self.expect_phase(
            &[RenderPhase::HeaderPlaced, RenderPhase::SectionPlaced],
            "place the footer",
        )?;

        self.instructions.push(DrawInstruction::text(
            self.config.band_right(),
            self.config.band_bottom(),
            format!("{FOOTER_PREFIX}{timestamp}"),
            TEXT_COLOR,
            FontRole::Footer,
            Anchor::RightBottom,
        ));
        self.phase = RenderPhase::FooterPlaced;
        Ok(())
    }

    /// Paint every accumulated instruction onto a fresh framebuffer.
    pub fn rasterize(&mut self) -> RenderResult<FrameBuffer> {
        self.expect_phase(&[RenderPhase::FooterPlaced], "rasterize")?;

        let mut buffer = FrameBuffer::new(self.config.width, self.config.height);
        paint_all(&mut buffer, &self.instructions, self.fonts).unwrap_or_else(|never| match never {});
        self.phase = RenderPhase::Rasterized;
        Ok(buffer)
    }
}

/// Result of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub bitmap: FrameBuffer,
    pub instructions: Vec<DrawInstruction>,
}

/// Canvas configuration plus loaded fonts, shared read-only across renders.
#[derive(Clone)]
pub struct Canvas {
    config: CanvasConfig,
    fonts: FontSet,
}

impl Canvas {
    /// Validate the configuration and load its fonts.
    pub fn new(config: CanvasConfig) -> RenderResult<Self> {
        config.validate()?;
        let fonts = FontSet::from_config(&config);
        info!(
            "Canvas {}x{} ready ({:?} / {:?} / {:?})",
            config.width, config.height, config.header_font, config.section_font, config.footer_font
        );
        Ok(Self { config, fonts })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Render a title and sections into a bitmap.
    ///
    /// Gauge ranges in `sections` are sorted in place.
    pub fn render(
        &self,
        title: &str,
        sections: &mut [Section],
        clock: &dyn Clock,
    ) -> RenderResult<RenderOutput> {
        let mut ctx = LayoutContext::new(&self.config, &self.fonts);

        ctx.place_header(title)?;
        for (index, section) in sections.iter_mut().enumerate() {
            ctx.place_section(section).map_err(|e| match e {
                RenderError::InvalidSection { reason, .. } => {
                    RenderError::InvalidSection { index, reason }
                }
                other => other,
            })?;
        }
        ctx.place_footer(&clock.timestamp())?;

        let bitmap = ctx.rasterize()?;
        info!(
            "Rendered \"{}\" with {} sections ({} instructions)",
            title,
            sections.len(),
            ctx.instructions().len()
        );

        Ok(RenderOutput {
            bitmap,
            instructions: ctx.into_instructions(),
        })
    }

    /// Convert a request into sections and render it.
    pub fn render_request(
        &self,
        request: DashboardRequest,
        clock: &dyn Clock,
    ) -> RenderResult<RenderOutput> {
        let title = request.title.clone();
        let mut sections = request.into_sections()?;
        self.render(&title, &mut sections, clock)
    }
}
