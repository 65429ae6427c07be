//! Layout and rendering core for photo-dash
//!
//! This crate turns a dashboard request (a title plus an ordered list of
//! text and gauge sections) into a fixed-size bitmap: sections are laid out
//! as primitive draw instructions, stacked top to bottom, stamped with a
//! footer timestamp and rasterized through `embedded-graphics` into an RGB
//! framebuffer that encodes to JPEG.
//!
//! It holds no I/O beyond image encoding; reading requests and storing the
//! finished images belongs to the host binary.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod instruction;
pub mod layout;
pub mod mapper;
pub mod metrics;
pub mod raster;
pub mod request;
pub mod sections;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CanvasConfig;
pub use error::{RenderError, RenderResult};
pub use framebuffer::{FrameBuffer, JPEG_QUALITY};
pub use layout::{Canvas, LayoutContext, RenderOutput, RenderPhase};
pub use request::DashboardRequest;
pub use sections::Section;
