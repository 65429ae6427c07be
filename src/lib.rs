//! Host side of photo-dash: configuration file loading and image storage.
//!
//! Rendering itself lives in `photo-dash-core`.

pub mod config;
pub mod error;
pub mod storage;

pub use config::AppConfig;
pub use error::{DashError, DashResult};
pub use storage::ImageStore;
