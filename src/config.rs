//! Application configuration file
//!
//! `config.json` holds the output directory and any canvas overrides at the
//! top level:
//!
//! ```json
//! { "dest": "/srv/photo-frame", "width": 480, "length": 234 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use photo_dash_core::CanvasConfig;
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory finished images are written to
    #[serde(default = "default_dest")]
    pub dest: PathBuf,
    #[serde(flatten)]
    pub canvas: CanvasConfig,
}

fn default_dest() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dest: default_dest(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read and validate a configuration file.
    ///
    /// A missing or malformed file is an error. Missing canvas dimensions
    /// fall back to the defaults.
    pub fn load(path: &Path) -> DashResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| DashError::io(path, e))?;
        let config = Self::from_json_str(&text).map_err(|e| DashError::json(path, e))?;
        config.canvas.validate()?;
        info!(
            "Loaded {} (canvas {}x{}, dest {})",
            path.display(),
            config.canvas.width,
            config.canvas.height,
            config.dest.display()
        );
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> serde_json::Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(input)?;
        let has_width = raw.get("width").is_some();
        let has_height = raw.get("length").is_some() || raw.get("height").is_some();

        let config: Self = serde_json::from_value(raw)?;
        if !has_width || !has_height {
            warn!(
                "Could not load width or length. Defaulting to {}x{}",
                config.canvas.width, config.canvas.height
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_dash_core::config::{DEFAULT_HEIGHT_PX, DEFAULT_WIDTH_PX, FontFace};

    #[test]
    fn test_flattened_canvas_fields() {
        let config = AppConfig::from_json_str(
            r#"{"dest": "/tmp/frame", "width": 420, "length": 300, "section_font": "6x13"}"#,
        )
        .unwrap();
        assert_eq!(config.dest, PathBuf::from("/tmp/frame"));
        assert_eq!(config.canvas.width, 420);
        assert_eq!(config.canvas.height, 300);
        assert_eq!(config.canvas.section_font, FontFace::Font6x13);
        assert_eq!(config.canvas.spacer, 10);
    }

    #[test]
    fn test_missing_dimensions_default() {
        let config = AppConfig::from_json_str(r#"{"dest": "out"}"#).unwrap();
        assert_eq!(config.canvas.width, DEFAULT_WIDTH_PX);
        assert_eq!(config.canvas.height, DEFAULT_HEIGHT_PX);
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        assert_eq!(AppConfig::from_json_str("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(AppConfig::from_json_str("{\"dest\": ").is_err());
        assert!(AppConfig::from_json_str(r#"{"width": "wide"}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/photo-dash/config.json")).unwrap_err();
        assert!(matches!(err, DashError::Io { .. }));
    }

    #[test]
    fn test_load_validates_canvas() {
        let dir = std::env::temp_dir().join(format!("photo-dash-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, r#"{"width": 0, "length": 234}"#).unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, DashError::Render(_)));

        fs::remove_dir_all(&dir).unwrap();
    }
}
