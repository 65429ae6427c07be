//! Image store: one JPEG per producing module

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use photo_dash_core::{FrameBuffer, JPEG_QUALITY};

use crate::error::{DashError, DashResult};

/// Writes rendered dashboards to `<dest>/<module>.jpg`.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dest: PathBuf,
}

impl ImageStore {
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self { dest: dest.into() }
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Path of the image for `module`.
    ///
    /// Module names end up as file names, so path separators and
    /// relative components are rejected.
    pub fn path_for(&self, module: &str) -> DashResult<PathBuf> {
        let invalid = module.is_empty()
            || module == "."
            || module == ".."
            || module.contains(['/', '\\', '\0']);
        if invalid {
            return Err(DashError::InvalidModule(module.to_owned()));
        }
        Ok(self.dest.join(format!("{module}.jpg")))
    }

    /// Encode and write the bitmap, replacing any previous image.
    pub fn save(&self, module: &str, bitmap: &FrameBuffer) -> DashResult<PathBuf> {
        let path = self.path_for(module)?;
        let bytes = bitmap.encode_jpeg(JPEG_QUALITY)?;

        fs::create_dir_all(&self.dest).map_err(|e| DashError::io(&self.dest, e))?;
        fs::write(&path, &bytes).map_err(|e| DashError::io(&path, e))?;

        info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Remove the image for `module`.
    pub fn delete(&self, module: &str) -> DashResult<()> {
        let path = self.path_for(module)?;
        fs::remove_file(&path).map_err(|e| DashError::io(&path, e))?;
        info!("Deleted {}", path.display());
        Ok(())
    }
}
