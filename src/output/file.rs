use super::OutputSink;
use crate::keying::{KeyingError, SquareImage};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Encodes images to a file, format chosen from the extension
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl OutputSink for FileSink {
    fn write_image(&mut self, image: &SquareImage) -> Result<()> {
        tracing::info!("Writing {}", self.path.display());

        image
            .as_rgb()
            .save(&self.path)
            .map_err(KeyingError::from)
            .with_context(|| format!("Error writing file: {}", self.path.display()))?;

        Ok(())
    }
}
