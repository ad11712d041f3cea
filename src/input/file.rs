use super::ImageSource;
use crate::keying::{KeyingError, SquareImage};
use anyhow::{Context, Result};
use image::ColorType;
use std::path::{Path, PathBuf};

/// Decodes an 8-bit RGB image file of a fixed square size
pub struct FileSource {
    path: PathBuf,
    side: u32,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P, side: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            side,
        }
    }

    fn decode(&self) -> Result<SquareImage, KeyingError> {
        let decoded = image::open(&self.path)?;
        if decoded.color() != ColorType::Rgb8 {
            return Err(KeyingError::ChannelDepth(decoded.color()));
        }

        let image = SquareImage::new(decoded.into_rgb8())?;
        if image.side() != self.side {
            return Err(KeyingError::SizeMismatch {
                expected: self.side,
                actual: image.side(),
            });
        }

        Ok(image)
    }
}

impl ImageSource for FileSource {
    fn load(&mut self) -> Result<SquareImage> {
        tracing::info!("Reading {}", self.path.display());

        let image = self
            .decode()
            .with_context(|| format!("Error reading file: {}", self.path.display()))?;

        tracing::debug!("Decoded {}x{} image", image.side(), image.side());
        Ok(image)
    }
}
