mod file;

pub use file::FileSink;

use crate::keying::SquareImage;
use anyhow::Result;

/// Trait for output destinations
pub trait OutputSink {
    /// Write an image to the output
    fn write_image(&mut self, image: &SquareImage) -> Result<()>;
}
