mod file;

pub use file::FileSource;

use crate::keying::SquareImage;
use anyhow::Result;

/// Trait for places an image can be loaded from
pub trait ImageSource {
    /// Decode the full image
    fn load(&mut self) -> Result<SquareImage>;
}
