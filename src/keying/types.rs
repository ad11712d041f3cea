use image::{Rgb, RgbImage};
use ndarray::Array2;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyingError {
    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Image is {width}x{height}, expected a square image")]
    NotSquare { width: u32, height: u32 },

    #[error("Image has no pixels")]
    Empty,

    #[error("Image is {actual}x{actual}, expected {expected}x{expected}")]
    SizeMismatch { expected: u32, actual: u32 },

    #[error("Unsupported color type {0:?}, expected 8-bit RGB")]
    ChannelDepth(image::ColorType),
}

/// An RGB image with equal width and height of at least one pixel.
///
/// Every keying stage relies on the side length being known up front, so it
/// travels with the buffer instead of living in a global constant.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareImage {
    pixels: RgbImage,
    side: u32,
}

impl SquareImage {
    pub fn new(pixels: RgbImage) -> Result<Self, KeyingError> {
        let (width, height) = pixels.dimensions();
        if width != height {
            return Err(KeyingError::NotSquare { width, height });
        }
        if width == 0 {
            return Err(KeyingError::Empty);
        }

        Ok(Self {
            pixels,
            side: width,
        })
    }

    /// Build an image by evaluating `f(row, col)` for every pixel
    pub fn from_fn<F>(side: u32, mut f: F) -> Result<Self, KeyingError>
    where
        F: FnMut(u32, u32) -> Rgb<u8>,
    {
        Self::new(RgbImage::from_fn(side, side, |x, y| f(y, x)))
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Pixel at `(row, col)`
    pub fn pixel(&self, row: u32, col: u32) -> &Rgb<u8> {
        self.pixels.get_pixel(col, row)
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Mutable access to the pixels; the dimensions cannot change through it
    pub(crate) fn pixels_mut(&mut self) -> &mut RgbImage {
        &mut self.pixels
    }
}

/// Reference background color sampled from the image border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl KeyColor {
    /// Euclidean distance in RGB space between `pixel` and this key
    pub fn distance(&self, pixel: &Rgb<u8>) -> f64 {
        let dr = pixel[0] as f64 - self.red as f64;
        let dg = pixel[1] as f64 - self.green as f64;
        let db = pixel[2] as f64 - self.blue as f64;

        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Foreground/background classification: `true` keeps the input pixel,
/// `false` takes the background pixel. Indexed by `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// Build a mask by evaluating `f(row, col)` once for every cell
    pub fn from_fn<F>(side: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let n = side as usize;
        let cells = Array2::from_shape_fn((n, n), |(row, col)| f(row as u32, col as u32));
        Self { cells }
    }

    #[cfg(test)]
    pub(crate) fn all(side: u32, value: bool) -> Self {
        Self::from_fn(side, |_, _| value)
    }

    pub fn side(&self) -> u32 {
        self.cells.nrows() as u32
    }

    pub fn get(&self, row: u32, col: u32) -> bool {
        self.cells[[row as usize, col as usize]]
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Render the mask as a black and white image, white marking foreground
    pub fn to_rgb(&self) -> RgbImage {
        let side = self.side();
        RgbImage::from_fn(side, side, |x, y| {
            let value = if self.get(y, x) { 255 } else { 0 };
            Rgb([value, value, value])
        })
    }
}

/// A way of deciding, pixel by pixel, which parts of an image are foreground
pub trait MaskStrategy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Classify every pixel of `image`
    fn generate(&self, image: &SquareImage) -> Mask;
}
