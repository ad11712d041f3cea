//! Chroma keying for square RGB images.
//!
//! A key color is sampled from the left column and top row of the input,
//! every pixel is classified as foreground or background by its distance
//! from that color, and background pixels are swapped for the pixels of a
//! second image.
//!
//! Two [`keying::MaskStrategy`] implementations are provided:
//! [`keying::FixedThreshold`] cuts at a caller-supplied distance and
//! [`keying::AutoThreshold`] derives the cut from the image itself.

pub mod composite;
pub mod input;
pub mod keying;
pub mod output;
