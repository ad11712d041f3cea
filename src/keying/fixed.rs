use super::border::sample_key_color;
use super::types::{Mask, MaskStrategy, SquareImage};

/// Classifies a pixel as foreground when its distance from the key color is
/// strictly greater than a caller-chosen threshold.
///
/// No validation is done on the threshold: a negative value keeps every
/// pixel, a value above the largest possible distance keeps none.
#[derive(Debug, Clone, Copy)]
pub struct FixedThreshold {
    threshold: f64,
}

impl FixedThreshold {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl MaskStrategy for FixedThreshold {
    fn name(&self) -> &'static str {
        "fixed-threshold"
    }

    fn generate(&self, image: &SquareImage) -> Mask {
        let _span = tracing::debug_span!("fixed_threshold", threshold = self.threshold).entered();

        let key = sample_key_color(image);
        Mask::from_fn(image.side(), |row, col| {
            key.distance(image.pixel(row, col)) > self.threshold
        })
    }
}
