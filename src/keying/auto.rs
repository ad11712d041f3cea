use super::border::sample_key_color;
use super::types::{KeyColor, Mask, MaskStrategy, SquareImage};

/// Starting value of the boundary search. No 8-bit RGB distance reaches it
/// (the largest is about 441.7), so it survives only when no pixel lies
/// above the mean distance.
///
/// Empirical heuristic, not derived from image statistics.
pub const SENTINEL_THRESHOLD: f64 = 512.0;

/// Factor applied to the discovered boundary. Tuned by hand against a
/// reference image where the unscaled boundary let too much background
/// through; not expected to be optimal in general.
pub const THRESHOLD_SCALE: f64 = 1.2;

/// Intermediate values of the automatic threshold derivation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEstimate {
    pub key: KeyColor,
    /// Mean key distance over every pixel
    pub mean_distance: f64,
    /// Smallest pixel distance above the mean, or the sentinel if none
    pub boundary: f64,
    /// `boundary * THRESHOLD_SCALE`, the value the mask is cut at
    pub threshold: f64,
}

/// Derives its own threshold from the distribution of key distances.
///
/// The boundary between background and foreground is taken to be the
/// closest pixel distance above the mean distance, scaled by
/// [`THRESHOLD_SCALE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoThreshold;

impl AutoThreshold {
    pub fn new() -> Self {
        Self
    }

    pub fn derive(&self, image: &SquareImage) -> ThresholdEstimate {
        let key = sample_key_color(image);

        let count = image.side() as f64 * image.side() as f64;
        let mean_distance = distances(image, key).sum::<f64>() / count;

        let mut boundary = SENTINEL_THRESHOLD;
        for distance in distances(image, key) {
            if distance > mean_distance && distance < boundary {
                boundary = distance;
            }
        }

        if boundary == SENTINEL_THRESHOLD {
            tracing::debug!("No pixel above mean distance {:.3}, keeping sentinel", mean_distance);
        }

        ThresholdEstimate {
            key,
            mean_distance,
            boundary,
            threshold: boundary * THRESHOLD_SCALE,
        }
    }
}

fn distances(image: &SquareImage, key: KeyColor) -> impl Iterator<Item = f64> + '_ {
    image.as_rgb().pixels().map(move |pixel| key.distance(pixel))
}

impl MaskStrategy for AutoThreshold {
    fn name(&self) -> &'static str {
        "auto-threshold"
    }

    fn generate(&self, image: &SquareImage) -> Mask {
        let _span = tracing::debug_span!("auto_threshold").entered();

        let estimate = self.derive(image);
        tracing::info!(
            "Derived threshold {:.3} (mean distance {:.3}, boundary {:.3})",
            estimate.threshold,
            estimate.mean_distance,
            estimate.boundary
        );

        let key = estimate.key;
        Mask::from_fn(image.side(), |row, col| {
            key.distance(image.pixel(row, col)) > estimate.threshold
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keying::FixedThreshold;
    use image::Rgb;

    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    /// Blue 10x10 with three bottom-row pixels at distances 100, 255 and ~360.6
    fn three_step_patch() -> SquareImage {
        SquareImage::from_fn(10, |row, col| match (row, col) {
            (9, 7) => Rgb([100, 0, 255]),
            (9, 8) => Rgb([255, 0, 255]),
            (9, 9) => Rgb([255, 255, 255]),
            _ => BLUE,
        })
        .unwrap()
    }

    fn green_patch() -> SquareImage {
        SquareImage::from_fn(8, |row, col| {
            if row >= 6 && col >= 6 {
                Rgb([0, 255, 0])
            } else {
                BLUE
            }
        })
        .unwrap()
    }

    #[test]
    fn boundary_is_smallest_distance_above_mean() {
        let estimate = AutoThreshold::new().derive(&three_step_patch());

        let expected_mean = (100.0 + 255.0 + (255.0f64 * 255.0 * 2.0).sqrt()) / 100.0;
        assert_eq!(estimate.key, KeyColor { red: 0, green: 0, blue: 255 });
        assert!((estimate.mean_distance - expected_mean).abs() < 1e-9);
        assert_eq!(estimate.boundary, 100.0);
        assert!((estimate.threshold - 120.0).abs() < 1e-9);
    }

    #[test]
    fn mask_cuts_at_scaled_boundary() {
        let mask = AutoThreshold::new().generate(&three_step_patch());

        assert_eq!(mask.foreground_count(), 2);
        assert!(!mask.get(9, 7));
        assert!(mask.get(9, 8));
        assert!(mask.get(9, 9));
    }

    #[test]
    fn uniform_image_keeps_sentinel() {
        let image = SquareImage::from_fn(5, |_, _| Rgb([40, 80, 120])).unwrap();
        let estimate = AutoThreshold::new().derive(&image);

        assert_eq!(estimate.mean_distance, 0.0);
        assert_eq!(estimate.boundary, SENTINEL_THRESHOLD);
        assert!((estimate.threshold - SENTINEL_THRESHOLD * THRESHOLD_SCALE).abs() < 1e-9);
        assert_eq!(AutoThreshold::new().generate(&image), Mask::all(5, false));
    }

    #[test]
    fn pure_function_of_the_image() {
        let image = three_step_patch();
        let strategy = AutoThreshold::new();

        assert_eq!(strategy.derive(&image), strategy.derive(&image));
        assert_eq!(strategy.generate(&image), strategy.generate(&image));
    }

    #[test]
    fn keeps_less_than_zero_threshold_fixed_mask() {
        for image in [three_step_patch(), green_patch()] {
            let auto = AutoThreshold::new().generate(&image);
            let everything = FixedThreshold::new(0.0).generate(&image);

            assert!(everything.foreground_count() > 0);
            assert!(auto.foreground_count() < everything.foreground_count());
            assert!(auto.foreground_count() < (image.side() * image.side()) as usize);
        }
    }
}
