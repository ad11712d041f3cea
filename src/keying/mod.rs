mod auto;
mod border;
mod fixed;
pub mod types;

pub use auto::{AutoThreshold, ThresholdEstimate, SENTINEL_THRESHOLD, THRESHOLD_SCALE};
pub use border::sample_key_color;
pub use fixed::FixedThreshold;
pub use types::{KeyColor, KeyingError, Mask, MaskStrategy, SquareImage};

/// Both strategies, in the order their outputs are written
pub fn create_strategies(threshold: f64) -> Vec<Box<dyn MaskStrategy>> {
    vec![
        Box::new(FixedThreshold::new(threshold)),
        Box::new(AutoThreshold::new()),
    ]
}
