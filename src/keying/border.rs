use super::types::{KeyColor, SquareImage};

/// Estimate the key color as the truncated per-channel mean of the left
/// column and the top row. The top-left corner is counted once, giving
/// `2N - 1` samples.
pub fn sample_key_color(image: &SquareImage) -> KeyColor {
    let side = image.side();
    let left_column = (0..side).map(|row| image.pixel(row, 0));
    let top_row = (1..side).map(|col| image.pixel(0, col));

    let mut sums = [0u64; 3];
    for pixel in left_column.chain(top_row) {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += channel as u64;
        }
    }

    let samples = 2 * side as u64 - 1;
    let key = KeyColor {
        red: (sums[0] / samples) as u8,
        green: (sums[1] / samples) as u8,
        blue: (sums[2] / samples) as u8,
    };

    tracing::debug!("Key color {:?} from {} border samples", key, samples);
    key
}
