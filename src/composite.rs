use crate::keying::{Mask, SquareImage};

/// Build the chroma-keyed output: pixels the mask marks as foreground come
/// from `foreground`, all others from `background`.
///
/// All three inputs must share the same side length.
pub fn replace(mask: &Mask, foreground: &SquareImage, background: &SquareImage) -> SquareImage {
    let _span = tracing::debug_span!("replace").entered();

    let side = mask.side();
    debug_assert_eq!(side, foreground.side());
    debug_assert_eq!(side, background.side());

    let mut output = background.clone();
    for (x, y, pixel) in output.pixels_mut().enumerate_pixels_mut() {
        if mask.get(y, x) {
            *pixel = *foreground.pixel(y, x);
        }
    }

    output
}
