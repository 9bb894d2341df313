use crate::dft::Accumulator;

/// Four-channel output pixel: `[r, g, b, a]`.
pub type Pixel = [f32; 4];

/// Reduces an accumulator to a gray pixel: `length / scale` in RGB, alpha 1.
///
/// Values are not clamped; anything above the display range is expected to
/// saturate downstream. A zero `scale` yields inf/NaN.
///
/// ```
/// # use gpu_dft_pass::dft::Accumulator;
/// # use gpu_dft_pass::magnitude::magnitude_pixel;
/// let px = magnitude_pixel(Accumulator { re: 4.0, im: 0.0 }, 2.0);
/// assert_eq!(px, [2.0, 2.0, 2.0, 1.0]);
/// ```
#[inline]
pub fn magnitude_pixel(acc: Accumulator, scale: f32) -> Pixel {
    let v = acc.length() / scale;
    [v, v, v, 1.0]
}

/// Flattens pixels to `[r0, g0, b0, a0, r1, ...]`.
pub fn pixels_to_rgba(pixels: &[Pixel]) -> Vec<f32> {
    pixels.iter().flatten().copied().collect()
}
