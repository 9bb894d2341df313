use std::f32::consts::PI;

use crate::error::{PassError, PassResult};
use crate::image::ComplexImage;
use crate::magnitude::Pixel;
use crate::shift::unshifted_index;

/// Real image whose every column is `sin(2π · cycles · n / height)`.
///
/// # Example
///
/// ```
/// # use gpu_dft_pass::utils::sine_column_image;
/// let image = sine_column_image(2, 8, 1.0).unwrap();
/// assert_eq!(image.texels().len(), 16);
/// assert!((image.texel(1, 2)[0] - 1.0).abs() < 1e-6);
/// ```
pub fn sine_column_image(width: u32, height: u32, cycles: f32) -> PassResult<ComplexImage> {
    let samples: Vec<f32> = (0..height)
        .flat_map(|n| {
            let v = (2.0 * PI * cycles * n as f32 / height as f32).sin();
            std::iter::repeat(v).take(width as usize)
        })
        .collect();
    ComplexImage::from_real(width, height, &samples)
}

/// Image filled with one complex value.
pub fn constant_image(width: u32, height: u32, value: [f32; 2]) -> PassResult<ComplexImage> {
    ComplexImage::new(width, height, vec![value; width as usize * height as usize])
}

/// Signed frequency carried by row `row` of a shifted output `height` rows
/// tall. The center row is 0 Hz.
///
/// ```
/// # use gpu_dft_pass::utils::shifted_row_frequency;
/// assert_eq!(shifted_row_frequency(4, 8), 0);
/// assert_eq!(shifted_row_frequency(0, 8), -4);
/// assert_eq!(shifted_row_frequency(7, 8), 3);
/// ```
#[must_use]
pub fn shifted_row_frequency(row: u32, height: u32) -> i32 {
    row as i32 - (height / 2) as i32
}

/// Reorders a shifted output back to natural order, cell `y * width + x`
/// holding the coefficient of work item `(x, y)`.
#[must_use]
pub fn unshift_pixels(pixels: &[Pixel], width: u32, height: u32) -> Vec<Pixel> {
    let mut natural = vec![[0.0f32; 4]; pixels.len()];
    for (index, &pixel) in pixels.iter().enumerate() {
        let (x, y) = unshifted_index(index, width, height);
        natural[y as usize * width as usize + x as usize] = pixel;
    }
    natural
}

/// Local peaks of one output column above `threshold`, as
/// `(signed frequency, magnitude)`.
///
/// A peak exceeds both vertical neighbours; the first and last rows are never
/// reported.
///
/// ```
/// # use gpu_dft_pass::utils::find_dominant_rows;
/// let column = [0.1f32, 0.5, 0.3, 0.7, 0.2];
/// let pixels: Vec<[f32; 4]> = column.iter().map(|&v| [v, v, v, 1.0]).collect();
/// let peaks = find_dominant_rows(&pixels, 1, 5, 0, 0.4).unwrap();
/// assert_eq!(peaks, vec![(-1, 0.5), (1, 0.7)]);
/// ```
pub fn find_dominant_rows(
    pixels: &[Pixel],
    width: u32,
    height: u32,
    column: u32,
    threshold: f32,
) -> PassResult<Vec<(i32, f32)>> {
    let cells = width as usize * height as usize;
    if pixels.len() != cells {
        return Err(PassError::SizeMismatch(format!(
            "{} pixels for a {width}x{height} region",
            pixels.len()
        )));
    }
    if column >= width {
        return Err(PassError::SizeMismatch(format!(
            "column {column} outside width {width}"
        )));
    }

    let value = |row: usize| pixels[row * width as usize + column as usize][0];
    Ok((1..(height as usize).saturating_sub(1))
        .filter(|&r| value(r) > value(r - 1) && value(r) > value(r + 1) && value(r) > threshold)
        .map(|r| (shifted_row_frequency(r as u32, height), value(r)))
        .collect())
}
