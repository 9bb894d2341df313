//! CPU execution of the vertical pass.
//!
//! Each work item runs the same steps the GPU kernel does: bounds guard,
//! column summation, frequency shift, magnitude write. The output is filled
//! in place with rayon, one task per output row. The frequency shift is a
//! bijection, so every cell has exactly one owning work item, found with
//! [`unshifted_index`].

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::dft::column_dft;
use crate::dispatch::{DispatchGeometry, GroupShape, WorkItem};
use crate::error::{PassError, PassResult};
use crate::image::ComplexImage;
use crate::magnitude::{magnitude_pixel, Pixel};
use crate::params::PassParams;
use crate::shift::{shifted_index, unshifted_index};

/// One invocation. Returns the output cell and its pixel, or `None` when the
/// item lies outside the result rectangle.
pub fn invoke(item: WorkItem, image: &ComplexImage, params: &PassParams) -> Option<(usize, Pixel)> {
    let width = params.rect.width().max(0) as u32;
    let height = params.rect.height().max(0) as u32;
    if !item.in_bounds(width, height) {
        return None;
    }

    let (x, y) = (item.x(), item.y());
    let acc = column_dft(image, params, x, y);
    let index = shifted_index(x, y, width, height);
    Some((index, magnitude_pixel(acc, params.magnitude_scale)))
}

/// Runs every in-bounds work item of `geometry` and writes the results into
/// `out`.
///
/// `out` must hold exactly one pixel per cell of the result rectangle and the
/// grid must reach every cell of it. Each cell is written once. Returns the
/// number of cells written.
pub fn dispatch_into(
    out: &mut [Pixel],
    image: &ComplexImage,
    params: &PassParams,
    geometry: &DispatchGeometry,
) -> PassResult<usize> {
    let (width, height) = params.validate()?;
    let cells = width as usize * height as usize;
    if out.len() != cells {
        return Err(PassError::SizeMismatch(format!(
            "output holds {} pixels, region {width}x{height} needs {cells}",
            out.len()
        )));
    }
    if !geometry.covers(width, height) {
        let [gx, gy] = geometry.grid_size();
        return Err(PassError::InvalidGroupShape(format!(
            "grid {gx}x{gy} does not cover region {width}x{height}"
        )));
    }

    let groups = geometry.groups();
    let shape = geometry.shape();
    debug!(
        groups_x = groups[0],
        groups_y = groups[1],
        shape_x = shape.x(),
        shape_y = shape.y(),
        "cpu dispatch"
    );

    let row_len = width as usize;
    let written: usize = out
        .par_chunks_mut(row_len)
        .enumerate()
        .map(|(row, pixels)| {
            let mut count = 0;
            for (col, pixel) in pixels.iter_mut().enumerate() {
                let index = row * row_len + col;
                let (x, y) = unshifted_index(index, width, height);
                if let Some((cell, value)) = invoke(WorkItem::at(x, y), image, params) {
                    debug_assert_eq!(cell, index);
                    *pixel = value;
                    count += 1;
                }
            }
            count
        })
        .sum();
    Ok(written)
}

/// Vertical pass with an explicit work-group shape.
pub fn vertical_dft_with_shape(
    image: &ComplexImage,
    params: &PassParams,
    shape: GroupShape,
) -> PassResult<Vec<Pixel>> {
    let (width, height) = params.validate()?;
    trace!(width, height, "cpu::vertical_dft");

    let geometry = DispatchGeometry::for_size(width, height, shape);
    let mut out = vec![[0.0f32; 4]; width as usize * height as usize];
    dispatch_into(&mut out, image, params, &geometry)?;
    Ok(out)
}

/// Vertical DFT pass over `params.rect` on the CPU, with the default
/// 24x24x1 work groups.
///
/// Returns `width * height` pixels in frequency-shifted order.
///
/// # Example
///
/// ```
/// use gpu_dft_pass::cpu::vertical_dft;
/// use gpu_dft_pass::{ComplexImage, PassParams};
///
/// let image = ComplexImage::from_real(4, 4, &[1.0; 16]).unwrap();
/// let out = vertical_dft(&image, &PassParams::for_image(4, 4)).unwrap();
/// // DC of every column lands on the center row.
/// assert!((out[2 * 4][0] - 4.0).abs() < 1e-4);
/// ```
pub fn vertical_dft(image: &ComplexImage, params: &PassParams) -> PassResult<Vec<Pixel>> {
    vertical_dft_with_shape(image, params, GroupShape::default())
}
