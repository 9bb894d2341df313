//! Frequency shift: quadrant swap that moves the zero-frequency term from the
//! corners of the region to its center.
//!
//! Quadrants are swapped diagonally (top-left ↔ bottom-right, top-right ↔
//! bottom-left) around `mid = size / 2.0`. [`shifted_index`] evaluates the
//! real-valued formula; [`shifted_index_int`] is the integer form used inside
//! the GPU kernel. For both even and odd sizes the two agree and reduce to a
//! cyclic shift by `size / 2` (integer division) on each axis.

/// Output cell for work item `(x, y)` in a `width` x `height` region.
///
/// | condition | index |
/// |---|---|
/// | `x < midX`, `y < midY` | `floor(y + midY) * width + (x + midX)` |
/// | `x ≥ midX`, `y < midY` | `floor(y + midY) * width + (x − midX)` |
/// | `x < midX`, `y ≥ midY` | `floor(y − midY) * width + (x + midX)` |
/// | `x ≥ midX`, `y ≥ midY` | `floor(y − midY) * width + (x − midX)` |
///
/// The column term is truncated when converted to an index.
///
/// ```
/// # use gpu_dft_pass::shift::shifted_index;
/// // DC of a 4x4 region lands in the middle.
/// assert_eq!(shifted_index(0, 0, 4, 4), 2 * 4 + 2);
/// assert_eq!(shifted_index(3, 3, 4, 4), 4 + 1);
/// ```
#[inline]
pub fn shifted_index(x: u32, y: u32, width: u32, height: u32) -> usize {
    let mid_x = width as f32 / 2.0;
    let mid_y = height as f32 / 2.0;
    let (xf, yf) = (x as f32, y as f32);

    let row = if yf < mid_y {
        (yf + mid_y).floor()
    } else {
        (yf - mid_y).floor()
    };
    let col = if xf < mid_x { xf + mid_x } else { xf - mid_x };

    row as usize * width as usize + col as usize
}

/// Integer form of [`shifted_index`].
#[inline]
pub fn shifted_index_int(x: u32, y: u32, width: u32, height: u32) -> usize {
    let col = shift_axis(x, width);
    let row = shift_axis(y, height);
    row as usize * width as usize + col as usize
}

#[inline]
fn shift_axis(i: u32, size: u32) -> u32 {
    let lo = size / 2;
    if 2 * i < size {
        i + lo
    } else {
        i - (size - lo)
    }
}

#[inline]
fn unshift_axis(i: u32, size: u32) -> u32 {
    let lo = size / 2;
    if i >= lo {
        i - lo
    } else {
        i + (size - lo)
    }
}

/// Inverse of the shift: the work item `(x, y)` that owns output cell `index`.
///
/// ```
/// # use gpu_dft_pass::shift::{shifted_index, unshifted_index};
/// let index = shifted_index(1, 4, 5, 7);
/// assert_eq!(unshifted_index(index, 5, 7), (1, 4));
/// ```
pub fn unshifted_index(index: usize, width: u32, height: u32) -> (u32, u32) {
    let col = (index % width as usize) as u32;
    let row = (index / width as usize) as u32;
    (unshift_axis(col, width), unshift_axis(row, height))
}
