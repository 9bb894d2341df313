//! Direct DFT summation along one image column.
//!
//! For output row `y` of a region `H` rows tall the engine computes
//!
//! ```text
//! X[y] = Σ_{n=0}^{H-1} s[n] · e^{-j2π·y·n/H}
//! ```
//!
//! with the complex multiply-accumulate written out on `(re, im)` pairs. The
//! sum runs over ascending `n` in `f32` with the angle evaluated as
//! `-2π · y · n / H`, left to right. Floating-point addition is not
//! associative, so that order is part of the contract: the GPU kernel
//! evaluates the same expression in the same order.

use std::f32::consts::PI;

use crate::coords::{map_scene_to_texel, scene_sample_position};
use crate::image::ComplexImage;
use crate::params::PassParams;

/// Running `(re, im)` sum for one work item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accumulator {
    pub re: f32,
    pub im: f32,
}

impl Accumulator {
    /// Adds `sample · e^{j·angle}`.
    #[inline]
    pub fn add_rotated(&mut self, sample: [f32; 2], angle: f32) {
        let (sin_a, cos_a) = angle.sin_cos();
        self.re += sample[0] * cos_a - sample[1] * sin_a;
        self.im += sample[1] * cos_a + sample[0] * sin_a;
    }

    /// Euclidean length of the accumulated value.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.re * self.re + self.im * self.im).sqrt()
    }
}

/// Basis angle for output row `y`, term `n`, over `height` rows.
#[inline]
pub fn basis_angle(y: u32, n: u32, height: u32) -> f32 {
    -2.0 * PI * y as f32 * n as f32 / height as f32
}

/// DFT coefficient `y` of an explicit column of samples.
///
/// The column length is the transform length.
pub fn accumulate(samples: &[[f32; 2]], y: u32) -> Accumulator {
    let height = samples.len() as u32;
    let mut acc = Accumulator::default();
    for (n, &sample) in samples.iter().enumerate() {
        acc.add_rotated(sample, basis_angle(y, n as u32, height));
    }
    acc
}

/// DFT coefficient `y` of column `x` of the result rectangle, fetching each
/// term through the coordinate mapper and the configured sampler.
///
/// `x` and `y` are logical positions inside the rectangle; the caller guards
/// them.
pub fn column_dft(image: &ComplexImage, params: &PassParams, x: u32, y: u32) -> Accumulator {
    let height = params.rect.height().max(0) as u32;
    let mut acc = Accumulator::default();
    for n in 0..height {
        let scene = scene_sample_position(x, n, &params.rect);
        let uv = map_scene_to_texel(scene, &params.coeffs);
        let sample = image.sample(uv, params.sampling);
        acc.add_rotated(sample, basis_angle(y, n, height));
    }
    acc
}

/// Samples column `x` of the result rectangle in ascending row order.
pub fn fetch_column(image: &ComplexImage, params: &PassParams, x: u32) -> Vec<[f32; 2]> {
    let height = params.rect.height().max(0) as u32;
    (0..height)
        .map(|n| {
            let uv = map_scene_to_texel(scene_sample_position(x, n, &params.rect), &params.coeffs);
            image.sample(uv, params.sampling)
        })
        .collect()
}
