//! Channel-packed complex input image and its sampler.
//!
//! The pass reads complex samples packed into the first two color channels of
//! the bound image: real in channel 0, imaginary in channel 1. Sampling takes
//! normalized texel coordinates and uses clamp-to-edge addressing, matching a
//! GPU sampler bound with `ClampToEdge`.

use crate::error::{PassError, PassResult};

/// Filtering applied when fetching a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Weighted blend of the four nearest texels.
    #[default]
    Bilinear,
    /// Nearest texel, no filtering.
    Point,
}

/// Read-only complex image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexImage {
    width: u32,
    height: u32,
    texels: Vec<[f32; 2]>,
}

impl ComplexImage {
    /// Wraps `(real, imag)` texels laid out row by row.
    pub fn new(width: u32, height: u32, texels: Vec<[f32; 2]>) -> PassResult<Self> {
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(PassError::SizeMismatch(format!(
                "expected {expected} texels for {width}x{height}, got {}",
                texels.len()
            )));
        }
        if expected == 0 {
            return Err(PassError::SizeMismatch(format!(
                "image must have at least one texel, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Real-valued image; the imaginary channel is zero.
    pub fn from_real(width: u32, height: u32, samples: &[f32]) -> PassResult<Self> {
        Self::new(width, height, samples.iter().map(|&re| [re, 0.0]).collect())
    }

    /// Interleaved RGBA pixels; R and G carry the real and imaginary parts,
    /// B and A are ignored.
    pub fn from_rgba(width: u32, height: u32, rgba: &[f32]) -> PassResult<Self> {
        if rgba.len() % 4 != 0 {
            return Err(PassError::SizeMismatch(format!(
                "RGBA buffer length {} is not a multiple of 4",
                rgba.len()
            )));
        }
        Self::new(
            width,
            height,
            rgba.chunks_exact(4).map(|px| [px[0], px[1]]).collect(),
        )
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texels(&self) -> &[[f32; 2]] {
        &self.texels
    }

    /// Texels flattened as `[re0, im0, re1, im1, ...]`.
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.texels.iter().flatten().copied().collect()
    }

    /// Direct texel fetch; coordinates are clamped to the edge.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> [f32; 2] {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.texels[y * self.width as usize + x]
    }

    /// Samples at normalized coordinates `uv`.
    ///
    /// Texel `i` has its center at `(i + 0.5) / size`, so sampling exactly at a
    /// center returns that texel unchanged in either mode.
    pub fn sample(&self, uv: [f32; 2], mode: SamplingMode) -> [f32; 2] {
        match mode {
            SamplingMode::Bilinear => self.sample_bilinear(uv),
            SamplingMode::Point => self.sample_point(uv),
        }
    }

    fn sample_point(&self, uv: [f32; 2]) -> [f32; 2] {
        let px = (uv[0] * self.width as f32).floor();
        let py = (uv[1] * self.height as f32).floor();
        self.texel(px as i64, py as i64)
    }

    fn sample_bilinear(&self, uv: [f32; 2]) -> [f32; 2] {
        let px = uv[0] * self.width as f32 - 0.5;
        let py = uv[1] * self.height as f32 - 0.5;
        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;

        let (x0, y0) = (x0 as i64, y0 as i64);
        let t00 = self.texel(x0, y0);
        let t10 = self.texel(x0 + 1, y0);
        let t01 = self.texel(x0, y0 + 1);
        let t11 = self.texel(x0 + 1, y0 + 1);

        let w00 = (1.0 - fx) * (1.0 - fy);
        let w10 = fx * (1.0 - fy);
        let w01 = (1.0 - fx) * fy;
        let w11 = fx * fy;

        let mut out = [0.0f32; 2];
        for (c, v) in out.iter_mut().enumerate() {
            *v = w00 * t00[c] + w10 * t10[c] + w01 * t01[c] + w11 * t11[c];
        }
        out
    }
}
