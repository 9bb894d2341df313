//! Constant parameter blocks bound to the pass.
//!
//! The kernel reads two constant blocks: the result rectangle together with
//! the scene-to-texel coefficients, and the magnitude scale. [`PassParams`]
//! bundles both along with the sampling mode configured on the input image.

use crate::error::{PassError, PassResult};
use crate::image::SamplingMode;

/// Logical input/output region in scene space.
///
/// `right` and `bottom` are exclusive, so `width = right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ResultRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the scene origin.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Signed width; non-positive for degenerate rectangles.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Signed height; non-positive for degenerate rectangles.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Number of output cells, zero for degenerate rectangles.
    pub fn area(&self) -> usize {
        if self.width() <= 0 || self.height() <= 0 {
            return 0;
        }
        self.width() as usize * self.height() as usize
    }

    /// Checks that both dimensions are positive and returns them.
    pub fn validate(&self) -> PassResult<(u32, u32)> {
        let (w, h) = (self.width(), self.height());
        if w <= 0 || h <= 0 {
            return Err(PassError::EmptyRect(format!(
                "{w}x{h} from ({}, {}, {}, {})",
                self.left, self.top, self.right, self.bottom
            )));
        }
        Ok((w as u32, h as u32))
    }
}

/// Affine map for one axis: `texel = scene * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCoeff {
    pub scale: f32,
    pub offset: f32,
}

impl AxisCoeff {
    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    #[inline]
    pub fn apply(&self, scene: f32) -> f32 {
        scene * self.scale + self.offset
    }
}

impl Default for AxisCoeff {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// Scene-to-texel coefficients, one pair per axis.
///
/// Texel coordinates are normalized: `0.0..1.0` spans the bound image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneToTexel {
    pub x: AxisCoeff,
    pub y: AxisCoeff,
}

impl SceneToTexel {
    pub const fn new(x: AxisCoeff, y: AxisCoeff) -> Self {
        Self { x, y }
    }

    /// Mapping for a scene whose pixel grid coincides with an image of
    /// `width` x `height` texels.
    ///
    /// ```
    /// # use gpu_dft_pass::params::SceneToTexel;
    /// let coeffs = SceneToTexel::for_image(4, 2);
    /// assert_eq!(coeffs.x.apply(2.0), 0.5);
    /// assert_eq!(coeffs.y.apply(1.0), 0.5);
    /// ```
    pub fn for_image(width: u32, height: u32) -> Self {
        Self::new(
            AxisCoeff::new((width as f32).recip(), 0.0),
            AxisCoeff::new((height as f32).recip(), 0.0),
        )
    }

    /// Packs the block as `[scale_x, offset_x, scale_y, offset_y]`, the layout
    /// the GPU kernel reads.
    pub fn to_array(&self) -> [f32; 4] {
        [self.x.scale, self.x.offset, self.y.scale, self.y.offset]
    }
}

/// Everything bound to one dispatch besides the image itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassParams {
    pub rect: ResultRect,
    pub coeffs: SceneToTexel,
    pub magnitude_scale: f32,
    pub sampling: SamplingMode,
}

impl PassParams {
    pub fn new(rect: ResultRect, coeffs: SceneToTexel, magnitude_scale: f32) -> Self {
        Self {
            rect,
            coeffs,
            magnitude_scale,
            sampling: SamplingMode::default(),
        }
    }

    /// Whole-image pass: the rectangle covers the image and scene pixels map
    /// one-to-one onto texels. Magnitude scale is 1.
    pub fn for_image(width: u32, height: u32) -> Self {
        Self::new(
            ResultRect::from_size(width, height),
            SceneToTexel::for_image(width, height),
            1.0,
        )
    }

    pub fn with_magnitude_scale(mut self, magnitude_scale: f32) -> Self {
        self.magnitude_scale = magnitude_scale;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Host-side checks the kernel relies on. Returns the region size.
    pub fn validate(&self) -> PassResult<(u32, u32)> {
        let dims = self.rect.validate()?;
        if self.magnitude_scale == 0.0 || !self.magnitude_scale.is_finite() {
            return Err(PassError::InvalidMagnitudeScale(self.magnitude_scale));
        }
        Ok(dims)
    }
}
