pub mod coords;
pub mod cpu;
pub mod dft;
pub mod dispatch;
pub mod error;
pub mod image;
pub mod kernel;
pub mod magnitude;
pub mod params;
pub mod shift;
pub mod utils;

pub use error::{PassError, PassResult};
pub use image::{ComplexImage, SamplingMode};
pub use magnitude::Pixel;
pub use params::{AxisCoeff, PassParams, ResultRect, SceneToTexel};

// 24 x 24 = 576 threads per group, under every backend's per-group limit.
// Apple Metal supports a maximum workgroup size of 1024 threads.
pub const NUMTHREADS_X: u32 = 24;
pub const NUMTHREADS_Y: u32 = 24;
pub const MAX_THREADS_PER_GROUP: u32 = 1024;

#[cfg(feature = "wgpu")]
type Runtime = cubecl::wgpu::WgpuRuntime;

#[cfg(feature = "cuda")]
type Runtime = cubecl::cuda::CudaRuntime;

/// Computes the vertical DFT pass of `image` over `params.rect` on the GPU.
///
/// Every column of the result rectangle is transformed along its height; the
/// spectrum is frequency-shifted so the zero-frequency row sits in the middle,
/// and each coefficient is written as a gray pixel `|X| / magnitude_scale`
/// with alpha 1.
///
/// # Parameters
///
/// - `image`: complex input, real in the first channel and imaginary in the second.
/// - `params`: result rectangle, scene-to-texel coefficients, magnitude scale
///   and sampling mode.
///
/// # Returns
///
/// `width * height` RGBA pixels, row-major over the result rectangle, or a
/// [`PassError`] if the parameters fail validation or the launch fails.
///
/// # Example
///
/// ```no_run
/// use gpu_dft_pass::{vertical_dft, ComplexImage, PassParams};
/// let image = ComplexImage::from_real(4, 4, &[1.0; 16]).unwrap();
/// let pixels = vertical_dft(&image, &PassParams::for_image(4, 4)).unwrap();
/// ```
#[cfg(any(feature = "wgpu", feature = "cuda"))]
pub fn vertical_dft(image: &ComplexImage, params: &PassParams) -> PassResult<Vec<Pixel>> {
    kernel::vertical_dft::<Runtime>(&Default::default(), image, params)
}

/// Computes the vertical DFT pass on the CPU with rayon.
///
/// Same semantics and output layout as [`vertical_dft`]; usable without a GPU
/// adapter.
///
/// # Example
///
/// ```
/// use gpu_dft_pass::{vertical_dft_cpu, ComplexImage, PassParams};
/// let image = ComplexImage::from_real(4, 4, &[1.0; 16]).unwrap();
/// let params = PassParams::for_image(4, 4).with_magnitude_scale(2.0);
/// let pixels = vertical_dft_cpu(&image, &params).unwrap();
/// assert_eq!(pixels.len(), 16);
/// ```
pub fn vertical_dft_cpu(image: &ComplexImage, params: &PassParams) -> PassResult<Vec<Pixel>> {
    cpu::vertical_dft(image, params)
}
