use cubecl::prelude::*;
use std::f32::consts::PI;
use tracing::{debug, trace};

use crate::dispatch::{DispatchGeometry, GroupShape};
use crate::error::{PassError, PassResult};
use crate::image::{ComplexImage, SamplingMode};
use crate::magnitude::Pixel;
use crate::params::PassParams;

/// Vertical DFT pass, one work item per output pixel.
///
/// The grid is launched in 2-D work groups and overhangs the region;
/// `ABSOLUTE_POS` is decoded back into `(x, y)` with the grid row stride and
/// items outside `width x height` return without touching `output`.
///
/// ```text
/// scene_x = x + 0.5 + left
/// for n in 0..height:
///     scene_y = n + 0.5 + top
///     s       = sample(scene_x * sx + ox, scene_y * sy + oy)
///     angle   = -2π · y · n / height
///     acc    += s · e^{j·angle}
/// out[shift(x, y)] = (|acc| / scale) · (1, 1, 1) , 1
/// ```
///
/// ### Buffers
/// - `texels`: complex input, `[re, im]` per texel, row-major, `tex_w x tex_h`
/// - `coeffs`: `[sx, ox, sy, oy, left, top]`
/// - `magnitude`: `[scale]`
/// - `output`: `4 * width * height` floats
///
/// Geometry and the sampling mode are comptime, so each region size compiles
/// to its own kernel cached by CubeCL.
#[cube(launch)]
pub fn vertical_dft_kernel<F: Float>(
    texels: &Array<F>,
    coeffs: &Array<F>,
    magnitude: &Array<F>,
    output: &mut Array<F>,
    #[comptime] grid_width: usize,
    #[comptime] width: usize,
    #[comptime] height: usize,
    #[comptime] tex_w: usize,
    #[comptime] tex_h: usize,
    #[comptime] bilinear: bool,
) {
    let pos = ABSOLUTE_POS;
    let x = pos % grid_width;
    let y = pos / grid_width;

    if x < width && y < height {
        let zero = F::new(0.0);
        let one = F::new(1.0);
        let max_x = F::cast_from(tex_w - 1);
        let max_y = F::cast_from(tex_h - 1);

        // ── Coordinate mapping: the column is fixed for the whole sum ────────
        let scene_x = F::cast_from(x) + F::new(0.5) + coeffs[4];
        let u = scene_x * coeffs[0] + coeffs[1];

        let mut re = F::new(0.0);
        let mut im = F::new(0.0);

        // ── Summation over the column, ascending n ───────────────────────────
        for n in 0..height {
            let scene_y = F::cast_from(n) + F::new(0.5) + coeffs[5];
            let v = scene_y * coeffs[2] + coeffs[3];

            let mut s_re = F::new(0.0);
            let mut s_im = F::new(0.0);

            if bilinear {
                let px = u * F::cast_from(tex_w) - F::new(0.5);
                let py = v * F::cast_from(tex_h) - F::new(0.5);
                let x0 = F::floor(px);
                let y0 = F::floor(py);
                let fx = px - x0;
                let fy = py - y0;

                let xa = usize::cast_from(F::clamp(x0, zero, max_x));
                let xb = usize::cast_from(F::clamp(x0 + one, zero, max_x));
                let ya = usize::cast_from(F::clamp(y0, zero, max_y));
                let yb = usize::cast_from(F::clamp(y0 + one, zero, max_y));

                let i00 = (ya * tex_w + xa) * 2;
                let i10 = (ya * tex_w + xb) * 2;
                let i01 = (yb * tex_w + xa) * 2;
                let i11 = (yb * tex_w + xb) * 2;

                let w00 = (one - fx) * (one - fy);
                let w10 = fx * (one - fy);
                let w01 = (one - fx) * fy;
                let w11 = fx * fy;

                s_re = w00 * texels[i00] + w10 * texels[i10] + w01 * texels[i01] + w11 * texels[i11];
                s_im = w00 * texels[i00 + 1]
                    + w10 * texels[i10 + 1]
                    + w01 * texels[i01 + 1]
                    + w11 * texels[i11 + 1];
            } else {
                let xi = usize::cast_from(F::clamp(F::floor(u * F::cast_from(tex_w)), zero, max_x));
                let yi = usize::cast_from(F::clamp(F::floor(v * F::cast_from(tex_h)), zero, max_y));
                let i = (yi * tex_w + xi) * 2;
                s_re = texels[i];
                s_im = texels[i + 1];
            }

            let angle = F::new(-2.0) * F::new(PI) * F::cast_from(y) * F::cast_from(n)
                / F::cast_from(height);
            let cos_a = F::cos(angle);
            let sin_a = F::sin(angle);

            re += s_re * cos_a - s_im * sin_a;
            im += s_im * cos_a + s_re * sin_a;
        }

        // ── Frequency shift (integer form) ───────────────────────────────────
        // Items below ceil(size / 2) move forward by floor(size / 2); the rest
        // move back by ceil(size / 2).
        let half_w = width / 2;
        let half_h = height / 2;
        let upper_w = width - half_w;
        let upper_h = height - half_h;

        let mut col = x + half_w;
        if x >= upper_w {
            col = x - upper_w;
        }
        let mut row = y + half_h;
        if y >= upper_h {
            row = y - upper_h;
        }

        // ── Magnitude write ──────────────────────────────────────────────────
        let base = (row * width + col) * 4;
        let value = F::sqrt(re * re + im * im) / magnitude[0];
        output[base] = value;
        output[base + 1] = value;
        output[base + 2] = value;
        output[base + 3] = one;
    }
}

/// Runs the vertical pass on the GPU with the default 24x24x1 work groups.
///
/// Returns `width * height` pixels in frequency-shifted order, identical in
/// layout to [`crate::cpu::vertical_dft`].
///
/// # Example
///
/// ```ignore
/// use cubecl::wgpu::WgpuRuntime;
/// use gpu_dft_pass::{kernel::vertical_dft, ComplexImage, PassParams};
/// let image = ComplexImage::from_real(4, 4, &[1.0; 16]).unwrap();
/// let out = vertical_dft::<WgpuRuntime>(&Default::default(), &image, &PassParams::for_image(4, 4));
/// ```
pub fn vertical_dft<R: Runtime>(
    device: &R::Device,
    image: &ComplexImage,
    params: &PassParams,
) -> PassResult<Vec<Pixel>> {
    vertical_dft_with_shape::<R>(device, image, params, GroupShape::default())
}

/// [`vertical_dft`] with an explicit work-group shape.
pub fn vertical_dft_with_shape<R: Runtime>(
    device: &R::Device,
    image: &ComplexImage,
    params: &PassParams,
    shape: GroupShape,
) -> PassResult<Vec<Pixel>> {
    let (width, height) = params.validate()?;
    let geometry = DispatchGeometry::for_size(width, height, shape);
    let [grid_width, _] = geometry.grid_size();
    trace!(width, height, grid_width, "kernel::vertical_dft");

    let texels = image.to_interleaved();
    let mut coeffs = params.coeffs.to_array().to_vec();
    coeffs.push(params.rect.left as f32);
    coeffs.push(params.rect.top as f32);
    let magnitude = [params.magnitude_scale];

    let cells = width as usize * height as usize;
    let output = vec![0.0f32; cells * 4];

    let client = R::client(device);
    let texel_handle = client.create_from_slice(f32::as_bytes(&texels));
    let coeff_handle = client.create_from_slice(f32::as_bytes(&coeffs));
    let magnitude_handle = client.create_from_slice(f32::as_bytes(&magnitude));
    let output_handle = client.create_from_slice(f32::as_bytes(&output));

    let groups = geometry.groups();
    debug!(
        groups_x = groups[0],
        groups_y = groups[1],
        shape_x = shape.x(),
        shape_y = shape.y(),
        "gpu dispatch"
    );

    let launched = unsafe {
        vertical_dft_kernel::launch::<f32, R>(
            &client,
            CubeCount::Static(groups[0], groups[1], 1),
            CubeDim::new_2d(shape.x(), shape.y()),
            ArrayArg::from_raw_parts::<f32>(&texel_handle, texels.len(), 1),
            ArrayArg::from_raw_parts::<f32>(&coeff_handle, coeffs.len(), 1),
            ArrayArg::from_raw_parts::<f32>(&magnitude_handle, magnitude.len(), 1),
            ArrayArg::from_raw_parts::<f32>(&output_handle, output.len(), 1),
            grid_width as usize,                     // comptime
            width as usize,                          // comptime
            height as usize,                         // comptime
            image.width() as usize,                  // comptime
            image.height() as usize,                 // comptime
            params.sampling == SamplingMode::Bilinear, // comptime
        )
    };
    launched.map_err(|err| PassError::Launch(format!("{err:?}")))?;

    let values = f32::from_bytes(&client.read_one(output_handle)).to_vec();
    Ok(values
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect())
}
