use std::time::Instant;

use gpu_dft_pass::utils::{find_dominant_rows, sine_column_image};
use gpu_dft_pass::PassParams;

type Runtime = cubecl::wgpu::WgpuRuntime;

pub fn main() {
    let (width, height) = (256u32, 256u32);
    // Every column carries 12 cycles over the region height.
    let image = sine_column_image(width, height, 12.0).expect("valid image size");
    let params = PassParams::for_image(width, height).with_magnitude_scale(height as f32 / 2.0);

    println!("====================");
    println!("\tInput {width}x{height}");
    println!("====================");
    println!("{:?}..", &image.texels()[0..10]);

    let start_time = Instant::now();
    let cpu = gpu_dft_pass::cpu::vertical_dft(&image, &params).expect("cpu pass");
    let elapsed_time = start_time.elapsed();

    println!("====================");
    println!("\tCPU {elapsed_time:?}");
    println!("====================");
    let peaks = find_dominant_rows(&cpu, width, height, 0, 0.5).expect("peak search");
    println!("peaks {peaks:?}");

    let start_time = Instant::now();
    let gpu = gpu_dft_pass::kernel::vertical_dft::<Runtime>(&Default::default(), &image, &params)
        .expect("gpu pass");
    let elapsed_time = start_time.elapsed();

    println!("====================");
    println!("\tGPU {elapsed_time:?}");
    println!("====================");
    let peaks = find_dominant_rows(&gpu, width, height, 0, 0.5).expect("peak search");
    println!("peaks {peaks:?}");

    let max_diff = cpu
        .iter()
        .zip(&gpu)
        .map(|(a, b)| (a[0] - b[0]).abs())
        .fold(0.0f32, f32::max);
    println!("max |cpu - gpu| = {max_diff:.2e}");
}
