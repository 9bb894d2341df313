//! Shared test helpers compiled into every integration-test binary.
//! Items may not all be used in every binary, so dead_code is suppressed.
#![allow(dead_code)]

use gpu_dft_pass::Pixel;

/// Maximum absolute error tolerated between f32 results and analytical values.
pub const EPSILON: f32 = 1e-3;

/// Tighter tolerance for small regions where trig error stays tiny.
pub const FINE_EPSILON: f32 = 1e-4;

pub fn assert_within(actual: f32, expected: f32, eps: f32, label: &str) {
    assert!(
        (actual - expected).abs() <= eps,
        "{}: got {:.6}, expected {:.6}  (diff {:.2e})",
        label,
        actual,
        expected,
        (actual - expected).abs(),
    );
}

pub fn assert_approx(actual: f32, expected: f32, label: &str) {
    assert_within(actual, expected, EPSILON, label);
}

pub fn assert_slice_approx(actual: &[f32], expected: &[f32], label: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: length mismatch ({} vs {})",
        label,
        actual.len(),
        expected.len()
    );
    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_approx(a, e, &format!("{label}[{i}]"));
    }
}

/// Gray pixel check: RGB all equal to `value`, alpha exactly 1.
pub fn assert_gray(pixel: Pixel, value: f32, eps: f32, label: &str) {
    for c in 0..3 {
        assert_within(pixel[c], value, eps, &format!("{label}.{}", ["r", "g", "b"][c]));
    }
    assert_eq!(pixel[3], 1.0, "{label}.a");
}

pub fn assert_pixels_approx(actual: &[Pixel], expected: &[Pixel], label: &str) {
    assert_eq!(actual.len(), expected.len(), "{label}: length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_slice_approx(a, e, &format!("{label}[{i}]"));
    }
}

/// Deterministic pseudo-random values in `[-1, 1)`.
pub fn noise(seed: u32, len: usize) -> Vec<f32> {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 8) as f32 / (1u32 << 23) as f32 - 1.0
        })
        .collect()
}
