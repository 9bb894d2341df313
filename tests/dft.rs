use gpu_dft_pass::dft::{accumulate, column_dft, fetch_column, Accumulator};
use gpu_dft_pass::utils::{constant_image, find_dominant_rows, sine_column_image, unshift_pixels};
use gpu_dft_pass::{
    vertical_dft_cpu, ComplexImage, PassError, PassParams, ResultRect, SamplingMode, SceneToTexel,
};

mod common;
use common::{assert_approx, assert_gray, assert_within, noise, FINE_EPSILON};

/// All-zero input must give a zero accumulator and zero magnitude everywhere.
#[test]
fn test_zero_input() {
    let image = constant_image(6, 8, [0.0, 0.0]).unwrap();
    let params = PassParams::for_image(6, 8);

    for x in 0..6 {
        for y in 0..8 {
            assert_eq!(column_dft(&image, &params, x, y), Accumulator::default());
        }
    }

    let pixels = vertical_dft_cpu(&image, &params).unwrap();
    assert_eq!(pixels.len(), 48);
    for (i, &px) in pixels.iter().enumerate() {
        assert_gray(px, 0.0, 0.0, &format!("pixel[{i}]"));
    }
}

/// A constant column c puts c·H in row 0 and nothing elsewhere; after the
/// shift that energy sits on the center row.
///
/// Proof: X[0] = Σ c = c·H;  X[k≠0] = c · Σ e^{-j2πkn/H} = 0 (geometric sum).
#[test]
fn test_dc_concentration() {
    let (w, h) = (3u32, 8u32);
    let c = 2.5f32;
    let image = constant_image(w, h, [c, 0.0]).unwrap();
    let params = PassParams::for_image(w, h);

    for x in 0..w {
        let dc = column_dft(&image, &params, x, 0);
        assert_approx(dc.re, c * h as f32, &format!("x={x} re[0]"));
        assert_approx(dc.im, 0.0, &format!("x={x} im[0]"));
        for y in 1..h {
            let acc = column_dft(&image, &params, x, y);
            assert_approx(acc.re, 0.0, &format!("x={x} re[{y}]"));
            assert_approx(acc.im, 0.0, &format!("x={x} im[{y}]"));
        }
    }

    let pixels = vertical_dft_cpu(&image, &params).unwrap();
    let center = (h / 2) as usize;
    for row in 0..h as usize {
        let expected = if row == center { c * h as f32 } else { 0.0 };
        for col in 0..w as usize {
            assert_gray(
                pixels[row * w as usize + col],
                expected,
                common::EPSILON,
                &format!("out({col}, {row})"),
            );
        }
    }
}

/// 4x4 region of ones: pre-shift accumulator is (4, 0) at y = 0 and (0, 0)
/// elsewhere; the energy lands on output row 2.
#[test]
fn test_four_by_four_ones() {
    let image = ComplexImage::from_real(4, 4, &[1.0; 16]).unwrap();
    let params = PassParams::for_image(4, 4);

    for x in 0..4 {
        let dc = column_dft(&image, &params, x, 0);
        assert_within(dc.re, 4.0, FINE_EPSILON, &format!("x={x} re[0]"));
        assert_within(dc.im, 0.0, FINE_EPSILON, &format!("x={x} im[0]"));
        for y in 1..4 {
            let acc = column_dft(&image, &params, x, y);
            assert_within(acc.re, 0.0, FINE_EPSILON, &format!("x={x} re[{y}]"));
            assert_within(acc.im, 0.0, FINE_EPSILON, &format!("x={x} im[{y}]"));
        }
    }

    let pixels = vertical_dft_cpu(&image, &params).unwrap();
    for (i, &px) in pixels.iter().enumerate() {
        let expected = if i / 4 == 2 { 4.0 } else { 0.0 };
        assert_gray(px, expected, FINE_EPSILON, &format!("pixel[{i}]"));
    }
}

/// Same input with magnitude scale 2: the energy-bearing cells read
/// length((4, 0)) / 2 = 2.
#[test]
fn test_magnitude_scale() {
    let image = ComplexImage::from_real(4, 4, &[1.0; 16]).unwrap();
    let params = PassParams::for_image(4, 4).with_magnitude_scale(2.0);

    let pixels = vertical_dft_cpu(&image, &params).unwrap();
    for col in 0..4 {
        assert_gray(pixels[2 * 4 + col], 2.0, FINE_EPSILON, &format!("row 2 col {col}"));
    }
}

/// DFT(a·A + b·B) = a·DFT(A) + b·DFT(B) on the accumulator.
#[test]
fn test_linearity() {
    let h = 16usize;
    let column_a: Vec<[f32; 2]> = noise(1, 2 * h).chunks(2).map(|c| [c[0], c[1]]).collect();
    let column_b: Vec<[f32; 2]> = noise(2, 2 * h).chunks(2).map(|c| [c[0], c[1]]).collect();
    let (a, b) = (2.0f32, -0.5f32);

    let mixed: Vec<[f32; 2]> = column_a
        .iter()
        .zip(&column_b)
        .map(|(p, q)| [a * p[0] + b * q[0], a * p[1] + b * q[1]])
        .collect();

    for y in 0..h as u32 {
        let lhs = accumulate(&mixed, y);
        let ra = accumulate(&column_a, y);
        let rb = accumulate(&column_b, y);
        assert_approx(lhs.re, a * ra.re + b * rb.re, &format!("re[{y}]"));
        assert_approx(lhs.im, a * ra.im + b * rb.im, &format!("im[{y}]"));
    }
}

/// Imaginary input is rotated, not dropped: an impulse of j gives j in every bin.
#[test]
fn test_imaginary_impulse() {
    let mut column = vec![[0.0f32; 2]; 8];
    column[0] = [0.0, 1.0];
    for y in 0..8 {
        let acc = accumulate(&column, y);
        assert_approx(acc.re, 0.0, &format!("re[{y}]"));
        assert_approx(acc.im, 1.0, &format!("im[{y}]"));
    }

    // Shifted by one sample: X[k] = j · e^{-j2πk/8}.
    column.rotate_right(1);
    for y in 0..8u32 {
        let angle = -2.0 * std::f32::consts::PI * y as f32 / 8.0;
        let acc = accumulate(&column, y);
        assert_approx(acc.re, -angle.sin(), &format!("re[{y}]"));
        assert_approx(acc.im, angle.cos(), &format!("im[{y}]"));
    }
}

/// sin(2π·2n/H) has power H/2 at frequencies ±2 only.
#[test]
fn test_sine_column_peaks() {
    let (w, h) = (1u32, 16u32);
    let image = sine_column_image(w, h, 2.0).unwrap();
    let pixels = vertical_dft_cpu(&image, &PassParams::for_image(w, h)).unwrap();

    let peaks = find_dominant_rows(&pixels, w, h, 0, 1.0).unwrap();
    assert_eq!(peaks.len(), 2, "peaks: {peaks:?}");
    assert_eq!(peaks[0].0, -2);
    assert_eq!(peaks[1].0, 2);
    assert_approx(peaks[0].1, h as f32 / 2.0, "|X[-2]|");
    assert_approx(peaks[1].1, h as f32 / 2.0, "|X[2]|");

    // Natural order puts the same energy at rows 2 and H-2.
    let natural = unshift_pixels(&pixels, w, h);
    assert_approx(natural[2][0], 8.0, "natural[2]");
    assert_approx(natural[14][0], 8.0, "natural[14]");
    assert_approx(natural[0][0], 0.0, "natural[0]");
}

/// The rectangle origin offsets every fetch into the image.
#[test]
fn test_rect_offset_selects_sub_region() {
    let (iw, ih) = (8u32, 8u32);
    let samples = noise(7, (iw * ih) as usize);
    let image = ComplexImage::from_real(iw, ih, &samples).unwrap();
    let params = PassParams::new(
        ResultRect::new(2, 4, 6, 8),
        SceneToTexel::for_image(iw, ih),
        1.0,
    );

    for x in 0..4u32 {
        let expected: Vec<[f32; 2]> = (0..4)
            .map(|n| [samples[((n + 4) * iw + x + 2) as usize], 0.0])
            .collect();
        assert_eq!(fetch_column(&image, &params, x), expected, "column {x}");

        for y in 0..4 {
            let got = column_dft(&image, &params, x, y);
            let want = accumulate(&expected, y);
            assert_approx(got.re, want.re, &format!("({x},{y}) re"));
            assert_approx(got.im, want.im, &format!("({x},{y}) im"));
        }
    }
}

/// At texel centers point and bilinear sampling see the same values.
#[test]
fn test_point_sampling_matches_bilinear_at_centers() {
    let image = ComplexImage::from_real(8, 8, &noise(3, 64)).unwrap();
    let bilinear = PassParams::for_image(8, 8);
    let point = bilinear.with_sampling(SamplingMode::Point);

    assert_eq!(
        vertical_dft_cpu(&image, &bilinear).unwrap(),
        vertical_dft_cpu(&image, &point).unwrap()
    );
}

/// A half-texel vertical offset makes bilinear average adjacent rows.
#[test]
fn test_bilinear_half_texel_offset() {
    // Column alternates 1, 0, 1, 0 ... : averaged neighbours are all 0.5.
    let h = 8u32;
    let samples: Vec<f32> = (0..h).map(|n| if n % 2 == 0 { 1.0 } else { 0.0 }).collect();
    let image = ComplexImage::from_real(1, h, &samples).unwrap();

    let mut params = PassParams::for_image(1, h - 1);
    params.coeffs = SceneToTexel::for_image(1, h);
    params.coeffs.y.offset = 0.5 / h as f32;

    let column = fetch_column(&image, &params, 0);
    assert_eq!(column.len(), (h - 1) as usize);
    for (n, s) in column.iter().enumerate() {
        assert_approx(s[0], 0.5, &format!("sample[{n}]"));
    }
}

/// Host validation reports bad parameters instead of dispatching.
#[test]
fn test_invalid_params_are_rejected() {
    let image = ComplexImage::from_real(4, 4, &[1.0; 16]).unwrap();

    let empty = PassParams::new(ResultRect::new(0, 0, 0, 4), SceneToTexel::for_image(4, 4), 1.0);
    assert!(matches!(
        vertical_dft_cpu(&image, &empty),
        Err(PassError::EmptyRect(_))
    ));

    let zero_scale = PassParams::for_image(4, 4).with_magnitude_scale(0.0);
    assert_eq!(
        vertical_dft_cpu(&image, &zero_scale),
        Err(PassError::InvalidMagnitudeScale(0.0))
    );
}

/// Peak search reports a truncated buffer or a missing column as an error.
#[test]
fn test_dominant_rows_rejects_mismatched_input() {
    let (w, h) = (2u32, 8u32);
    let image = sine_column_image(w, h, 1.0).unwrap();
    let pixels = vertical_dft_cpu(&image, &PassParams::for_image(w, h)).unwrap();

    assert!(matches!(
        find_dominant_rows(&pixels[..15], w, h, 0, 0.5),
        Err(PassError::SizeMismatch(_))
    ));
    assert!(matches!(
        find_dominant_rows(&pixels, w, h, 2, 0.5),
        Err(PassError::SizeMismatch(_))
    ));
    assert_eq!(find_dominant_rows(&pixels, w, h, 1, 0.5).unwrap().len(), 2);
}
