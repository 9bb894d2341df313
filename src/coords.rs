//! Scene-space to texel-space conversion.

use crate::params::{ResultRect, SceneToTexel};

/// Maps a scene position to normalized texel coordinates, one axis at a time.
#[inline]
pub fn map_scene_to_texel(scene: [f32; 2], coeffs: &SceneToTexel) -> [f32; 2] {
    [coeffs.x.apply(scene[0]), coeffs.y.apply(scene[1])]
}

/// Scene position of summation term `n` for column `x`: the pixel center of
/// `(x, n)` offset by the rectangle origin.
#[inline]
pub fn scene_sample_position(x: u32, n: u32, rect: &ResultRect) -> [f32; 2] {
    [
        x as f32 + 0.5 + rect.left as f32,
        n as f32 + 0.5 + rect.top as f32,
    ]
}
