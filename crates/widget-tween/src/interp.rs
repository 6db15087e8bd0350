// interp.rs
//
// Interpolation primitives shared by every animated property.

use glam::Vec2;
use crate::color::Rgba;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values. `t` is not clamped, so
/// overshooting curves carry positions and sizes past their target.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Per-channel color blend.
///
/// The blend fraction is clamped to [0, 1]. Each channel is rounded half
/// away from zero and clamped to 0..=255 on its own.
#[inline]
pub fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    Rgba {
        r: lerp_channel(a.r, b.r, t),
        g: lerp_channel(a.g, b.g, t),
        b: lerp_channel(a.b, b.b, t),
        a: lerp_channel(a.a, b.a, t),
    }
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    lerp(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8
}
