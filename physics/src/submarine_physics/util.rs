use bevy_math::{Quat, Vec3};

// Basis: +Z forward, +Y up, +X right
pub(super) const BODY_FWD: Vec3 = Vec3::Z;

#[inline]
pub(super) fn heading_to_quat(heading: f32) -> Quat {
    Quat::from_rotation_y(heading)
}

/// Equality after rounding both values to hundredths.
#[inline]
pub(super) fn eq_hundredths(a: f32, b: f32) -> bool {
    (f64::from(a) * 100.0).round() == (f64::from(b) * 100.0).round()
}
