use bevy_math::{Quat, Vec3};

use super::util::BODY_FWD;
use crate::{LinearConstants, YawConstants};

// ----- Yaw torques -----

/// Rotational drag, linear in ω, against the first projected area.
pub(super) fn torque_yaw_drag(c: &YawConstants, omega: f32) -> f32 {
    -0.5 * c.drag_coefficient * c.water_density * c.projected_areas[0] * omega
}

pub(super) fn yaw_acceleration(c: &YawConstants, torque_net: f32, mass_eff: f32) -> f32 {
    torque_net * c.lever_arm / mass_eff * c.inertia_scale
}

// ----- Linear forces (world frame, +Y up) -----

pub(super) fn force_weight(c: &LinearConstants, ballast_volume: f32) -> Vec3 {
    Vec3::new(0.0, -c.gravity * c.effective_mass(ballast_volume), 0.0)
}

/// Engine thrust along body forward, rotated into world space.
pub(super) fn force_thrust(c: &LinearConstants, fan_speed: f32, orientation: Quat) -> Vec3 {
    orientation * (BODY_FWD * (c.engine_power * fan_speed))
}

pub(super) fn force_buoyancy(c: &LinearConstants) -> Vec3 {
    Vec3::new(0.0, c.water_density * c.gravity * c.displaced_volume, 0.0)
}

/// Per-axis drag, linear in velocity.
pub(super) fn force_drag(c: &LinearConstants, velocity: Vec3) -> Vec3 {
    let k = -0.5 * c.drag_coefficient * c.water_density;
    Vec3::from(c.projected_areas) * velocity * k
}

/// Hydrostatic force at the current height. Not part of the total; feeds the
/// vertical stop condition only.
pub(super) fn force_pressure(c: &LinearConstants, position: Vec3) -> Vec3 {
    Vec3::new(0.0, c.water_density * c.gravity * position.y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_opposes_each_axis() {
        let c = LinearConstants::default();
        let v = Vec3::new(1.0, -2.0, 0.5);
        let d = force_drag(&c, v);
        assert!(d.x < 0.0 && d.y > 0.0 && d.z < 0.0, "drag = {:?}", d);
        // 0.5 * 0.02 * 1025 * 2.1 = 21.525 N per m/s along x
        assert!((d.x + 21.525).abs() < 1e-3);
    }

    #[test]
    fn buoyancy_exceeds_empty_weight() {
        let c = LinearConstants::default();
        let b = force_buoyancy(&c).y;
        let w = force_weight(&c, 0.0).y;
        assert!((b - 15686.19).abs() < 0.05, "buoyancy = {}", b);
        assert!((w + 13675.14).abs() < 0.05, "weight = {}", w);
    }

    #[test]
    fn yaw_drag_is_zero_at_rest() {
        let c = YawConstants::default();
        assert_eq!(torque_yaw_drag(&c, 0.0), 0.0);
        assert!(torque_yaw_drag(&c, 1.0) < 0.0);
    }
}
