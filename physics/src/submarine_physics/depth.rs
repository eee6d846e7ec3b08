use bevy_math::{Quat, Vec3};

use super::terms::*;
use super::types::{DepthEvent, DepthStep, DepthStepDebug, LinearState};
use super::util::eq_hundredths;
use crate::{LinearConstants, VelocityPasses};

/// Linear motion of the hull under weight, buoyancy, thrust and drag, with the
/// depth guard and the auto-depth ballast law.
#[derive(Debug, Clone)]
pub struct DepthDynamics {
    constants: LinearConstants,
    state: LinearState,
}

impl DepthDynamics {
    pub fn new(constants: LinearConstants) -> Self {
        Self::with_state(constants, LinearState::default())
    }

    pub fn with_state(constants: LinearConstants, state: LinearState) -> Self {
        Self { constants, state }
    }

    pub fn constants(&self) -> &LinearConstants {
        &self.constants
    }

    pub fn state(&self) -> &LinearState {
        &self.state
    }

    pub fn depth(&self) -> f32 {
        self.state.depth()
    }

    pub fn is_suspended(&self) -> bool {
        self.state.suspended
    }

    /// Ballast volume (m³) at which the hull neither rises nor sinks.
    pub fn neutral_ballast_volume(&self) -> f32 {
        self.constants.neutral_ballast_volume()
    }

    /// Advance one fixed step. `orientation` rotates body thrust into world space.
    pub fn advance(&mut self, ballast_volume: f32, fan_speed: f32, orientation: Quat) -> DepthStep {
        self.advance_dbg(ballast_volume, fan_speed, orientation, None)
    }

    /// Variant of `advance` that fills out an optional debug telemetry struct.
    pub fn advance_dbg(
        &mut self,
        ballast_volume: f32,
        fan_speed: f32,
        orientation: Quat,
        mut dbg: Option<&mut DepthStepDebug>,
    ) -> DepthStep {
        if self.state.suspended {
            return self.held();
        }
        let ballast_volume = ballast_volume.max(0.0);
        if let Some(d) = dbg.as_deref_mut() {
            d.dt = self.constants.time_step;
            d.ballast_volume = ballast_volume;
            d.fan_speed = fan_speed;
            d.passes = 0;
        }

        self.integrate_velocity(ballast_volume, fan_speed, orientation, dbg.as_deref_mut());

        let vertical_stop = self.vertical_motion_should_stop();
        if vertical_stop {
            self.state.velocity.y = 0.0;
            self.state.acceleration.y = 0.0;
        } else if self.constants.velocity_passes == VelocityPasses::Double {
            // Second pass sees the drag of the already-updated velocity.
            self.integrate_velocity(ballast_volume, fan_speed, orientation, dbg.as_deref_mut());
        }

        let dt = self.constants.time_step;
        self.state.position += self.state.velocity * dt;

        let event = self.check_depth_guard();

        if let Some(d) = dbg {
            d.pressure = force_pressure(&self.constants, self.state.position);
            d.vertical_stop = vertical_stop;
            d.depth = self.depth();
        }

        DepthStep {
            position: self.state.position,
            suspended: self.state.suspended,
            event,
        }
    }

    /// Clear the depth-guard suspension. Returns whether it was set.
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.state.suspended, false)
    }

    /// Ballast command (panel units, 0..100) that steers toward `desired_depth`.
    ///
    /// A negative depth is the disabled sentinel and yields `None`, leaving the
    /// operator's ballast setting untouched.
    pub fn auto_depth_ballast_command(&self, desired_depth: f32) -> Option<f32> {
        if desired_depth.is_nan() || desired_depth < 0.0 {
            return None;
        }
        let c = &self.constants;
        let error = self.depth() - desired_depth;
        let command =
            c.auto_depth_baseline - error + c.auto_depth_velocity_gain * self.state.velocity.y;
        Some(command.max(0.0))
    }

    fn held(&self) -> DepthStep {
        DepthStep {
            position: self.state.position,
            suspended: true,
            event: None,
        }
    }

    fn total_force(
        &self,
        ballast_volume: f32,
        fan_speed: f32,
        orientation: Quat,
        dbg: Option<&mut DepthStepDebug>,
    ) -> Vec3 {
        let c = &self.constants;
        let weight = force_weight(c, ballast_volume);
        let thrust = force_thrust(c, fan_speed, orientation);
        let buoyancy = force_buoyancy(c);
        let drag = force_drag(c, self.state.velocity);
        let total = buoyancy + weight + thrust + drag;
        if let Some(d) = dbg {
            d.weight = weight;
            d.thrust = thrust;
            d.buoyancy = buoyancy;
            d.drag = drag;
            d.total = total;
        }
        total
    }

    fn integrate_velocity(
        &mut self,
        ballast_volume: f32,
        fan_speed: f32,
        orientation: Quat,
        mut dbg: Option<&mut DepthStepDebug>,
    ) {
        let mass_eff = self.constants.effective_mass(ballast_volume);
        let force = self.total_force(ballast_volume, fan_speed, orientation, dbg.as_deref_mut());
        self.state.acceleration = force / mass_eff;
        self.state.velocity += self.state.acceleration * self.constants.time_step;
        if let Some(d) = dbg {
            d.mass_eff = mass_eff;
            d.passes += 1;
        }
    }

    /// Empty-hull weight balanced by the hydrostatic term at the current height.
    fn vertical_motion_should_stop(&self) -> bool {
        let weight = force_weight(&self.constants, 0.0);
        let pressure = force_pressure(&self.constants, self.state.position);
        eq_hundredths(weight.y, pressure.y)
    }

    fn check_depth_guard(&mut self) -> Option<DepthEvent> {
        if self.state.suspended {
            return None;
        }
        let depth = self.depth();
        let warning = self.constants.warning_depth;
        if depth > warning && depth < warning + 1.0 {
            self.state.suspended = true;
            self.state.velocity = Vec3::ZERO;
            self.state.acceleration = Vec3::ZERO;
            return Some(DepthEvent::WarningBandEntered { depth });
        }
        if depth < 0.0 {
            self.state.position.y = 0.0;
            self.state.velocity = Vec3::ZERO;
            self.state.acceleration = Vec3::ZERO;
            return Some(DepthEvent::SurfaceReached);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_at(depth: f32) -> DepthDynamics {
        DepthDynamics::with_state(LinearConstants::default(), LinearState::at_depth(depth))
    }

    #[test]
    fn empty_tanks_rise() {
        let mut sub = sub_at(50.0);
        sub.advance(0.0, 0.0, Quat::IDENTITY);
        // (15686.19 - 13675.14) / 1394 ≈ 1.4427 m/s², drag barely dents it
        let a = sub.state().acceleration.y;
        assert!((a - 1.4427).abs() < 0.01, "a.y = {}", a);
        assert!(sub.state().velocity.y > 0.0);
    }

    #[test]
    fn ballast_past_neutral_sinks() {
        let mut sub = sub_at(50.0);
        let neutral = sub.neutral_ballast_volume();
        sub.advance(neutral + 0.05, 0.0, Quat::IDENTITY);
        assert!(sub.state().acceleration.y < 0.0, "a.y = {}", sub.state().acceleration.y);
        assert!(sub.depth() > 50.0);
    }

    #[test]
    fn double_pass_integrates_twice() {
        let mut single = DepthDynamics::with_state(
            LinearConstants { velocity_passes: VelocityPasses::Single, ..LinearConstants::default() },
            LinearState::at_depth(50.0),
        );
        let mut double = sub_at(50.0);
        let mut dbg = DepthStepDebug::default();
        single.advance(0.0, 0.0, Quat::IDENTITY);
        double.advance_dbg(0.0, 0.0, Quat::IDENTITY, Some(&mut dbg));
        let vs = single.state().velocity.y;
        let vd = double.state().velocity.y;
        assert_eq!(dbg.passes, 2);
        assert!((vs - 1.4427 * 0.05).abs() < 1e-3, "single v.y = {}", vs);
        assert!(vd > 1.9 * vs && vd < 2.0 * vs, "single={}, double={}", vs, vd);
    }

    #[test]
    fn stop_condition_zeroes_vertical_motion() {
        // ρ·g·1.36 matches the empty-hull weight to the hundredth
        let state = LinearState {
            position: Vec3::new(0.0, -1.36, 0.0),
            velocity: Vec3::new(0.0, -0.5, 0.0),
            ..LinearState::default()
        };
        let mut sub = DepthDynamics::with_state(LinearConstants::default(), state);
        let mut dbg = DepthStepDebug::default();
        sub.advance_dbg(0.0, 0.0, Quat::IDENTITY, Some(&mut dbg));
        assert!(dbg.vertical_stop);
        assert_eq!(dbg.passes, 1);
        assert_eq!(sub.state().velocity.y, 0.0);
        assert_eq!(sub.state().acceleration.y, 0.0);
        assert_eq!(sub.state().position.y, -1.36);
    }

    #[test]
    fn thrust_follows_orientation() {
        let mut ahead = sub_at(50.0);
        let neutral = ahead.neutral_ballast_volume();
        ahead.advance(neutral, 1.0, Quat::IDENTITY);
        assert!(ahead.state().velocity.z > 0.0);
        assert!(ahead.state().velocity.x.abs() < 1e-6);

        let mut turned = sub_at(50.0);
        turned.advance(neutral, 1.0, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(turned.state().velocity.x > 0.0);
        assert!(turned.state().velocity.z.abs() < 1e-6);
    }

    #[test]
    fn negative_ballast_is_treated_as_empty() {
        let mut a = sub_at(50.0);
        let mut b = sub_at(50.0);
        a.advance(-3.0, 0.0, Quat::IDENTITY);
        b.advance(0.0, 0.0, Quat::IDENTITY);
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn auto_depth_holds_baseline_at_target() {
        let sub = sub_at(10.0);
        let cmd = sub.auto_depth_ballast_command(10.0).unwrap();
        assert!((cmd - 20.0).abs() < 1e-4, "cmd = {}", cmd);
    }

    #[test]
    fn auto_depth_from_surface() {
        let sub = sub_at(0.0);
        assert_eq!(sub.auto_depth_ballast_command(10.0), Some(30.0));
        assert_eq!(sub.auto_depth_ballast_command(-1.0), None);
        assert_eq!(sub.auto_depth_ballast_command(f32::NAN), None);
    }

    #[test]
    fn auto_depth_clamps_at_empty() {
        let sub = sub_at(50.0);
        assert_eq!(sub.auto_depth_ballast_command(10.0), Some(0.0));
    }

    #[test]
    fn auto_depth_damps_with_vertical_velocity() {
        let state = LinearState {
            velocity: Vec3::new(0.0, -1.5, 0.0),
            ..LinearState::at_depth(10.0)
        };
        let sub = DepthDynamics::with_state(LinearConstants::default(), state);
        // Sinking at 1.5 m/s vents 3 units of ballast
        let cmd = sub.auto_depth_ballast_command(10.0).unwrap();
        assert!((cmd - 17.0).abs() < 1e-4, "cmd = {}", cmd);
    }

    #[test]
    fn resume_reports_previous_flag() {
        let state = LinearState { suspended: true, ..LinearState::at_depth(210.5) };
        let mut sub = DepthDynamics::with_state(LinearConstants::default(), state);
        assert!(sub.is_suspended());
        assert!(sub.resume());
        assert!(!sub.resume());
    }
}
