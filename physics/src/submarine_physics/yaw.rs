use super::terms::{torque_yaw_drag, yaw_acceleration};
use super::types::{YawState, YawStepDebug};
use crate::YawConstants;

/// Single rotational degree of freedom (heading) driven by applied torque.
#[derive(Debug, Clone)]
pub struct YawDynamics {
    constants: YawConstants,
    state: YawState,
}

impl YawDynamics {
    pub fn new(constants: YawConstants) -> Self {
        Self::with_state(constants, YawState::default())
    }

    pub fn with_state(constants: YawConstants, state: YawState) -> Self {
        Self { constants, state }
    }

    pub fn constants(&self) -> &YawConstants {
        &self.constants
    }

    pub fn state(&self) -> &YawState {
        &self.state
    }

    /// Advance one fixed step and return the new heading (rad).
    pub fn advance(&mut self, applied_torque: f32, ballast_volume: f32) -> f32 {
        self.advance_dbg(applied_torque, ballast_volume, None)
    }

    /// Variant of `advance` that fills out an optional debug telemetry struct.
    pub fn advance_dbg(
        &mut self,
        applied_torque: f32,
        ballast_volume: f32,
        dbg: Option<&mut YawStepDebug>,
    ) -> f32 {
        let ballast_volume = ballast_volume.max(0.0);
        let c = &self.constants;
        let dt = c.time_step;
        let omega_prev = self.state.angular_velocity;

        let torque_drag = torque_yaw_drag(c, omega_prev);
        let torque_net = applied_torque + torque_drag;
        let mass_eff = c.effective_mass(ballast_volume);
        let alpha = yaw_acceleration(c, torque_net, mass_eff);

        // Position term uses the previous rate, giving θ its second-order update.
        let omega = omega_prev + alpha * dt;
        let heading = self.state.heading + omega_prev * dt + 0.5 * alpha * dt * dt;

        self.state = YawState {
            heading,
            angular_velocity: omega,
            angular_acceleration: alpha,
            elapsed: self.state.elapsed + dt,
        };

        if let Some(d) = dbg {
            *d = YawStepDebug {
                dt,
                torque_applied: applied_torque,
                torque_drag,
                torque_net,
                mass_eff,
                yaw_acc: alpha,
                yaw_rate: omega,
                heading,
            };
        }
        heading
    }
}
