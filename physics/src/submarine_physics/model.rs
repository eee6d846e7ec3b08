use bevy_math::Quat;

use super::depth::DepthDynamics;
use super::types::{ControlInputs, DepthEvent, TickOutput};
use super::util::heading_to_quat;
use super::yaw::YawDynamics;
use crate::{FixedStepper, LinearConstants, StepPolicy, YawConstants};

/// Both integrators of one submarine, stepped in frame order: heading first,
/// then linear motion along the new heading, then the auto-depth law.
#[derive(Debug, Clone)]
pub struct SubmarineModel {
    yaw: YawDynamics,
    depth: DepthDynamics,
    yaw_clock: FixedStepper,
    depth_clock: FixedStepper,
}

impl SubmarineModel {
    pub fn new(yaw: YawConstants, linear: LinearConstants) -> Self {
        Self::from_parts(YawDynamics::new(yaw), DepthDynamics::new(linear))
    }

    pub fn from_parts(yaw: YawDynamics, depth: DepthDynamics) -> Self {
        let yaw_clock = FixedStepper::new(yaw.constants().time_step);
        let depth_clock = FixedStepper::new(depth.constants().time_step);
        Self { yaw, depth, yaw_clock, depth_clock }
    }

    pub fn yaw(&self) -> &YawDynamics {
        &self.yaw
    }

    pub fn depth(&self) -> &DepthDynamics {
        &self.depth
    }

    pub fn heading(&self) -> f32 {
        self.yaw.state().heading
    }

    pub fn orientation(&self) -> Quat {
        heading_to_quat(self.heading())
    }

    /// One step of each integrator.
    pub fn tick(&mut self, inputs: &ControlInputs) -> TickOutput {
        self.run(inputs, 1, 1)
    }

    /// Sub-step each integrator to `elapsed` seconds of real time.
    pub fn tick_elapsed(&mut self, inputs: &ControlInputs, elapsed: f32, max_steps: u32) -> TickOutput {
        let yaw_steps = self.yaw_clock.steps_for(elapsed, max_steps);
        let depth_steps = self.depth_clock.steps_for(elapsed, max_steps);
        self.run(inputs, yaw_steps, depth_steps)
    }

    pub fn advance(&mut self, inputs: &ControlInputs, policy: StepPolicy, elapsed: f32) -> TickOutput {
        match policy {
            StepPolicy::PerFrame => self.tick(inputs),
            StepPolicy::RealTime { max_steps_per_frame } => {
                self.tick_elapsed(inputs, elapsed, max_steps_per_frame)
            }
        }
    }

    /// Clear a depth-guard suspension after the operator acknowledged it.
    pub fn resume(&mut self) -> bool {
        self.depth.resume()
    }

    fn run(&mut self, inputs: &ControlInputs, yaw_steps: u32, depth_steps: u32) -> TickOutput {
        for _ in 0..yaw_steps {
            self.yaw.advance(inputs.torque, inputs.ballast_volume);
        }
        let orientation = self.orientation();

        let mut event: Option<DepthEvent> = None;
        for _ in 0..depth_steps {
            let step = self.depth.advance(inputs.ballast_volume, inputs.fan_speed, orientation);
            // A warning outranks a surface clamp from an earlier sub-step.
            match (event, step.event) {
                (_, Some(e @ DepthEvent::WarningBandEntered { .. })) => event = Some(e),
                (None, Some(e)) => event = Some(e),
                _ => {}
            }
        }

        let ballast_command = inputs
            .desired_depth
            .and_then(|d| self.depth.auto_depth_ballast_command(d));

        let state = self.depth.state();
        TickOutput {
            heading: self.heading(),
            position: state.position,
            suspended: state.suspended,
            depth: state.depth(),
            event,
            ballast_command,
        }
    }
}
