//! Physics core of the submarine dive simulator.
//!
//! Two fixed-step integrators: `YawDynamics` turns the hull from an applied
//! torque, `DepthDynamics` moves it under weight, buoyancy, thrust and drag and
//! guards the dive depth. `SubmarineModel` steps both in frame order. The crate
//! has no rendering or app-framework types; callers copy the outputs onto
//! whatever transform they draw.

mod clock;
pub use clock::{FixedStepper, StepPolicy};

mod constants;
pub use constants::{presets, LinearConstants, VelocityPasses, YawConstants};

mod error;
pub use error::ConstantsError;

pub mod submarine_physics;
pub use submarine_physics::{
    ControlInputs, DepthDynamics, DepthEvent, DepthStep, DepthStepDebug, LinearState,
    SubmarineModel, TickOutput, YawDynamics, YawState, YawStepDebug,
};

pub use bevy_math::{Quat, Vec3};
