mod util;
mod types;
mod terms;
mod yaw;
mod depth;
mod model;

pub use types::{
    ControlInputs, DepthEvent, DepthStep, DepthStepDebug, LinearState, TickOutput, YawState,
    YawStepDebug,
};
pub use yaw::YawDynamics;
pub use depth::DepthDynamics;
pub use model::SubmarineModel;
