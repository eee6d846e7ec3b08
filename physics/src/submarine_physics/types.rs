use bevy_math::Vec3;

/// Heading state of the hull.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YawState {
    /// Heading θ (rad). Positive turns the nose from +Z toward +X.
    pub heading: f32,
    /// ω (rad/s)
    pub angular_velocity: f32,
    /// α (rad/s²), recomputed every tick before θ and ω advance.
    pub angular_acceleration: f32,
    /// Simulated seconds since construction.
    pub elapsed: f32,
}

/// Linear state of the hull in world space (+Y up, depth = -position.y).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearState {
    pub velocity: Vec3,
    pub position: Vec3,
    pub acceleration: Vec3,
    /// Set by the depth guard. While set, velocity and acceleration stay zero
    /// and position is frozen until `resume`.
    pub suspended: bool,
}

impl LinearState {
    #[inline]
    pub fn depth(&self) -> f32 {
        -self.position.y
    }

    /// At rest at the given depth.
    pub fn at_depth(depth: f32) -> Self {
        Self {
            position: Vec3::new(0.0, -depth, 0.0),
            ..Self::default()
        }
    }
}

/// Operator commands in physics units, read once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInputs {
    /// Applied yaw torque (N·m). Negative turns the other way.
    pub torque: f32,
    /// Water in the ballast tanks (m³), non-negative.
    pub ballast_volume: f32,
    /// Signed throttle as handed to the thrust model. Any sign convention of
    /// the operator surface is applied before it gets here.
    pub fan_speed: f32,
    /// Depth (m) the auto-depth controller should hold, `None` when disabled.
    pub desired_depth: Option<f32>,
}

/// Notifications raised by the depth guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthEvent {
    /// Hull entered the warning band and motion was suspended. The operator
    /// must acknowledge before `resume` is called.
    WarningBandEntered { depth: f32 },
    /// Hull broke the surface and was clamped back to depth zero.
    SurfaceReached,
}

/// Result of one `DepthDynamics::advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStep {
    pub position: Vec3,
    pub suspended: bool,
    pub event: Option<DepthEvent>,
}

/// Result of one `SubmarineModel` tick, ready to apply to the rendered hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub heading: f32,
    pub position: Vec3,
    pub suspended: bool,
    pub depth: f32,
    pub event: Option<DepthEvent>,
    /// Ballast command (panel units) from the auto-depth controller.
    pub ballast_command: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YawStepDebug {
    pub dt: f32,
    pub torque_applied: f32,
    pub torque_drag: f32,
    pub torque_net: f32,
    pub mass_eff: f32,
    pub yaw_acc: f32,
    pub yaw_rate: f32,
    pub heading: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DepthStepDebug {
    pub dt: f32,
    pub ballast_volume: f32,
    pub fan_speed: f32,
    // Forces (world, N) from the last evaluated pass
    pub weight: Vec3,
    pub thrust: Vec3,
    pub buoyancy: Vec3,
    pub drag: Vec3,
    pub total: Vec3,
    /// Hydrostatic term, only used by the stop condition.
    pub pressure: Vec3,
    pub mass_eff: f32,
    pub passes: u8,
    pub vertical_stop: bool,
    pub depth: f32,
}
