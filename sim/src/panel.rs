use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use sub_physics::ControlInputs;

pub const TORQUE_LIMIT: f32 = 200.0;
pub const FAN_SPEED_LIMIT: f32 = 10.0;
pub const BALLAST_MAX: f32 = 100.0;
pub const DESIRED_DEPTH_MAX: f32 = 100.0;
/// Desired-depth value meaning "auto-depth off".
pub const AUTO_DEPTH_OFF: f32 = -1.0;
/// Panel ballast units to cubic metres of tank water.
pub const BALLAST_TO_M3: f32 = 0.01;
/// Ballast setting that keeps the hull neutrally buoyant.
pub const NEUTRAL_BALLAST: f32 = 20.0;

const KEY_FAN_SPEED: f32 = 3.0;
const KEY_TORQUE: f32 = 100.0;
const KEY_BALLAST_DIVE: f32 = 40.0;
const KEY_BALLAST_BLOW: f32 = 0.0;

/// Keyboard controls of the operator station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    S,
    A,
    D,
    Shift,
    Space,
}

/// Operator settings in panel units. `to_inputs` converts them for the
/// physics core.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlPanel {
    /// Yaw torque (N·m), ±200
    pub torque: f32,
    /// Tank water, 0..100 (hundredths of a cubic metre)
    pub ballast: f32,
    /// Fan speed, ±10. Positive drives the hull toward its bow (-Z).
    pub fan_speed: f32,
    /// Depth to hold (m), 0..100, or `AUTO_DEPTH_OFF`.
    pub desired_depth: f32,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            torque: 0.0,
            ballast: NEUTRAL_BALLAST,
            fan_speed: 0.0,
            desired_depth: AUTO_DEPTH_OFF,
        }
    }
}

impl ControlPanel {
    pub fn set_torque(&mut self, value: f32) {
        self.torque = value.clamp(-TORQUE_LIMIT, TORQUE_LIMIT);
    }

    pub fn set_fan_speed(&mut self, value: f32) {
        self.fan_speed = value.clamp(-FAN_SPEED_LIMIT, FAN_SPEED_LIMIT);
    }

    /// Manual ballast change. Takes the helm back from auto-depth.
    pub fn set_ballast(&mut self, value: f32) {
        self.ballast = value.clamp(0.0, BALLAST_MAX);
        self.desired_depth = AUTO_DEPTH_OFF;
    }

    /// Negative values switch auto-depth off.
    pub fn set_desired_depth(&mut self, value: f32) {
        self.desired_depth = if value < 0.0 {
            AUTO_DEPTH_OFF
        } else {
            value.min(DESIRED_DEPTH_MAX)
        };
    }

    pub fn auto_depth_enabled(&self) -> bool {
        self.desired_depth >= 0.0
    }

    /// Ballast written by the auto-depth controller. Only the lower bound
    /// holds here; the controller may ask for more than the slider offers.
    pub fn apply_ballast_command(&mut self, command: f32) {
        self.ballast = command.max(0.0);
    }

    pub fn apply_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::W => self.fan_speed = if pressed { KEY_FAN_SPEED } else { 0.0 },
            Key::S => self.fan_speed = if pressed { -KEY_FAN_SPEED } else { 0.0 },
            Key::D => self.torque = if pressed { -KEY_TORQUE } else { 0.0 },
            Key::A => self.torque = if pressed { KEY_TORQUE } else { 0.0 },
            Key::Shift | Key::Space => {
                if pressed {
                    self.desired_depth = AUTO_DEPTH_OFF;
                    self.ballast = if key == Key::Shift { KEY_BALLAST_DIVE } else { KEY_BALLAST_BLOW };
                } else {
                    self.ballast = NEUTRAL_BALLAST;
                }
            }
        }
    }

    /// Physics-unit view of the panel. Fan speed is negated here so a positive
    /// setting drives the hull along -Z, the way the model faces.
    pub fn to_inputs(&self) -> ControlInputs {
        ControlInputs {
            torque: self.torque,
            ballast_volume: self.ballast.max(0.0) * BALLAST_TO_M3,
            fan_speed: -self.fan_speed,
            desired_depth: self.auto_depth_enabled().then_some(self.desired_depth),
        }
    }
}
