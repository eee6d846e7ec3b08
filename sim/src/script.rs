//! Scripted operator input, replayed by frame number.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::panel::{ControlPanel, Key};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub frame: u64,
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptAction {
    Key { key: Key, pressed: bool },
    Torque { value: f32 },
    FanSpeed { value: f32 },
    Ballast { value: f32 },
    DesiredDepth { value: f32 },
}

impl ScriptAction {
    pub fn apply(&self, panel: &mut ControlPanel) {
        match *self {
            ScriptAction::Key { key, pressed } => panel.apply_key(key, pressed),
            ScriptAction::Torque { value } => panel.set_torque(value),
            ScriptAction::FanSpeed { value } => panel.set_fan_speed(value),
            ScriptAction::Ballast { value } => panel.set_ballast(value),
            ScriptAction::DesiredDepth { value } => panel.set_desired_depth(value),
        }
    }
}

/// Pending script events, sorted by frame.
#[derive(Resource, Debug, Default)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
    next: usize,
}

impl InputScript {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        // Stable sort keeps same-frame events in file order
        events.sort_by_key(|e| e.frame);
        Self { events, next: 0 }
    }

    /// Apply every event due at or before `frame`. Returns how many fired.
    pub fn apply_due(&mut self, frame: u64, panel: &mut ControlPanel) -> usize {
        let start = self.next;
        while let Some(ev) = self.events.get(self.next) {
            if ev.frame > frame {
                break;
            }
            ev.action.apply(panel);
            self.next += 1;
        }
        self.next - start
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(frame: u64, action: ScriptAction) -> ScriptEvent {
        ScriptEvent { frame, action }
    }

    #[test]
    fn fires_in_frame_order() {
        let mut script = InputScript::new(vec![
            ev(5, ScriptAction::Key { key: Key::W, pressed: false }),
            ev(2, ScriptAction::Key { key: Key::W, pressed: true }),
            ev(2, ScriptAction::Torque { value: 50.0 }),
        ]);
        let mut panel = ControlPanel::default();
        assert_eq!(script.apply_due(1, &mut panel), 0);
        assert_eq!(script.apply_due(2, &mut panel), 2);
        assert_eq!(panel.fan_speed, 3.0);
        assert_eq!(panel.torque, 50.0);
        assert_eq!(script.remaining(), 1);
        assert_eq!(script.apply_due(9, &mut panel), 1);
        assert_eq!(panel.fan_speed, 0.0);
        assert_eq!(script.remaining(), 0);
    }

    #[test]
    fn late_start_catches_up() {
        let mut script = InputScript::new(vec![
            ev(1, ScriptAction::DesiredDepth { value: 25.0 }),
            ev(3, ScriptAction::Ballast { value: 60.0 }),
        ]);
        let mut panel = ControlPanel::default();
        assert_eq!(script.apply_due(10, &mut panel), 2);
        // Manual ballast after the depth request switches auto-depth back off
        assert_eq!(panel.ballast, 60.0);
        assert!(!panel.auto_depth_enabled());
    }
}
