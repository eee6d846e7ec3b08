use bevy::prelude::{AppExit, Commands, EventReader, EventWriter, Query, Res, ResMut, Time, Transform, With};
use bevy_ecs::prelude::{Component, Event, Resource};
use sub_physics::{
    DepthDynamics, DepthEvent, LinearState, Quat, StepPolicy, SubmarineModel, Vec3, YawDynamics,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::panel::ControlPanel;
use crate::script::InputScript;

#[derive(Component)]
pub struct Submarine;

#[derive(Component, Debug, Clone)]
pub struct SubModel(pub SubmarineModel);

/// Run settings the systems read every frame.
#[derive(Resource, Debug, Clone)]
pub struct SimSettings {
    pub step_policy: StepPolicy,
    pub max_frames: Option<u64>,
    pub telemetry_every_frames: u64,
    pub acknowledge_after_frames: Option<u64>,
}

impl SimSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            step_policy: cfg.run.step_policy,
            max_frames: cfg.run.max_frames,
            telemetry_every_frames: cfg.run.telemetry_every_frames,
            acknowledge_after_frames: cfg.acknowledge.after_frames,
        }
    }
}

/// Frames simulated so far; the first `Update` runs frame 1.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimFrame(pub u64);

/// Latest outputs for display.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SubTelemetry {
    pub frame: u64,
    pub heading: f32,
    pub position: Vec3,
    pub depth: f32,
    pub suspended: bool,
    pub ballast: f32,
    pub fan_speed: f32,
}

/// Raised when the hull enters the warning band and motion is suspended.
#[derive(Event, Debug, Clone, Copy)]
pub struct DepthWarning {
    pub frame: u64,
    pub depth: f32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct Surfaced {
    pub frame: u64,
}

/// Warning waiting for the operator.
#[derive(Resource, Debug, Default)]
pub struct PendingAcknowledgment {
    pub raised_at: Option<u64>,
    pub warnings: u64,
    pub resumes: u64,
}

#[derive(Resource, Debug, Clone)]
pub(crate) struct InitialSub {
    pub model: SubmarineModel,
}

impl InitialSub {
    pub fn from_config(cfg: &Config) -> Self {
        let yaw = YawDynamics::new(cfg.yaw.clone());
        let depth = DepthDynamics::with_state(
            cfg.linear.clone(),
            LinearState::at_depth(cfg.run.start_depth),
        );
        Self { model: SubmarineModel::from_parts(yaw, depth) }
    }
}

pub(crate) fn spawn_submarine(mut commands: Commands, initial: Res<InitialSub>) {
    let model = initial.model.clone();
    let position = model.depth().state().position;
    info!(?position, "Spawning submarine");
    commands.spawn((
        Submarine,
        Transform::from_translation(position).with_rotation(model.orientation()),
        SubModel(model),
    ));
    commands.remove_resource::<InitialSub>();
}

pub(crate) fn advance_frame(mut frame: ResMut<SimFrame>) {
    frame.0 += 1;
}

pub(crate) fn apply_script(
    frame: Res<SimFrame>,
    mut script: ResMut<InputScript>,
    mut panel: ResMut<ControlPanel>,
) {
    let fired = script.apply_due(frame.0, &mut panel);
    if fired > 0 {
        debug!(frame = frame.0, fired, panel = ?*panel, "Applied scripted input");
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn step_submarine(
    time: Res<Time>,
    frame: Res<SimFrame>,
    settings: Res<SimSettings>,
    mut panel: ResMut<ControlPanel>,
    mut telemetry: ResMut<SubTelemetry>,
    mut q_sub: Query<(&mut SubModel, &mut Transform), With<Submarine>>,
    mut warnings: EventWriter<DepthWarning>,
    mut surfaced: EventWriter<Surfaced>,
) {
    let inputs = panel.to_inputs();
    let elapsed = time.delta_secs();

    for (mut model, mut transform) in &mut q_sub {
        let out = model.0.advance(&inputs, settings.step_policy, elapsed);

        transform.translation = out.position;
        transform.rotation = Quat::from_rotation_y(out.heading);

        match out.event {
            Some(DepthEvent::WarningBandEntered { depth }) => {
                warnings.write(DepthWarning { frame: frame.0, depth });
            }
            Some(DepthEvent::SurfaceReached) => {
                surfaced.write(Surfaced { frame: frame.0 });
            }
            None => {}
        }

        if let Some(command) = out.ballast_command {
            panel.apply_ballast_command(command);
        }

        *telemetry = SubTelemetry {
            frame: frame.0,
            heading: out.heading,
            position: out.position,
            depth: out.depth,
            suspended: out.suspended,
            ballast: panel.ballast,
            fan_speed: panel.fan_speed,
        };
    }
}

pub(crate) fn queue_depth_warnings(
    mut warnings: EventReader<DepthWarning>,
    mut surfaced: EventReader<Surfaced>,
    mut pending: ResMut<PendingAcknowledgment>,
) {
    for w in warnings.read() {
        warn!(
            frame = w.frame,
            depth = w.depth,
            "Descending further may expose the submarine to excessive pressure; movement suspended until acknowledged"
        );
        pending.warnings += 1;
        pending.raised_at.get_or_insert(w.frame);
    }
    for s in surfaced.read() {
        debug!(frame = s.frame, "Submarine at the surface");
    }
}

pub(crate) fn acknowledge_warnings(
    frame: Res<SimFrame>,
    settings: Res<SimSettings>,
    mut pending: ResMut<PendingAcknowledgment>,
    mut q_sub: Query<&mut SubModel, With<Submarine>>,
) {
    let (Some(raised_at), Some(after)) = (pending.raised_at, settings.acknowledge_after_frames)
    else {
        return;
    };
    if frame.0.saturating_sub(raised_at) < after {
        return;
    }
    for mut model in &mut q_sub {
        if model.0.resume() {
            info!(frame = frame.0, "Movement resumed");
        }
    }
    pending.raised_at = None;
    pending.resumes += 1;
}

pub(crate) fn log_telemetry(settings: Res<SimSettings>, telemetry: Res<SubTelemetry>) {
    let every = settings.telemetry_every_frames;
    if every == 0 || telemetry.frame == 0 || telemetry.frame % every != 0 {
        return;
    }
    info!(
        frame = telemetry.frame,
        heading = telemetry.heading,
        depth = telemetry.depth,
        x = telemetry.position.x,
        z = telemetry.position.z,
        suspended = telemetry.suspended,
        ballast = telemetry.ballast,
        fan_speed = telemetry.fan_speed,
        "Submarine telemetry"
    );
}

pub(crate) fn stop_after_frames(
    frame: Res<SimFrame>,
    settings: Res<SimSettings>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(max) = settings.max_frames {
        if frame.0 >= max {
            info!(frames = frame.0, "Frame limit reached, exiting");
            exit.write(AppExit::Success);
        }
    }
}
