use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use tracing::warn;

pub mod args;
pub mod config;
pub mod panel;
pub mod script;
pub mod submarine;

pub use args::Args;
pub use config::{load_config, Config};
pub use panel::{ControlPanel, Key};
pub use script::{InputScript, ScriptAction, ScriptEvent};
pub use submarine::{
    DepthWarning, PendingAcknowledgment, SimFrame, SimSettings, SubModel, SubTelemetry, Submarine,
    Surfaced,
};

use submarine::InitialSub;

/// Operator input: scripted panel changes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSet;

/// Physics tick and the reactions to its events.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimSet;

/// Headless simulation app driven by a fixed-rate schedule runner.
pub fn build_sim_app(cfg: Config) -> App {
    let mut app = App::new();
    let wait = cfg.run.frame_period().unwrap_or_else(|| {
        warn!(rate_hz = cfg.run.frame_rate_hz, "Unusable frame rate, running at 60 Hz");
        Duration::from_secs_f64(1.0 / 60.0)
    });
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(wait)));
    install_sim(&mut app, cfg);
    app
}

/// Same systems without the runner, for callers that drive `App::update` by hand.
pub fn build_stepped_app(cfg: Config) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    install_sim(&mut app, cfg);
    app
}

fn install_sim(app: &mut App, cfg: Config) {
    app.insert_resource(SimSettings::from_config(&cfg))
        .insert_resource(InitialSub::from_config(&cfg))
        .insert_resource(cfg.panel.clone())
        .insert_resource(InputScript::new(cfg.script))
        .init_resource::<SimFrame>()
        .init_resource::<SubTelemetry>()
        .init_resource::<PendingAcknowledgment>()
        .add_event::<DepthWarning>()
        .add_event::<Surfaced>()
        .configure_sets(Update, (InputSet, SimSet).chain())
        .add_systems(Startup, submarine::spawn_submarine)
        .add_systems(
            Update,
            (submarine::advance_frame, submarine::apply_script)
                .chain()
                .in_set(InputSet),
        )
        .add_systems(
            Update,
            (
                submarine::step_submarine,
                submarine::queue_depth_warnings,
                submarine::acknowledge_warnings,
                submarine::log_telemetry,
                submarine::stop_after_frames,
            )
                .chain()
                .in_set(SimSet),
        );
}
