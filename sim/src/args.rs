use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "sub-sim")]
#[command(about = "Headless submarine dive simulator", long_about = None)]
pub struct Args {
    /// Path to the TOML config. Missing file means built-in defaults.
    #[arg(long, default_value = "sim.toml")]
    pub config: PathBuf,
    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,
    /// Frame rate of the headless loop
    #[arg(long)]
    pub rate_hz: Option<f64>,
}

impl Args {
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(frames) = self.frames {
            cfg.run.max_frames = Some(frames);
        }
        if let Some(hz) = self.rate_hz.filter(|hz| *hz > 0.0) {
            cfg.run.frame_rate_hz = hz;
        }
    }
}
