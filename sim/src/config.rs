use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sub_physics::{LinearConstants, StepPolicy, YawConstants};
use tracing::warn;

use crate::panel::ControlPanel;
use crate::script::ScriptEvent;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: RunConfig,
    pub yaw: YawConstants,
    pub linear: LinearConstants,
    /// Panel settings at startup.
    pub panel: ControlPanel,
    pub acknowledge: AckConfig,
    pub script: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frame_rate_hz: f64,
    pub step_policy: StepPolicy,
    /// Exit after this many frames; `None` runs until killed.
    pub max_frames: Option<u64>,
    /// Telemetry log interval; 0 disables it.
    pub telemetry_every_frames: u64,
    pub start_depth: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 60.0,
            step_policy: StepPolicy::PerFrame,
            max_frames: None,
            telemetry_every_frames: 60,
            start_depth: 0.0,
        }
    }
}

impl RunConfig {
    /// Wall-clock period of one frame, `None` when the rate has no
    /// representable period.
    pub fn frame_period(&self) -> Option<Duration> {
        if !(self.frame_rate_hz.is_finite() && self.frame_rate_hz > 0.0) {
            return None;
        }
        Duration::try_from_secs_f64(1.0 / self.frame_rate_hz).ok()
    }
}

/// Stand-in for the operator dismissing a depth warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AckConfig {
    /// Frames between the warning and the resume; `None` never resumes.
    pub after_frames: Option<u64>,
}

impl Default for AckConfig {
    fn default() -> Self {
        Self { after_frames: Some(30) }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s).context("parsing simulation config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.yaw.validate().context("invalid yaw constants")?;
        self.linear.validate().context("invalid linear constants")?;
        if self.run.frame_period().is_none() {
            bail!(
                "run.frame_rate_hz must be positive with a representable period, got {}",
                self.run.frame_rate_hz
            );
        }
        if let StepPolicy::RealTime { max_steps_per_frame: 0 } = self.run.step_policy {
            bail!("run.step_policy.max_steps_per_frame must be at least 1");
        }
        if self.run.start_depth < 0.0 {
            bail!("run.start_depth must be non-negative, got {}", self.run.start_depth);
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Config::from_toml_str(&text).with_context(|| format!("loading config {}", path.display()))
}
