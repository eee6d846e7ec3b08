use serde::{Deserialize, Serialize};

use crate::error::ConstantsError;

/// Physical parameters of the heading model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YawConstants {
    pub empty_mass: f32,
    /// Moment of inertia about the vertical axis (kg·m²). The torque law does
    /// not consume it; `inertia_scale` carries the calibrated factor instead.
    pub moment_of_inertia: f32,
    pub water_density: f32,
    pub gravity: f32,
    pub drag_coefficient: f32,
    /// Projected areas (m²); index 0 resists rotation.
    pub projected_areas: [f32; 3],
    pub lever_arm: f32,
    pub inertia_scale: f32,
    pub time_step: f32,
}

/// Selects how many velocity integrations `DepthDynamics` performs per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityPasses {
    /// Integrate once, test the stop condition, then integrate again with the
    /// drag recomputed from the updated velocity. Matches the observed
    /// behaviour of the dive model, at the cost of doubling the step.
    #[default]
    Double,
    /// Integrate once and only apply the stop condition.
    Single,
}

/// Physical parameters of the linear (dive and surge) model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConstants {
    pub empty_mass: f32,
    pub engine_power: f32,
    pub water_density: f32,
    pub gravity: f32,
    pub drag_coefficient: f32,
    /// Projected areas (m²) per world axis x, y, z.
    pub projected_areas: [f32; 3],
    pub time_step: f32,
    /// Displaced hull volume (m³). Ballast water does not change it.
    pub displaced_volume: f32,
    pub max_depth: f32,
    /// Lower edge of the one-metre band that triggers the depth guard.
    pub warning_depth: f32,
    /// Ballast command (panel units, 0..100) the auto-depth law holds at zero error.
    pub auto_depth_baseline: f32,
    pub auto_depth_velocity_gain: f32,
    pub velocity_passes: VelocityPasses,
}

impl Default for YawConstants {
    fn default() -> Self {
        presets::research_sub_yaw()
    }
}

impl Default for LinearConstants {
    fn default() -> Self {
        presets::research_sub_linear()
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConstantsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConstantsError::NotPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConstantsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConstantsError::Negative { field, value })
    }
}

impl YawConstants {
    /// Check that every parameter keeps the step a total function.
    pub fn validate(&self) -> Result<(), ConstantsError> {
        require_positive("yaw.empty_mass", self.empty_mass)?;
        require_positive("yaw.moment_of_inertia", self.moment_of_inertia)?;
        require_positive("yaw.water_density", self.water_density)?;
        require_positive("yaw.gravity", self.gravity)?;
        require_positive("yaw.time_step", self.time_step)?;
        require_non_negative("yaw.drag_coefficient", self.drag_coefficient)?;
        for area in self.projected_areas {
            require_non_negative("yaw.projected_areas", area)?;
        }
        require_non_negative("yaw.lever_arm", self.lever_arm)?;
        require_non_negative("yaw.inertia_scale", self.inertia_scale)?;
        Ok(())
    }

    /// Hull plus ballast water mass (kg).
    #[inline]
    pub fn effective_mass(&self, ballast_volume: f32) -> f32 {
        self.empty_mass + ballast_volume * self.water_density
    }
}

impl LinearConstants {
    pub fn validate(&self) -> Result<(), ConstantsError> {
        require_positive("linear.empty_mass", self.empty_mass)?;
        require_positive("linear.water_density", self.water_density)?;
        require_positive("linear.gravity", self.gravity)?;
        require_positive("linear.time_step", self.time_step)?;
        require_positive("linear.displaced_volume", self.displaced_volume)?;
        require_non_negative("linear.engine_power", self.engine_power)?;
        require_non_negative("linear.drag_coefficient", self.drag_coefficient)?;
        for area in self.projected_areas {
            require_non_negative("linear.projected_areas", area)?;
        }
        require_non_negative("linear.warning_depth", self.warning_depth)?;
        require_non_negative("linear.auto_depth_velocity_gain", self.auto_depth_velocity_gain)?;
        if self.warning_depth + 1.0 > self.max_depth {
            return Err(ConstantsError::WarningPastMaxDepth {
                warning_depth: self.warning_depth,
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn effective_mass(&self, ballast_volume: f32) -> f32 {
        self.empty_mass + ballast_volume * self.water_density
    }

    /// Ballast volume (m³) at which weight equals buoyancy.
    pub fn neutral_ballast_volume(&self) -> f32 {
        (self.water_density * self.displaced_volume - self.empty_mass) / self.water_density
    }
}

pub mod presets {
    use super::*;

    // Small research submarine used by the dive scene. Hull masses differ
    // slightly between the two models; both are calibrated values.
    pub fn research_sub_yaw() -> YawConstants {
        // Solid cylinder estimate: 0.5 * m * r², m = 1000 kg, r = 1.5 m
        let radius = 1.5_f32;
        let moment_of_inertia = 0.5 * 1000.0 * radius * radius;
        YawConstants {
            empty_mass: 1399.0,
            moment_of_inertia,
            water_density: 1025.0,
            gravity: 9.81,
            drag_coefficient: 0.02,
            projected_areas: [21.0, 2.1, 3.6],
            lever_arm: 2.0,
            inertia_scale: radius * radius * 0.5,
            time_step: 0.01,
        }
    }

    pub fn research_sub_linear() -> LinearConstants {
        LinearConstants {
            empty_mass: 1394.0,
            engine_power: 200.0,
            water_density: 1025.0,
            gravity: 9.81,
            drag_coefficient: 0.02,
            projected_areas: [2.1, 2.1, 3.6],
            time_step: 0.05,
            displaced_volume: 1.56,
            max_depth: 1000.0,
            warning_depth: 210.0,
            auto_depth_baseline: 20.0,
            auto_depth_velocity_gain: 2.0,
            velocity_passes: VelocityPasses::Double,
        }
    }
}
