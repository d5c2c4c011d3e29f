//! Tunables for the glass-breaking behavior and tracker.

use serde::Deserialize;

use crate::error::GameError;

/// Glass-breaking settings. Every field has a default, so an empty table is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlassBreakConfig {
    /// How far (blocks) a mob looks for players, on every axis of its hitbox.
    pub detection_range: f32,
    /// Maximum distance along the sightline at which glass is picked as a target.
    pub glass_break_range: f32,
    /// Ticks from the first hit until the glass shatters.
    pub break_ticks: u64,
    /// Ticks between crack particles while a block is being broken.
    pub particle_interval: u64,
    /// Squared distance from the mob's feet to the glass centre within which it attacks.
    pub reach_distance_sq: f32,
    /// Speed multiplier passed with navigation requests.
    pub move_speed: f32,
    /// Maximum head yaw change per think-step while facing the glass (degrees).
    pub look_yaw_step: f32,
    /// Maximum head pitch change per think-step while facing the glass (degrees).
    pub look_pitch_step: f32,
    /// Behavior priority (lower runs first).
    pub priority: u32,
    /// Also break glass directly above the target to open a two-high gap.
    pub break_above: bool,
}

impl Default for GlassBreakConfig {
    fn default() -> Self {
        Self {
            detection_range: 16.0,
            glass_break_range: 4.0,
            break_ticks: 60,
            particle_interval: 10,
            reach_distance_sq: 4.0,
            move_speed: 1.0,
            look_yaw_step: 30.0,
            look_pitch_step: 30.0,
            priority: 2,
            break_above: true,
        }
    }
}

impl GlassBreakConfig {
    /// Reject settings the behavior cannot work with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.detection_range <= 0.0 {
            return Err(GameError::InvalidConfig(
                "detection_range must be positive".into(),
            ));
        }
        if self.glass_break_range <= 0.0 {
            return Err(GameError::InvalidConfig(
                "glass_break_range must be positive".into(),
            ));
        }
        if self.break_ticks == 0 {
            return Err(GameError::InvalidConfig("break_ticks must be at least 1".into()));
        }
        if self.particle_interval == 0 {
            return Err(GameError::InvalidConfig(
                "particle_interval must be at least 1".into(),
            ));
        }
        if self.reach_distance_sq <= 0.0 || self.move_speed <= 0.0 {
            return Err(GameError::InvalidConfig(
                "reach_distance_sq and move_speed must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn detection_range_sq(&self) -> f32 {
        self.detection_range * self.detection_range
    }
}
