use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use zbg_game::GlassBreakConfig;
use zbg_world::material;
use zbg_world::Vec3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub scenario: ScenarioSection,
    #[serde(default)]
    pub glass_break: GlassBreakConfig,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct SimulationSection {
    #[serde(default)]
    pub seed: u64,
    /// Ticks to run. 0 = until Ctrl+C (realtime only).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    /// Pace ticks at `tick_millis` instead of running flat out.
    #[serde(default)]
    pub realtime: bool,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_max_ticks() -> u64 {
    600
}

fn default_tick_millis() -> u64 {
    50
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            seed: 0,
            max_ticks: default_max_ticks(),
            realtime: false,
            tick_millis: default_tick_millis(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    /// Flat chunks generated around the origin, in chunks.
    #[serde(default = "default_chunk_radius")]
    pub chunk_radius: i32,
    #[serde(default = "default_glass_block")]
    pub glass_block: String,
}

fn default_chunk_radius() -> i32 {
    2
}

fn default_glass_block() -> String {
    "minecraft:glass".into()
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            chunk_radius: default_chunk_radius(),
            glass_block: default_glass_block(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScenarioSection {
    /// Where the player stands (feet).
    #[serde(default = "default_player_position")]
    pub player_position: Vec3,
    /// Outer width of the square glass house, in blocks.
    #[serde(default = "default_house_size")]
    pub house_size: i32,
    /// Solid course under the glass.
    #[serde(default = "default_sill_block")]
    pub sill_block: String,
    #[serde(default = "default_zombie_count")]
    pub zombie_count: u32,
    /// Zombies spawn on a circle of this radius around the player.
    #[serde(default = "default_spawn_radius")]
    pub spawn_radius: f32,
    #[serde(default = "default_zombie_type")]
    pub zombie_type: String,
}

fn default_player_position() -> Vec3 {
    Vec3::new(0.5, 4.0, 0.5)
}

fn default_house_size() -> i32 {
    7
}

fn default_sill_block() -> String {
    "minecraft:stone_bricks".into()
}

fn default_zombie_count() -> u32 {
    4
}

fn default_spawn_radius() -> f32 {
    6.0
}

fn default_zombie_type() -> String {
    "minecraft:zombie".into()
}

impl Default for ScenarioSection {
    fn default() -> Self {
        Self {
            player_position: default_player_position(),
            house_size: default_house_size(),
            sill_block: default_sill_block(),
            zombie_count: default_zombie_count(),
            spawn_radius: default_spawn_radius(),
            zombie_type: default_zombie_type(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.glass_break
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.simulation.tick_millis == 0 {
            return Err(ConfigError::Invalid("tick_millis must be at least 1".into()));
        }
        if self.simulation.max_ticks == 0 && !self.simulation.realtime {
            return Err(ConfigError::Invalid(
                "max_ticks = 0 only makes sense with realtime = true".into(),
            ));
        }
        if self.world.chunk_radius < 0 {
            return Err(ConfigError::Invalid("chunk_radius must not be negative".into()));
        }
        if !material::is_breakable_for_sight(&self.world.glass_block) {
            return Err(ConfigError::Invalid(format!(
                "{} is not a glass block",
                self.world.glass_block
            )));
        }
        if self.scenario.house_size < 3 {
            return Err(ConfigError::Invalid("house_size must be at least 3".into()));
        }
        Ok(())
    }
}
