//! Configuration loading and typed config structures for the Delve server.
//!
//! The canonical configuration lives in `delve.yaml` at the project root.
//! This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every field is defaulted, so a partial file (or none at all) works.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use delve_map::DungeonMap;

use crate::engine::EngineSettings;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
///
/// Mirrors the structure of `delve.yaml`. All fields have defaults
/// matching the stock dungeon tuning.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DungeonConfig {
    /// World-level settings (name, seed, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Map generation parameters.
    #[serde(default)]
    pub map: MapConfig,

    /// Monster spawn parameters.
    #[serde(default)]
    pub spawn: SpawnConfig,

    /// Loot drop parameters.
    #[serde(default)]
    pub loot: LootConfig,

    /// Gateway (HTTP + `WebSocket`) settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DungeonConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// The tick period as a [`Duration`].
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.world.tick_interval_ms)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducible runs. Unset means seed from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: None,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Map generation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapConfig {
    /// Grid width in cells.
    #[serde(default = "default_map_width")]
    pub width: i32,

    /// Grid height in cells.
    #[serde(default = "default_map_height")]
    pub height: i32,

    /// Probability that an interior cell rolls as a wall.
    #[serde(default = "default_wall_density")]
    pub wall_density: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: default_map_width(),
            height: default_map_height(),
            wall_density: default_wall_density(),
        }
    }
}

/// Monster spawn configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnConfig {
    /// Monster population cap; spawning pauses at this count.
    #[serde(default = "default_max_monsters")]
    pub max_monsters: usize,

    /// Probability per tick of attempting a spawn.
    #[serde(default = "default_spawn_chance")]
    pub spawn_chance: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_monsters: default_max_monsters(),
            spawn_chance: default_spawn_chance(),
        }
    }
}

/// Loot drop configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LootConfig {
    /// Probability per tick of dropping one loot item.
    #[serde(default = "default_loot_chance")]
    pub drop_chance: f64,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            drop_chance: default_loot_chance(),
        }
    }
}

/// Gateway server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// Interface to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Delve".to_owned()
}

const fn default_tick_interval_ms() -> u64 {
    3000
}

const fn default_map_width() -> i32 {
    DungeonMap::DEFAULT_WIDTH
}

const fn default_map_height() -> i32 {
    DungeonMap::DEFAULT_HEIGHT
}

const fn default_wall_density() -> f64 {
    DungeonMap::DEFAULT_WALL_DENSITY
}

const fn default_max_monsters() -> usize {
    EngineSettings::DEFAULT.max_monsters
}

const fn default_spawn_chance() -> f64 {
    EngineSettings::DEFAULT.spawn_chance
}

const fn default_loot_chance() -> f64 {
    EngineSettings::DEFAULT.loot_chance
}

fn default_gateway_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_gateway_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DungeonConfig::default();
        assert_eq!(config.world.name, "Delve");
        assert_eq!(config.world.seed, None);
        assert_eq!(config.world.tick_interval_ms, 3000);
        assert_eq!(config.map.width, 20);
        assert_eq!(config.map.height, 20);
        assert_eq!(config.spawn.max_monsters, 5);
        assert_eq!(config.gateway.port, 8080);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Test Dungeon"
  seed: 123
  tick_interval_ms: 500

map:
  width: 30
  height: 24
  wall_density: 0.2

spawn:
  max_monsters: 8
  spawn_chance: 0.5

loot:
  drop_chance: 0.25

gateway:
  host: "127.0.0.1"
  port: 9090

logging:
  level: "debug"
"#;

        let config = DungeonConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(DungeonConfig::default);

        assert_eq!(config.world.name, "Test Dungeon");
        assert_eq!(config.world.seed, Some(123));
        assert_eq!(config.world.tick_interval_ms, 500);
        assert_eq!(config.map.width, 30);
        assert_eq!(config.map.height, 24);
        assert_eq!(config.spawn.max_monsters, 8);
        assert!((config.loot.drop_chance - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.gateway.port, 9090);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "world:\n  seed: 7\n";
        let config = DungeonConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(DungeonConfig::default);

        // Seed is overridden
        assert_eq!(config.world.seed, Some(7));
        // Everything else uses defaults
        assert_eq!(config.world.tick_interval_ms, 3000);
        assert!((config.map.wall_density - 0.15).abs() < f64::EPSILON);
        assert!((config.spawn.spawn_chance - 0.3).abs() < f64::EPSILON);
        assert!((config.loot.drop_chance - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_empty_yaml() {
        let yaml = "";
        let config = DungeonConfig::parse(yaml);
        assert!(config.is_ok());
    }

    #[test]
    fn tick_interval_converts_to_duration() {
        let config = DungeonConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(3000));
    }
}
