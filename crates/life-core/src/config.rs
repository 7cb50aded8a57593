//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters for building a grid when no input file is given
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Probability that a cell starts alive (0.0 to 1.0)
    pub density: f64,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            density: 0.3,
            seed: 0,
        }
    }
}

/// How long to run and what to show while running
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of generations to compute
    pub generations: u64,
    /// Print the grid after every generation
    pub print_each_generation: bool,
    /// Log a progress line every N generations
    pub progress_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 10,
            print_each_generation: false,
            progress_interval: 100,
        }
    }
}

/// Terminal rendering markers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub alive_marker: char,
    pub dead_marker: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            alive_marker: '0',
            dead_marker: '.',
        }
    }
}

/// Top-level configuration, loadable from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub world: WorldConfig,
    pub run: RunConfig,
    pub render: RenderConfig,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl LifeConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LifeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.world.density) {
            return Err(Error::Validation(format!(
                "density must be between 0.0 and 1.0, got {}",
                self.world.density
            )));
        }
        if self.render.alive_marker == self.render.dead_marker {
            return Err(Error::Validation(
                "alive and dead markers must differ".to_string(),
            ));
        }
        if self.run.progress_interval == 0 {
            return Err(Error::Validation(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = LifeConfig::default();
        assert_eq!(config.world.width, 20);
        assert_eq!(config.world.height, 20);
        assert_eq!(config.run.generations, 10);
        assert_eq!(config.render.alive_marker, '0');
        assert_eq!(config.render.dead_marker, '.');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LifeConfig::from_json(r#"{"world": {"width": 8}, "run": {"generations": 3}}"#)
            .unwrap();
        assert_eq!(config.world.width, 8);
        assert_eq!(config.world.height, 20);
        assert_eq!(config.run.generations, 3);
        assert!(!config.log_json);
    }

    #[test]
    fn test_invalid_density_rejected() {
        let result = LifeConfig::from_json(r#"{"world": {"density": 1.5}}"#);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = LifeConfig::from_json("{ not json");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = LifeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = LifeConfig::from_json(&json).unwrap();
        assert_eq!(config.world.seed, deserialized.world.seed);
        assert_eq!(config.render.alive_marker, deserialized.render.alive_marker);
    }
}
