use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub tick_interval_ms: u64,
    /// Pin the RNG seed to make a session reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tick_interval_ms: 120,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 10 || self.grid_width > 100 {
            return Err("Grid width must be between 10 and 100".to_string());
        }
        if self.grid_height < 10 || self.grid_height > 100 {
            return Err("Grid height must be between 10 and 100".to_string());
        }
        if self.tick_interval_ms == 0 {
            return Err("Tick interval must be positive".to_string());
        }
        Ok(())
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let config: GameConfig = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let config = GameConfig::default();
        let yaml = config.to_yaml().unwrap();
        let loaded = GameConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_seed_is_optional_in_yaml() {
        let yaml = "grid_width: 30\ngrid_height: 20\ntick_interval_ms: 90\n";
        let config = GameConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_out_of_range_dimensions_are_rejected() {
        let config = GameConfig {
            grid_width: 5,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            grid_height: 500,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
