//! Configuration types for the tribology calculators.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults for the friction post-processing flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrictionConfig {
    /// Number of cycles suggested for the cycle-max flow
    #[serde(default = "default_cycles")]
    pub default_cycles: usize,

    /// Points per cycle suggested for the cycle-average flow
    #[serde(default = "default_points_per_cycle")]
    pub default_points_per_cycle: usize,

    /// File stem suffix for cycle-max reports when no output path is given
    #[serde(default = "default_max_suffix")]
    pub max_suffix: String,

    /// File stem suffix for cycle-average reports when no output path is given
    #[serde(default = "default_average_suffix")]
    pub average_suffix: String,
}

fn default_cycles() -> usize {
    50
}

fn default_points_per_cycle() -> usize {
    5
}

fn default_max_suffix() -> String {
    "_max_cof".to_string()
}

fn default_average_suffix() -> String {
    "_avg_cof".to_string()
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            default_cycles: default_cycles(),
            default_points_per_cycle: default_points_per_cycle(),
            max_suffix: default_max_suffix(),
            average_suffix: default_average_suffix(),
        }
    }
}

/// Configuration for coefficient-of-friction plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Marker radius in pixels
    #[serde(default = "default_point_radius")]
    pub point_radius: u32,
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_point_radius() -> u32 {
    3
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            point_radius: default_point_radius(),
        }
    }
}

/// Main configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub friction: FrictionConfig,

    #[serde(default)]
    pub plot: PlotConfig,
}

impl CalculatorConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: CalculatorConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
