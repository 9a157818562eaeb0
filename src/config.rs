//! Configuration for the Kohonen SOM engine.

use crate::error::{KohonenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration, grouping model, data, and rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SOM model and training configuration.
    pub som: SomConfig,

    /// Dataset handling configuration.
    pub data: DataConfig,

    /// Weight grid rendering configuration.
    pub render: RenderConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Self-Organising Map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomConfig {
    /// Grid width in lattice cells.
    /// Default: 10.
    pub width: usize,

    /// Grid height in lattice cells.
    /// Default: 10.
    pub height: usize,

    /// Dimensionality of the input vectors and prototype weights.
    /// Default: 3.
    pub input_dim: usize,

    /// Initial learning rate; decays exponentially over training.
    /// Default: 0.1.
    pub learning_rate: f64,

    /// Random seed for reproducibility.
    /// Default: Some(42).
    pub random_state: Option<u64>,

    /// Number of training iterations.
    /// Default: 1000.
    pub n_iterations: usize,

    /// Mini-batch size; `None` trains on the full dataset every iteration.
    /// Default: Some(32).
    pub batch_size: Option<usize>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            input_dim: 3,
            learning_rate: 0.1,
            random_state: Some(42),
            n_iterations: 1000,
            batch_size: Some(32),
        }
    }
}

impl SomConfig {
    /// Returns the total number of lattice cells.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }

    /// Validates the configuration.
    ///
    /// The decay schedule needs `ln(max(width, height) / 2) > 0`, so grids
    /// with `max(width, height) <= 2` are rejected here rather than letting
    /// training produce non-finite learning parameters.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(KohonenError::Config(format!(
                "Grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.input_dim == 0 {
            return Err(KohonenError::Config(
                "Input dimension must be positive".to_string(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(KohonenError::Config(format!(
                "Learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if self.width.max(self.height) <= 2 {
            return Err(KohonenError::Config(format!(
                "Grid {}x{} is too small for the decay schedule; \
                 the larger dimension must be at least 3",
                self.width, self.height
            )));
        }
        if self.n_iterations == 0 {
            return Err(KohonenError::Config(
                "Number of iterations must be positive".to_string(),
            ));
        }
        if self.batch_size == Some(0) {
            return Err(KohonenError::Config(
                "Batch size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Dataset handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Min-max normalise datasets loaded from file.
    /// Default: true.
    pub normalise: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { normalise: true }
    }
}

/// Weight grid rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Side length in pixels of the square block drawn per lattice cell.
    /// Default: 32.
    pub cell_size: u32,

    /// Directory for rendered images.
    /// Default: "plots".
    pub output_dir: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 32,
            output_dir: "plots".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.som.width, 10);
        assert_eq!(config.som.height, 10);
        assert_eq!(config.som.input_dim, 3);
        assert_eq!(config.som.total_cells(), 100);
        assert_eq!(config.som.random_state, Some(42));
        assert_eq!(config.som.batch_size, Some(32));
        assert!(config.data.normalise);
        assert_eq!(config.render.cell_size, 32);
    }

    #[test]
    fn test_default_validates() {
        assert!(SomConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut config = SomConfig::default();
        config.width = 0;
        assert!(config.validate().is_err());

        let mut config = SomConfig::default();
        config.input_dim = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_learning_rate_rejected() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let mut config = SomConfig::default();
            config.learning_rate = lr;
            assert!(config.validate().is_err(), "learning_rate {lr} accepted");
        }
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        let mut config = SomConfig::default();
        config.width = 2;
        config.height = 2;
        assert!(config.validate().is_err());

        // 3 in either dimension is enough
        config.height = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = SomConfig::default();
        config.batch_size = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.som.width = 20;
        config.som.random_state = None;
        config.to_json_file(&path).unwrap();

        let loaded = Config::from_json_file(&path).unwrap();
        assert_eq!(loaded.som.width, 20);
        assert_eq!(loaded.som.random_state, None);
        assert_eq!(loaded.som.n_iterations, config.som.n_iterations);
    }
}
