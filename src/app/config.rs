//! Engine configuration.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    engine::{PolicyScheme, check_explore_factor},
    pipeline::TrainingConfig,
};

/// Policy scheme as named in configuration files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    #[default]
    Blended,
    Weighted,
}

/// Settings shared by every command that touches the engine.
///
/// Read from `<home>/config.json` when present; command-line flags override
/// individual fields through the `with_*` methods.
///
/// # Examples
///
/// ```
/// use selfplay::app::EngineConfig;
///
/// let config = EngineConfig::default().with_explore_factor(0.2).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert!(EngineConfig::default().with_explore_factor(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight of the uniform policy in a blended revision
    pub explore_factor: f64,
    pub scheme: SchemeKind,
    /// Log aggregate tallies every this many trials
    pub log_every: usize,
    /// Random seed (None = non-deterministic)
    pub seed: Option<u64>,
    /// Override for the statistics directory
    pub state_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            explore_factor: 0.5,
            scheme: SchemeKind::Blended,
            log_every: 200,
            seed: None,
            state_dir: None,
        }
    }
}

impl EngineConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("read {path:?}"),
                    source,
                });
            }
        };
        let config: Self = serde_json::from_str(&text).map_err(|e| Error::SerializationContext {
            operation: format!("parse configuration {path:?}"),
            message: e.to_string(),
        })?;
        log::debug!("loaded configuration from {path:?}");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn with_explore_factor(mut self, explore_factor: f64) -> Self {
        self.explore_factor = explore_factor;
        self
    }

    pub fn with_scheme(mut self, scheme: SchemeKind) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_state_dir(mut self, state_dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(state_dir.into());
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an explore factor outside
    /// `[0, 1]` or a zero logging interval.
    pub fn validate(&self) -> Result<()> {
        check_explore_factor(self.explore_factor)?;
        if self.log_every == 0 {
            return Err(Error::InvalidConfiguration {
                message: "log_every must be a positive integer".to_string(),
            });
        }
        Ok(())
    }

    pub fn policy_scheme(&self) -> PolicyScheme {
        match self.scheme {
            SchemeKind::Blended => PolicyScheme::Blended {
                explore_factor: self.explore_factor,
            },
            SchemeKind::Weighted => PolicyScheme::Weighted,
        }
    }

    /// Driver settings for a run of `trials` trials.
    pub fn training_config(&self, trials: usize) -> TrainingConfig {
        TrainingConfig {
            trials,
            scheme: self.policy_scheme(),
            seed: self.seed,
            log_every: self.log_every,
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = EngineConfig::load(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "explore_factor": 0.1, "scheme": "weighted" }"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.explore_factor, 0.1);
        assert_eq!(config.scheme, SchemeKind::Weighted);
        assert_eq!(config.log_every, 200);
        assert_eq!(config.policy_scheme(), PolicyScheme::Weighted);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested/config.json");
        let config = EngineConfig::default().with_seed(3).with_log_every(50);
        config.save(&path).unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "explore_factor = 0.1").unwrap();
        assert!(EngineConfig::load(&path).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default().with_log_every(0).validate().is_err());
        assert!(
            EngineConfig::default()
                .with_explore_factor(-0.5)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_training_config() {
        let training = EngineConfig::default()
            .with_explore_factor(0.25)
            .with_seed(9)
            .training_config(40);
        assert_eq!(training.trials, 40);
        assert_eq!(training.seed, Some(9));
        assert_eq!(
            training.scheme,
            PolicyScheme::Blended {
                explore_factor: 0.25
            }
        );
    }
}
