//! Wiring of stores, registries and drivers.

use std::{path::PathBuf, sync::Arc};

use super::{config::EngineConfig, home::Home};
use crate::{
    Result,
    adapters::{JsonFileStore, MsgPackSnapshots, NullStore},
    engine::StateRegistry,
    pipeline::TrialDriver,
    ports::SnapshotRepository,
};

/// Application with dependency injection.
///
/// Owns the home directory and the effective configuration and hands out
/// the objects commands need.
///
/// # Examples
///
/// ```
/// use selfplay::app::{App, EngineConfig, Home};
///
/// let dir = tempfile::tempdir()?;
/// let app = App::for_testing()
///     .with_home(Home::new(dir.path()))
///     .with_config(EngineConfig::default().with_seed(42))
///     .build()?;
///
/// let mut registry = app.registry();
/// let result = app.driver(10)?.run(&mut registry)?;
/// assert_eq!(result.completed(), 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct App {
    home: Home,
    config: EngineConfig,
    snapshots: Arc<dyn SnapshotRepository + Send + Sync>,
}

impl App {
    /// Open `home`, reading `config.json` from it when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is unreadable or invalid.
    pub fn open(home: Home) -> Result<Self> {
        let config = EngineConfig::load(&home.config_path())?;
        AppBuilder::new().with_home(home).with_config(config).build()
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration, typically after applying command-line
    /// overrides.
    pub fn reconfigure(mut self, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Directory holding one statistics file per board.
    pub fn states_dir(&self) -> PathBuf {
        self.config
            .state_dir
            .clone()
            .unwrap_or_else(|| self.home.states_dir())
    }

    pub fn stats_store(&self) -> JsonFileStore {
        JsonFileStore::new(self.states_dir())
    }

    /// Registry backed by the statistics directory.
    pub fn registry(&self) -> StateRegistry {
        StateRegistry::new(self.stats_store())
    }

    /// Registry that persists nothing.
    pub fn ephemeral_registry(&self) -> StateRegistry {
        StateRegistry::new(NullStore)
    }

    /// Driver for `trials` trials with the configured scheme and seed.
    pub fn driver(&self, trials: usize) -> Result<TrialDriver> {
        TrialDriver::new(self.config.training_config(trials))
    }

    pub fn snapshot_repository(&self) -> Arc<dyn SnapshotRepository + Send + Sync> {
        Arc::clone(&self.snapshots)
    }
}

/// Builder for constructing app with custom dependencies.
pub struct AppBuilder {
    home: Option<Home>,
    config: EngineConfig,
    snapshots: Option<Arc<dyn SnapshotRepository + Send + Sync>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            home: None,
            config: EngineConfig::default(),
            snapshots: None,
        }
    }

    pub fn with_home(mut self, home: Home) -> Self {
        self.home = Some(home);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_snapshot_repository<R: SnapshotRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.snapshots = Some(Arc::new(repo));
        self
    }

    /// Build the app. Without a home, the usual resolution applies; without
    /// a snapshot repository, MessagePack is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn build(self) -> Result<App> {
        self.config.validate()?;
        Ok(App {
            home: self.home.unwrap_or_else(|| Home::resolve(None)),
            config: self.config,
            snapshots: self.snapshots.unwrap_or_else(|| Arc::new(MsgPackSnapshots)),
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
