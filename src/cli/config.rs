//! Flags shared by commands that run the engine

use clap::Args;

use crate::app::{EngineConfig, SchemeKind};

/// Engine overrides; unset flags keep the value from `config.json`.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Weight of uniform exploration in each revision, in [0, 1]
    #[arg(long, short = 'e')]
    pub explore: Option<f64>,

    /// Policy revision scheme
    #[arg(long, value_enum)]
    pub scheme: Option<SchemeKind>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl EngineArgs {
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(explore) = self.explore {
            config = config.with_explore_factor(explore);
        }
        if let Some(scheme) = self.scheme {
            config = config.with_scheme(scheme);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}
