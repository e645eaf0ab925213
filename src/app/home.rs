//! Where persisted state lives.

use std::{
    env,
    path::{Path, PathBuf},
};

/// Environment variable naming the home directory.
pub const HOME_ENV: &str = "SELFPLAY_HOME";

/// Home directory used when neither a flag nor the environment names one.
pub const DEFAULT_HOME: &str = ".selfplay";

/// Root directory holding `config.json` and the `states/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Pick the home from `flag`, then `SELFPLAY_HOME`, then `./.selfplay`.
    pub fn resolve(flag: Option<&Path>) -> Self {
        Self::resolve_with(flag, env::var_os(HOME_ENV).map(PathBuf::from))
    }

    fn resolve_with(flag: Option<&Path>, from_env: Option<PathBuf>) -> Self {
        let root = flag
            .map(Path::to_path_buf)
            .or(from_env.filter(|p| !p.as_os_str().is_empty()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME));
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn states_dir(&self) -> PathBuf {
        self.root.join("states")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let home = Home::resolve_with(Some(Path::new("/tmp/a")), Some(PathBuf::from("/tmp/b")));
        assert_eq!(home.root(), Path::new("/tmp/a"));
    }

    #[test]
    fn test_env_then_default() {
        let home = Home::resolve_with(None, Some(PathBuf::from("/tmp/b")));
        assert_eq!(home.states_dir(), PathBuf::from("/tmp/b/states"));

        let home = Home::resolve_with(None, Some(PathBuf::new()));
        assert_eq!(home.root(), Path::new(DEFAULT_HOME));

        let home = Home::resolve_with(None, None);
        assert_eq!(home.config_path(), Path::new(DEFAULT_HOME).join("config.json"));
    }
}
