//! Application layer with dependency injection container.
//!
//! ```text
//! App ──owns──▶ Home, EngineConfig
//!  │
//!  ├─ stats_store()  ──▶ JsonFileStore (<home>/states)
//!  ├─ registry()     ──▶ StateRegistry
//!  └─ driver(n)      ──▶ TrialDriver
//! ```

pub mod config;
pub mod container;
pub mod home;

pub use config::{EngineConfig, SchemeKind};
pub use container::{App, AppBuilder};
pub use home::{DEFAULT_HOME, HOME_ENV, Home};
