//! Training pipeline
//!
//! The trial driver plays self-play trials against a registry and reports
//! to any number of observers.

pub mod observers;
pub mod training;

pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, Observation, ProgressObserver,
    StepObservation,
};
pub use training::{Controller, TrainingConfig, TrainingResult, TrialDriver};

pub use crate::ports::TrialObserver;
