//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - city baselines and scenario deltas (`City`, `Readings`, `ScenarioParams`)
//! - evaluation outputs (`EvaluationResult`, `SelectedArea`)
//! - synthetic training rows and run configuration (`SyntheticSample`, `TrainConfig`)

pub mod types;

pub use types::*;
