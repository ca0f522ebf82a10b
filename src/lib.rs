//! `urban-impact` library crate.
//!
//! Two independent units live here:
//!
//! - the area evaluator: mock environmental readings and impact scores for a
//!   drawn polygon under "develop" and "park" scenarios
//! - the synthetic trainer: a seeded fabricated dataset and a gradient-boosted
//!   regressor predicting the land-surface-temperature change
//!
//! The binaries (`impact`, `train-delta-lst`) are thin wrappers around this
//! library so the core logic is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
