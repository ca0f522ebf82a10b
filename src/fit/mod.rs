//! Model training orchestration.
//!
//! Responsibilities:
//!
//! - seeded shuffle split into train/test rows
//! - fit the boosted ensemble on the training rows
//! - score held-out RMSE and persist the artifact

pub mod split;
pub mod trainer;

pub use split::*;
pub use trainer::*;
