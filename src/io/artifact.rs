//! Read/write the trained model artifact (JSON).
//!
//! The artifact bundles the fitted ensemble with its ordered feature list, plus
//! a little run metadata. It is written once per training run; there is no
//! versioning or in-place update.

use std::fs::{File, create_dir_all};
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::FEATURE_NAMES;
use crate::error::AppError;
use crate::models::GradientBoostedRegressor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: GradientBoostedRegressor,
    pub feature_names: Vec<String>,
    pub trained_at: DateTime<Utc>,
    pub seed: u64,
    pub n_rows: usize,
    pub test_rmse: f64,
}

/// Write the artifact, creating the parent directory if absent.
pub fn write_artifact(path: &Path, artifact: &ModelArtifact) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| {
            AppError::input(format!("Failed to create model dir '{}': {e}", parent.display()))
        })?;
    }
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create model file '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), artifact)
        .map_err(|e| AppError::input(format!("Failed to write model JSON: {e}")))?;
    Ok(())
}

/// Read an artifact and check it matches the expected feature layout.
pub fn read_artifact(path: &Path) -> Result<ModelArtifact, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open model file '{}': {e}", path.display())))?;
    let artifact: ModelArtifact = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| AppError::input(format!("Invalid model JSON: {e}")))?;

    if artifact.feature_names != FEATURE_NAMES {
        return Err(AppError::input(format!(
            "Model features {:?} do not match expected {:?}.",
            artifact.feature_names, FEATURE_NAMES
        )));
    }
    if artifact.model.n_features != artifact.feature_names.len() {
        return Err(AppError::input("Model feature count disagrees with its feature list."));
    }
    artifact.model.validate()?;
    Ok(artifact)
}
