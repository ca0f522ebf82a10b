//! Delta-LST trainer: split, fit, score on held-out rows, persist.

use chrono::Utc;
use log::info;
use nalgebra::DMatrix;

use crate::domain::{FEATURE_NAMES, N_FEATURES, SyntheticSample, TrainConfig};
use crate::error::AppError;
use crate::fit::split::train_test_split;
use crate::io::artifact::{ModelArtifact, write_artifact};
use crate::math::{mean, rmse, std_dev};
use crate::models::GradientBoostedRegressor;

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub rows: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub n_trees: usize,
    pub test_rmse: f64,
    /// RMSE on the test rows of always predicting the training mean.
    pub mean_baseline_rmse: f64,
    pub target_mean: f64,
    pub target_std: f64,
}

/// Feature matrix (rows = selected samples, columns = `FEATURE_NAMES`).
pub fn feature_matrix(samples: &[SyntheticSample], rows: &[usize]) -> DMatrix<f64> {
    DMatrix::from_fn(rows.len(), N_FEATURES, |i, j| samples[rows[i]].features()[j])
}

pub fn targets(samples: &[SyntheticSample], rows: &[usize]) -> Vec<f64> {
    rows.iter().map(|&r| samples[r].delta_lst).collect()
}

/// Fit a model on the training split and evaluate it on the test split.
pub fn train(samples: &[SyntheticSample], config: &TrainConfig) -> Result<(ModelArtifact, TrainReport), AppError> {
    let split = train_test_split(samples.len(), config.test_fraction, config.seed)?;
    info!(
        "training on {} rows, holding out {}",
        split.train.len(),
        split.test.len()
    );

    let x_train = feature_matrix(samples, &split.train);
    let y_train = targets(samples, &split.train);
    let model = GradientBoostedRegressor::fit(&x_train, &y_train, &config.boost)?;

    let x_test = feature_matrix(samples, &split.test);
    let y_test = targets(samples, &split.test);
    let preds = model.predict(&x_test)?;
    let test_rmse = rmse(&y_test, &preds).ok_or_else(|| AppError::compute("Empty test split."))?;

    let train_mean = mean(&y_train).ok_or_else(|| AppError::compute("Empty training split."))?;
    let mean_baseline_rmse = rmse(&y_test, &vec![train_mean; y_test.len()])
        .ok_or_else(|| AppError::compute("Empty test split."))?;

    let all_targets: Vec<f64> = samples.iter().map(|s| s.delta_lst).collect();
    let report = TrainReport {
        rows: samples.len(),
        n_train: split.train.len(),
        n_test: split.test.len(),
        n_trees: model.trees.len(),
        test_rmse,
        mean_baseline_rmse,
        target_mean: mean(&all_targets).unwrap_or(f64::NAN),
        target_std: std_dev(&all_targets).unwrap_or(f64::NAN),
    };
    info!("test rmse={test_rmse:.4} (mean baseline {mean_baseline_rmse:.4})");

    let artifact = ModelArtifact {
        model,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        trained_at: Utc::now(),
        seed: config.seed,
        n_rows: samples.len(),
        test_rmse,
    };
    Ok((artifact, report))
}

/// Train and write the artifact to `config.model_path`.
pub fn train_and_save(samples: &[SyntheticSample], config: &TrainConfig) -> Result<TrainReport, AppError> {
    let (artifact, report) = train(samples, config)?;
    write_artifact(&config.model_path, &artifact)?;
    info!("model written to {}", config.model_path.display());
    Ok(report)
}
