//! Gradient-boosted tree ensemble for squared-error regression.
//!
//! Training starts from the mean target and adds one [`RegressionTree`] per
//! round, each fitted to the current residual gradients (`pred − y`, hessian 1).
//! Leaf values already include the learning-rate shrinkage, so a prediction is
//! just `base_score + Σ tree(x)`.

use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::domain::BoostParams;
use crate::error::AppError;
use crate::math::{mean, rmse};
use crate::models::tree::RegressionTree;

/// Log training progress every this many rounds.
const LOG_EVERY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedRegressor {
    pub params: BoostParams,
    pub n_features: usize,
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl GradientBoostedRegressor {
    /// Fit an ensemble to `x` (rows = samples) and targets `y`.
    pub fn fit(x: &DMatrix<f64>, y: &[f64], params: &BoostParams) -> Result<Self, AppError> {
        validate_params(params)?;
        let n = x.nrows();
        if n == 0 {
            return Err(AppError::compute("Cannot fit a model on zero rows."));
        }
        if n != y.len() {
            return Err(AppError::compute(format!(
                "Feature rows ({n}) and targets ({}) differ in length.",
                y.len()
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(AppError::compute("Training data contains non-finite values."));
        }

        let base_score = mean(y).ok_or_else(|| AppError::compute("Empty target vector."))?;
        let mut preds = vec![base_score; n];
        let hess = vec![1.0; n];
        let mut grad = vec![0.0; n];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for round in 0..params.n_estimators {
            for i in 0..n {
                grad[i] = preds[i] - y[i];
            }
            let tree = RegressionTree::fit(x, &grad, &hess, (0..n).collect(), params);
            for (i, p) in preds.iter_mut().enumerate() {
                *p += tree.predict_with(|f| x[(i, f)]);
            }
            trees.push(tree);

            if (round + 1) % LOG_EVERY == 0 {
                debug!(
                    "boosting round {}/{}: train rmse={:.4}",
                    round + 1,
                    params.n_estimators,
                    rmse(y, &preds).unwrap_or(f64::NAN)
                );
            }
        }

        Ok(Self {
            params: *params,
            n_features: x.ncols(),
            base_score,
            trees,
        })
    }

    /// Predict one row given in feature order.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, AppError> {
        if row.len() != self.n_features {
            return Err(AppError::input(format!(
                "Expected {} features, got {}.",
                self.n_features,
                row.len()
            )));
        }
        Ok(self.base_score + self.trees.iter().map(|t| t.predict_with(|f| row[f])).sum::<f64>())
    }

    /// Predict every row of `x`.
    pub fn predict(&self, x: &DMatrix<f64>) -> Result<Vec<f64>, AppError> {
        if x.ncols() != self.n_features {
            return Err(AppError::input(format!(
                "Expected {} feature columns, got {}.",
                self.n_features,
                x.ncols()
            )));
        }
        Ok((0..x.nrows())
            .map(|i| {
                self.base_score
                    + self
                        .trees
                        .iter()
                        .map(|t| t.predict_with(|f| x[(i, f)]))
                        .sum::<f64>()
            })
            .collect())
    }

    /// Structural checks for a model loaded from disk.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.base_score.is_finite() {
            return Err(AppError::input("Model base score is not finite."));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| AppError::input(format!("Tree {i}: {e}")))?;
        }
        Ok(())
    }
}

fn validate_params(params: &BoostParams) -> Result<(), AppError> {
    if params.n_estimators == 0 {
        return Err(AppError::input("Number of trees must be > 0."));
    }
    if params.max_depth == 0 {
        return Err(AppError::input("Tree depth must be > 0."));
    }
    if !(params.learning_rate.is_finite() && params.learning_rate > 0.0) {
        return Err(AppError::input("Learning rate must be finite and > 0."));
    }
    if !(params.lambda.is_finite() && params.lambda >= 0.0) {
        return Err(AppError::input("Lambda must be finite and >= 0."));
    }
    if !(params.min_child_weight.is_finite() && params.min_child_weight > 0.0) {
        return Err(AppError::input("min_child_weight must be finite and > 0."));
    }
    if !(params.gamma.is_finite() && params.gamma >= 0.0) {
        return Err(AppError::input("Gamma must be finite and >= 0."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (DMatrix<f64>, Vec<f64>) {
        // y = 2·x0 − x1 on a small grid.
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for i in 0..10 {
            for j in 0..10 {
                let (a, b) = (i as f64, j as f64);
                rows.push([a, b]);
                y.push(2.0 * a - b);
            }
        }
        let x = DMatrix::from_fn(rows.len(), 2, |r, c| rows[r][c]);
        (x, y)
    }

    #[test]
    fn boosting_reduces_error_below_mean_baseline() {
        let (x, y) = toy_data();
        let params = BoostParams {
            n_estimators: 50,
            max_depth: 3,
            learning_rate: 0.3,
            ..BoostParams::default()
        };
        let model = GradientBoostedRegressor::fit(&x, &y, &params).unwrap();
        let preds = model.predict(&x).unwrap();

        let m = mean(&y).unwrap();
        let baseline = rmse(&y, &vec![m; y.len()]).unwrap();
        let fitted = rmse(&y, &preds).unwrap();
        assert!(fitted < 0.2 * baseline, "fitted={fitted} baseline={baseline}");
        assert_eq!(model.trees.len(), 50);
        model.validate().unwrap();
    }

    #[test]
    fn fit_is_deterministic() {
        let (x, y) = toy_data();
        let params = BoostParams {
            n_estimators: 10,
            ..BoostParams::default()
        };
        let a = GradientBoostedRegressor::fit(&x, &y, &params).unwrap();
        let b = GradientBoostedRegressor::fit(&x, &y, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn predict_row_matches_matrix_predict() {
        let (x, y) = toy_data();
        let params = BoostParams {
            n_estimators: 5,
            ..BoostParams::default()
        };
        let model = GradientBoostedRegressor::fit(&x, &y, &params).unwrap();
        let all = model.predict(&x).unwrap();
        let one = model.predict_row(&[x[(7, 0)], x[(7, 1)]]).unwrap();
        assert!((all[7] - one).abs() < 1e-12);
        assert!(model.predict_row(&[1.0]).is_err());
    }

    #[test]
    fn rejects_bad_inputs() {
        let (x, y) = toy_data();
        let params = BoostParams::default();
        assert!(GradientBoostedRegressor::fit(&x, &y[..5], &params).is_err());
        let zero_lr = BoostParams {
            learning_rate: 0.0,
            ..params
        };
        assert!(GradientBoostedRegressor::fit(&x, &y, &zero_lr).is_err());
        let empty = DMatrix::<f64>::zeros(0, 2);
        assert!(GradientBoostedRegressor::fit(&empty, &[], &params).is_err());
    }
}
