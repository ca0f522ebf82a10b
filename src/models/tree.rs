//! Second-order regression tree (one boosting round).
//!
//! Trees are grown depth-first with exact greedy split search:
//!
//! ```text
//! gain = ½ [ G_L²/(H_L+λ) + G_R²/(H_R+λ) − G²/(H+λ) ] − γ
//! leaf = −η · G/(H+λ)
//! ```
//!
//! where `G`/`H` are the gradient/hessian sums of the rows reaching a node.
//! Candidate thresholds are midpoints between consecutive distinct feature
//! values; a row goes left when `x[feature] < threshold`.

use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::BoostParams;
use crate::error::AppError;

/// Splits must improve the objective by more than this.
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A fitted tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

struct GrowContext<'a> {
    x: &'a DMatrix<f64>,
    grad: &'a [f64],
    hess: &'a [f64],
    params: &'a BoostParams,
}

impl RegressionTree {
    /// Fit one tree to the given gradients/hessians over `rows` of `x`.
    pub fn fit(
        x: &DMatrix<f64>,
        grad: &[f64],
        hess: &[f64],
        rows: Vec<usize>,
        params: &BoostParams,
    ) -> Self {
        let ctx = GrowContext {
            x,
            grad,
            hess,
            params,
        };
        let mut tree = RegressionTree { nodes: Vec::new() };
        tree.grow(&ctx, rows, 0);
        tree
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Predict from a feature accessor (`feature index -> value`).
    pub fn predict_with<F: Fn(usize) -> f64>(&self, feature_value: F) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if feature_value(*feature) < *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Check structural soundness of a (possibly deserialized) tree.
    ///
    /// Children must point strictly forward, which also rules out cycles.
    pub fn validate(&self, n_features: usize) -> Result<(), AppError> {
        if self.nodes.is_empty() {
            return Err(AppError::input("Tree has no nodes."));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(AppError::input(format!("Tree node {idx}: non-finite leaf value.")));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(AppError::input(format!(
                            "Tree node {idx}: feature {feature} out of range (n_features={n_features})."
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(AppError::input(format!("Tree node {idx}: non-finite threshold.")));
                    }
                    for &child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(AppError::input(format!(
                                "Tree node {idx}: invalid child index {child}."
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn grow(&mut self, ctx: &GrowContext<'_>, rows: Vec<usize>, depth: usize) -> usize {
        let g: f64 = rows.iter().map(|&r| ctx.grad[r]).sum();
        let h: f64 = rows.iter().map(|&r| ctx.hess[r]).sum();

        let split = if depth < ctx.params.max_depth && rows.len() >= 2 {
            best_split(ctx, &rows, g, h)
        } else {
            None
        };

        let Some(split) = split else {
            let value = -ctx.params.learning_rate * g / (h + ctx.params.lambda);
            self.nodes.push(Node::Leaf { value });
            return self.nodes.len() - 1;
        };

        // Reserve the slot so children get higher indices than their parent.
        let idx = self.nodes.len();
        self.nodes.push(Node::Leaf { value: 0.0 });

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| ctx.x[(r, split.feature)] < split.threshold);

        let left = self.grow(ctx, left_rows, depth + 1);
        let right = self.grow(ctx, right_rows, depth + 1);
        self.nodes[idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        idx
    }
}

fn best_split(ctx: &GrowContext<'_>, rows: &[usize], g: f64, h: f64) -> Option<SplitCandidate> {
    // Evaluate each feature independently (parallel).
    let per_feature: Vec<Option<SplitCandidate>> = (0..ctx.x.ncols())
        .into_par_iter()
        .map(|feature| best_split_for_feature(ctx, rows, feature, g, h))
        .collect();

    // Deterministic selection: highest gain; ties go to the lower feature index.
    let mut best: Option<SplitCandidate> = None;
    for c in per_feature.into_iter().flatten() {
        if best.is_none_or(|b| c.gain > b.gain) {
            best = Some(c);
        }
    }
    best
}

fn best_split_for_feature(
    ctx: &GrowContext<'_>,
    rows: &[usize],
    feature: usize,
    g: f64,
    h: f64,
) -> Option<SplitCandidate> {
    let lambda = ctx.params.lambda;
    let min_child = ctx.params.min_child_weight;

    let mut entries: Vec<(f64, f64, f64)> = rows
        .iter()
        .map(|&r| (ctx.x[(r, feature)], ctx.grad[r], ctx.hess[r]))
        .collect();
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));

    let parent_score = g * g / (h + lambda);
    let mut best: Option<SplitCandidate> = None;
    let (mut gl, mut hl) = (0.0, 0.0);

    for i in 0..entries.len() - 1 {
        let (v, gi, hi) = entries[i];
        gl += gi;
        hl += hi;

        let next = entries[i + 1].0;
        if next <= v {
            continue;
        }
        let (gr, hr) = (g - gl, h - hl);
        if hl < min_child || hr < min_child {
            continue;
        }

        let gain = 0.5 * (gl * gl / (hl + lambda) + gr * gr / (hr + lambda) - parent_score)
            - ctx.params.gamma;
        if gain > MIN_GAIN && best.is_none_or(|b| gain > b.gain) {
            let mid = 0.5 * (v + next);
            let threshold = if mid > v { mid } else { next };
            best = Some(SplitCandidate {
                feature,
                threshold,
                gain,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(depth: usize) -> BoostParams {
        BoostParams {
            max_depth: depth,
            learning_rate: 1.0,
            lambda: 0.0,
            ..BoostParams::default()
        }
    }

    #[test]
    fn stump_separates_step_function() {
        // y = 0 for x < 5, y = 10 otherwise; gradients at prediction 0 are -y.
        let xs: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = xs.iter().map(|&x| if x < 5.0 { 0.0 } else { 10.0 }).collect();
        let x = DMatrix::from_column_slice(10, 1, &xs);
        let grad: Vec<f64> = y.iter().map(|v| -v).collect();
        let hess = vec![1.0; 10];

        let tree = RegressionTree::fit(&x, &grad, &hess, (0..10).collect(), &params(1));
        assert_eq!(tree.n_leaves(), 2);
        match &tree.nodes()[0] {
            Node::Split { feature, threshold, .. } => {
                assert_eq!(*feature, 0);
                assert!((threshold - 4.5).abs() < 1e-12);
            }
            other => panic!("expected split at root, got {other:?}"),
        }
        assert!((tree.predict_with(|_| 2.0) - 0.0).abs() < 1e-12);
        assert!((tree.predict_with(|_| 7.0) - 10.0).abs() < 1e-12);
        tree.validate(1).unwrap();
    }

    #[test]
    fn picks_informative_feature() {
        // Feature 0 is noise-free signal, feature 1 is constant.
        let n = 8;
        let mut data = Vec::new();
        for i in 0..n {
            data.push(i as f64);
        }
        data.extend(std::iter::repeat_n(3.0, n));
        let x = DMatrix::from_column_slice(n, 2, &data);
        let grad: Vec<f64> = (0..n).map(|i| if i < 4 { 1.0 } else { -1.0 }).collect();
        let hess = vec![1.0; n];

        let tree = RegressionTree::fit(&x, &grad, &hess, (0..n).collect(), &params(2));
        match &tree.nodes()[0] {
            Node::Split { feature, .. } => assert_eq!(*feature, 0),
            other => panic!("expected split at root, got {other:?}"),
        }
    }

    #[test]
    fn constant_target_yields_single_leaf() {
        let x = DMatrix::from_column_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let grad = vec![0.0; 4];
        let hess = vec![1.0; 4];
        let tree = RegressionTree::fit(&x, &grad, &hess, (0..4).collect(), &params(4));
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.predict_with(|_| 0.0), 0.0);
    }

    #[test]
    fn validate_rejects_backward_children() {
        let tree = RegressionTree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                Node::Leaf { value: 1.0 },
            ],
        };
        assert!(tree.validate(1).is_err());

        let tree = RegressionTree {
            nodes: vec![Node::Split {
                feature: 3,
                threshold: 1.0,
                left: 1,
                right: 2,
            }],
        };
        assert!(tree.validate(2).is_err());
    }
}
