//! Shuffled train/test split.
//!
//! Row indices are permuted with a seeded `StdRng`; the first
//! `ceil(test_fraction · n)` of the permutation form the test set.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<Split, AppError> {
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(AppError::input(format!(
            "Test fraction must lie in (0, 1), got {test_fraction}."
        )));
    }
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(AppError::compute(format!(
            "Cannot split {n} rows into non-empty train and test sets."
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(&mut rng);

    let train = idx.split_off(n_test);
    Ok(Split { train, test: idx })
}
