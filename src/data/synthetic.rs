//! Synthetic delta-LST training data.
//!
//! Rows encode a few hypothesised relationships:
//! - lower NDVI -> hotter surface
//! - more impervious cover -> more warming under development
//! - parks cool, development warms; water proximity and elevation cool slightly
//!
//! All draws come from one `StdRng`, so a seed fully determines the dataset.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Beta, Exp, Normal};

use crate::domain::SyntheticSample;
use crate::error::AppError;

/// Probability that a row proposes development rather than a park.
const P_DEVELOP: f64 = 0.6;
/// Elevation bounds (m).
const ELEVATION_MIN: f64 = 0.0;
const ELEVATION_MAX: f64 = 300.0;
/// Mean distance to water (km) of the exponential draw.
const DIST_WATER_SCALE: f64 = 2.0;

struct Distributions {
    ndvi: Beta<f64>,
    impervious: Beta<f64>,
    elevation: Normal<f64>,
    dist_water: Exp<f64>,
    lst_noise: Normal<f64>,
    delta_noise: Normal<f64>,
}

impl Distributions {
    fn new() -> Result<Self, AppError> {
        let err = |e: &dyn std::fmt::Display| AppError::compute(format!("Distribution error: {e}"));
        Ok(Self {
            ndvi: Beta::new(2.0, 5.0).map_err(|e| err(&e))?,
            impervious: Beta::new(2.0, 2.0).map_err(|e| err(&e))?,
            elevation: Normal::new(50.0, 30.0).map_err(|e| err(&e))?,
            dist_water: Exp::new(1.0 / DIST_WATER_SCALE).map_err(|e| err(&e))?,
            lst_noise: Normal::new(0.0, 1.0).map_err(|e| err(&e))?,
            delta_noise: Normal::new(0.0, 0.6).map_err(|e| err(&e))?,
        })
    }
}

/// Generate `n` independent rows from a generator seeded with `seed`.
pub fn generate_synthetic(n: usize, seed: u64) -> Result<Vec<SyntheticSample>, AppError> {
    let dists = Distributions::new()?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..n).map(|_| draw_sample(&dists, &mut rng)).collect())
}

fn draw_sample(d: &Distributions, rng: &mut StdRng) -> SyntheticSample {
    let current_ndvi = d.ndvi.sample(rng).clamp(0.0, 1.0);
    let impervious_frac = d.impervious.sample(rng).clamp(0.0, 1.0);
    let elevation = d.elevation.sample(rng).clamp(ELEVATION_MIN, ELEVATION_MAX);
    let dist_to_water = d.dist_water.sample(rng);

    let current_lst = 15.0
        + (1.0 - current_ndvi) * 15.0
        + impervious_frac * 3.0
        + (elevation / 200.0) * 2.0
        + d.lst_noise.sample(rng);

    let proposed_flag: i8 = if rng.gen_bool(P_DEVELOP) { 1 } else { -1 };

    let base_effect = impervious_frac * 2.5 - current_ndvi * 1.5;
    let delta_lst = f64::from(proposed_flag) * (1.0 + base_effect)
        - 0.2 * (-dist_to_water).exp()
        - 0.005 * elevation
        + d.delta_noise.sample(rng);

    SyntheticSample {
        current_ndvi,
        impervious_frac,
        elevation,
        dist_to_water,
        current_lst,
        proposed_flag,
        delta_lst,
    }
}
