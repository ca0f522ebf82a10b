//! Mock "current" readings for a selected area.
//!
//! There is no real per-location data behind these numbers. A position-derived
//! seed nudges the city baseline so that different polygons give different but
//! reproducible readings. Treat the output as a placeholder.

use nalgebra::Point2;

use crate::domain::Readings;

/// Half-width of the vegetation and particulate nudges.
const INDEX_SWING: f64 = 0.2;
/// Half-width of the temperature nudge (°C).
const TEMP_SWING_C: f64 = 4.0;

/// `(x + y) mod 1`, floored so negative coordinates still land in `[0, 1)`.
pub fn centroid_seed(centroid: &Point2<f64>) -> f64 {
    (centroid.x + centroid.y).rem_euclid(1.0)
}

/// Derive current readings from a baseline and an optional centroid seed.
///
/// Without a seed the baseline is returned untouched. Vegetation is clamped to
/// `[0, 1]` and particulates to `>= 0`; temperature is not bounded.
pub fn current_readings(baseline: &Readings, seed: Option<f64>) -> Readings {
    let Some(seed) = seed else {
        return *baseline;
    };
    let offset = seed - 0.5;
    Readings {
        vegetation_index: (baseline.vegetation_index + offset * INDEX_SWING).min(1.0).max(0.0),
        surface_temp_c: baseline.surface_temp_c + offset * TEMP_SWING_C,
        particulate_index: (baseline.particulate_index + offset * INDEX_SWING).max(0.0),
    }
}
