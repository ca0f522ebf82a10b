//! Environmental impact score.
//!
//! Each reading is normalised onto a rough 0..1 "badness" scale and combined
//! with fixed weights. Lower scores mean less adverse impact.

use crate::domain::Readings;

const W_VEGETATION: f64 = 0.4;
const W_TEMPERATURE: f64 = 0.4;
const W_PARTICULATE: f64 = 0.2;

/// Temperature mapped to 0 (°C).
const TEMP_FLOOR_C: f64 = 10.0;
/// Temperature span mapped onto 0..1 (10–50 °C).
const TEMP_SPAN_C: f64 = 40.0;
/// Particulate value mapped to 1.
const PARTICULATE_SPAN: f64 = 2.0;

/// Impact score in `[0, 100]` for one set of readings.
pub fn compute_score(vegetation: f64, temperature_c: f64, particulate: f64) -> f64 {
    let vegetation_term = 1.0 - vegetation;
    let temperature_term = (temperature_c - TEMP_FLOOR_C) / TEMP_SPAN_C;
    let particulate_term = particulate / PARTICULATE_SPAN;

    let raw = W_VEGETATION * vegetation_term
        + W_TEMPERATURE * temperature_term
        + W_PARTICULATE * particulate_term;
    // A NaN total saturates to 100.
    (raw * 100.0).min(100.0).max(0.0)
}

/// Convenience wrapper over [`compute_score`].
pub fn score_readings(r: &Readings) -> f64 {
    compute_score(r.vegetation_index, r.surface_temp_c, r.particulate_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_case_scores_zero() {
        assert_eq!(compute_score(1.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn worst_case_scores_hundred() {
        assert!((compute_score(0.0, 50.0, 2.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(compute_score(2.0, -40.0, 0.0), 0.0);
        assert_eq!(compute_score(-1.0, 90.0, 10.0), 100.0);
    }

    #[test]
    fn non_finite_readings_stay_in_range() {
        assert_eq!(compute_score(0.5, f64::NAN, 0.5), 100.0);
        assert_eq!(compute_score(f64::NAN, 30.0, f64::NAN), 100.0);
        assert_eq!(compute_score(0.5, f64::INFINITY, 0.5), 100.0);
        assert_eq!(compute_score(0.5, f64::NEG_INFINITY, 0.5), 0.0);
        assert_eq!(compute_score(f64::INFINITY, 30.0, 0.5), 0.0);
    }

    #[test]
    fn monotone_in_each_reading() {
        let steps: Vec<f64> = (0..=20).map(|i| i as f64 / 20.0).collect();
        for w in steps.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            assert!(compute_score(0.5, 10.0 + 40.0 * lo, 0.5) <= compute_score(0.5, 10.0 + 40.0 * hi, 0.5));
            assert!(compute_score(0.5, 30.0, 2.0 * lo) <= compute_score(0.5, 30.0, 2.0 * hi));
            assert!(compute_score(lo, 30.0, 0.5) >= compute_score(hi, 30.0, 0.5));
        }
    }

    #[test]
    fn develop_example_for_new_delhi() {
        // 0.4·1.05 + 0.4·0.65 + 0.2·0.35 = 0.75
        let s = score_readings(&Readings::new(-0.05, 36.0, 0.7));
        assert!((s - 75.0).abs() < 1e-9, "got {s}");
    }
}
