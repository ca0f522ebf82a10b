//! Shared pipeline logic used by the CLI front-end and the no-flag trainer.
//!
//! Two independent workflows live here:
//!
//! - area evaluation: selection -> current readings -> scenario projections -> scores
//! - training: synthetic rows -> (optional CSV) -> split/fit/score -> artifact
//!
//! The front-ends then only deal with presentation (printing, exporting).

use log::{debug, info};
use serde_json::Value;

use crate::data::generate_synthetic;
use crate::domain::{City, EvaluationResult, ScenarioParams, SelectedArea, TrainConfig};
use crate::error::AppError;
use crate::fit::{TrainReport, train_and_save};
use crate::io::{parse_selection, write_dataset_csv};
use crate::models::{centroid_seed, current_readings, score_readings};

/// One session's evaluator state: a city and the editable scenario deltas.
///
/// Every call recomputes from scratch; nothing is cached or shared between
/// evaluators.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaEvaluator {
    city: City,
    params: ScenarioParams,
}

impl AreaEvaluator {
    pub fn new(city: City, params: ScenarioParams) -> Self {
        Self { city, params }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    pub fn set_city(&mut self, city: City) {
        self.city = city;
    }

    pub fn set_params(&mut self, params: ScenarioParams) {
        self.params = params;
    }

    /// Evaluate raw GeoJSON input; unusable geometry falls back to the baseline.
    pub fn evaluate(&self, geojson: Option<&Value>) -> EvaluationResult {
        self.evaluate_selection(geojson.and_then(parse_selection))
    }

    pub fn evaluate_selection(&self, selection: Option<SelectedArea>) -> EvaluationResult {
        let baseline = self.city.baseline().readings;
        let seed = selection
            .as_ref()
            .map(|s| centroid_seed(&s.polygon.centroid()));
        let current = current_readings(&baseline, seed);

        // Scenario deltas only apply to an actual selection.
        let (develop, park) = if selection.is_some() {
            (current.project(&self.params.develop), current.project(&self.params.park))
        } else {
            (current, current)
        };
        let develop_score = score_readings(&develop);
        let park_score = score_readings(&park);

        debug!(
            "evaluated {} (selection={}, seed={seed:?}): develop={develop_score:.2} park={park_score:.2}",
            self.city.display_name(),
            selection.is_some(),
        );

        EvaluationResult {
            city: self.city,
            baseline,
            selection,
            seed,
            current,
            develop,
            park,
            develop_score,
            park_score,
        }
    }
}

/// One-shot evaluation without keeping an evaluator around.
pub fn evaluate_area(geojson: Option<&Value>, city: City, params: &ScenarioParams) -> EvaluationResult {
    AreaEvaluator::new(city, *params).evaluate(geojson)
}

/// Outputs of a training run.
#[derive(Debug, Clone)]
pub struct TrainRun {
    pub config: TrainConfig,
    pub report: TrainReport,
}

/// Generate the synthetic dataset, train, and write the artifact.
pub fn run_training(config: &TrainConfig) -> Result<TrainRun, AppError> {
    info!("generating {} synthetic rows (seed={})", config.rows, config.seed);
    let samples = generate_synthetic(config.rows, config.seed)?;

    if let Some(path) = &config.export_data {
        write_dataset_csv(path, &samples)?;
        info!("dataset written to {}", path.display());
    }

    let report = train_and_save(&samples, config)?;
    Ok(TrainRun {
        config: config.clone(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Readings;
    use serde_json::json;

    fn centred_square() -> Value {
        // Centroid (0.25, 0.25) -> seed 0.5.
        json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [0.5, 0.0], [0.5, 0.5], [0.0, 0.5], [0.0, 0.0]]]
        })
    }

    #[test]
    fn new_delhi_develop_example() {
        let geo = centred_square();
        let r = evaluate_area(Some(&geo), City::NewDelhi, &ScenarioParams::default());

        assert_eq!(r.seed, Some(0.5));
        assert_eq!(r.current, Readings::new(0.25, 33.0, 0.6));
        assert!((r.develop.vegetation_index - (-0.05)).abs() < 1e-12);
        assert!((r.develop.surface_temp_c - 36.0).abs() < 1e-12);
        assert!((r.develop.particulate_index - 0.7).abs() < 1e-12);
        assert!((r.develop_score - 75.0).abs() < 1e-9, "got {}", r.develop_score);

        // park: (0.5, 31.0, 0.55) -> 0.4·0.5 + 0.4·0.525 + 0.2·0.275 = 0.465
        assert!((r.park_score - 46.5).abs() < 1e-9, "got {}", r.park_score);
        assert_eq!(r.score_bars(), [("Develop", r.develop_score), ("Park", r.park_score)]);
    }

    #[test]
    fn no_selection_uses_baseline_everywhere() {
        let r = evaluate_area(None, City::SanFrancisco, &ScenarioParams::default());
        let base = City::SanFrancisco.baseline().readings;
        assert!(r.selection.is_none());
        assert_eq!(r.seed, None);
        assert_eq!(r.current, base);
        assert_eq!(r.develop, base);
        assert_eq!(r.park, base);
        assert_eq!(r.develop_score, r.park_score);
    }

    #[test]
    fn broken_geometry_falls_back_silently() {
        let broken = json!({"type": "Polygon", "coordinates": "nope"});
        let r = evaluate_area(Some(&broken), City::Nairobi, &ScenarioParams::default());
        assert_eq!(r, evaluate_area(None, City::Nairobi, &ScenarioParams::default()));
    }

    #[test]
    fn overflowing_polygon_falls_back_to_baseline() {
        let huge = json!({
            "type": "Polygon",
            "coordinates": [[[1e308, 1e308], [-1e308, 1e308], [-1e308, -1e308], [1e308, -1e308], [1e308, 1e308]]]
        });
        let r = evaluate_area(Some(&huge), City::NewDelhi, &ScenarioParams::default());
        assert!(r.selection.is_none());
        assert!((0.0..=1.0).contains(&r.current.vegetation_index));
        assert!(r.develop_score.is_finite() && r.park_score.is_finite());
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let geo = json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[77.20, 28.61], [77.22, 28.61], [77.22, 28.63], [77.20, 28.63], [77.20, 28.61]]]
            }
        });
        let ev = AreaEvaluator::new(City::NewDelhi, ScenarioParams::default());
        assert_eq!(ev.evaluate(Some(&geo)), ev.evaluate(Some(&geo)));
    }

    #[test]
    fn projections_are_not_clamped() {
        let geo = centred_square();
        let mut ev = AreaEvaluator::new(City::NewDelhi, ScenarioParams::default());
        let mut params = *ev.params();
        params.park.particulate = -5.0;
        ev.set_params(params);
        let r = ev.evaluate(Some(&geo));
        assert!(r.park.particulate_index < 0.0);
        assert!(r.develop.vegetation_index < 0.0);
        assert!((0.0..=100.0).contains(&r.park_score));
    }

    #[test]
    fn evaluators_do_not_share_state() {
        let geo = centred_square();
        let a = AreaEvaluator::new(City::NewDelhi, ScenarioParams::default());
        let mut b = a.clone();
        b.set_city(City::Nairobi);
        assert_eq!(a.city(), City::NewDelhi);
        assert_eq!(b.city(), City::Nairobi);
        assert_eq!(a.evaluate(Some(&geo)).city, City::NewDelhi);
        assert_eq!(b.evaluate(Some(&geo)).city, City::Nairobi);
    }
}
