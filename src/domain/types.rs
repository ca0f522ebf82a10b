//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the evaluator and its presentation layer
//! - exported to JSON/CSV
//! - reloaded later (the trained model artifact)

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::math::Polygon;

/// Default number of synthetic rows for a training run.
pub const DEFAULT_ROWS: usize = 3000;

/// Default seed shared by the generator and the train/test split.
pub const DEFAULT_SEED: u64 = 42;

/// Default held-out share of the synthetic dataset.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/gbt_model.json";

/// Feature columns in the order the regressor consumes them.
pub const FEATURE_NAMES: [&str; 6] = [
    "current_ndvi",
    "impervious_frac",
    "elevation",
    "dist_to_water",
    "current_lst",
    "proposed_flag",
];

/// Number of model input columns.
pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// Demo cities with compiled-in baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum City {
    NewDelhi,
    SanFrancisco,
    Nairobi,
    YourCity,
}

impl City {
    pub const ALL: [City; 4] = [City::NewDelhi, City::SanFrancisco, City::Nairobi, City::YourCity];

    /// Human-readable label (also used as the exported `city` property).
    pub fn display_name(self) -> &'static str {
        match self {
            City::NewDelhi => "New Delhi",
            City::SanFrancisco => "San Francisco",
            City::Nairobi => "Nairobi",
            City::YourCity => "Your city",
        }
    }

    /// Mock satellite-derived averages for the city.
    pub fn baseline(self) -> CityBaseline {
        let readings = match self {
            City::NewDelhi => Readings::new(0.25, 33.0, 0.6),
            City::SanFrancisco => Readings::new(0.35, 20.0, 0.1),
            City::Nairobi => Readings::new(0.45, 27.0, 0.2),
            City::YourCity => Readings::new(0.30, 28.0, 0.25),
        };
        CityBaseline { city: self, readings }
    }
}

/// Vegetation index, land-surface temperature (°C) and particulate proxy at one place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub vegetation_index: f64,
    pub surface_temp_c: f64,
    pub particulate_index: f64,
}

impl Readings {
    pub const fn new(vegetation_index: f64, surface_temp_c: f64, particulate_index: f64) -> Self {
        Self {
            vegetation_index,
            surface_temp_c,
            particulate_index,
        }
    }

    /// Add a scenario's deltas component-wise.
    ///
    /// No clamping: projected vegetation may leave `[0, 1]` and projected
    /// particulates may go negative.
    pub fn project(&self, delta: &ScenarioDelta) -> Readings {
        Readings {
            vegetation_index: self.vegetation_index + delta.vegetation,
            surface_temp_c: self.surface_temp_c + delta.temperature,
            particulate_index: self.particulate_index + delta.particulate,
        }
    }
}

/// Immutable per-city baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityBaseline {
    pub city: City,
    pub readings: Readings,
}

/// Hypothetical land-use change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Develop,
    Park,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Develop, Scenario::Park];

    pub fn display_name(self) -> &'static str {
        match self {
            Scenario::Develop => "Develop",
            Scenario::Park => "Park",
        }
    }

    /// Encoding used by the `proposed_flag` feature column.
    pub fn flag(self) -> i8 {
        match self {
            Scenario::Develop => 1,
            Scenario::Park => -1,
        }
    }
}

/// Additive deltas a scenario applies to the current readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDelta {
    pub vegetation: f64,
    pub temperature: f64,
    pub particulate: f64,
}

/// One delta per scenario; user-editable, otherwise constant for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub develop: ScenarioDelta,
    pub park: ScenarioDelta,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            develop: ScenarioDelta {
                vegetation: -0.30,
                temperature: 3.0,
                particulate: 0.10,
            },
            park: ScenarioDelta {
                vegetation: 0.25,
                temperature: -2.0,
                particulate: -0.05,
            },
        }
    }
}

impl ScenarioParams {
    pub fn delta(&self, scenario: Scenario) -> &ScenarioDelta {
        match scenario {
            Scenario::Develop => &self.develop,
            Scenario::Park => &self.park,
        }
    }
}

/// A user-drawn polygon together with the geometry object it came from.
///
/// The original geometry is kept verbatim so exports can echo it back.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedArea {
    pub geometry: serde_json::Value,
    pub polygon: Polygon,
}

/// Everything the presentation layer shows for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub city: City,
    pub baseline: Readings,
    pub selection: Option<SelectedArea>,
    /// `(x + y) mod 1` of the selection centroid, when a selection exists.
    pub seed: Option<f64>,
    pub current: Readings,
    pub develop: Readings,
    pub park: Readings,
    pub develop_score: f64,
    pub park_score: f64,
}

impl EvaluationResult {
    pub fn readings(&self, scenario: Scenario) -> &Readings {
        match scenario {
            Scenario::Develop => &self.develop,
            Scenario::Park => &self.park,
        }
    }

    pub fn score(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Develop => self.develop_score,
            Scenario::Park => self.park_score,
        }
    }

    /// Bar-chart-ready `(label, score)` pairs.
    pub fn score_bars(&self) -> [(&'static str, f64); 2] {
        [
            (Scenario::Develop.display_name(), self.develop_score),
            (Scenario::Park.display_name(), self.park_score),
        ]
    }
}

/// One fabricated training row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSample {
    pub current_ndvi: f64,
    pub impervious_frac: f64,
    pub elevation: f64,
    pub dist_to_water: f64,
    pub current_lst: f64,
    /// `+1` = develop, `-1` = park.
    pub proposed_flag: i8,
    pub delta_lst: f64,
}

impl SyntheticSample {
    /// Model inputs in `FEATURE_NAMES` order.
    pub fn features(&self) -> [f64; N_FEATURES] {
        [
            self.current_ndvi,
            self.impervious_frac,
            self.elevation,
            self.dist_to_water,
            self.current_lst,
            f64::from(self.proposed_flag),
        ]
    }
}

/// Gradient-boosting hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub learning_rate: f64,
    /// L2 penalty on leaf weights.
    pub lambda: f64,
    /// Minimum hessian sum per child (one per row for squared error).
    pub min_child_weight: f64,
    /// Minimum loss reduction to accept a split.
    pub gamma: f64,
}

impl Default for BoostParams {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            max_depth: 4,
            learning_rate: 0.05,
            lambda: 1.0,
            min_child_weight: 1.0,
            gamma: 0.0,
        }
    }
}

/// A full evaluation run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub city: City,
    pub params: ScenarioParams,
    /// GeoJSON input (`-` = stdin). `None` evaluates the bare baseline.
    pub geojson: Option<PathBuf>,
    /// Write the selection Feature here (`-` = stdout).
    pub export: Option<PathBuf>,
    pub chart: bool,
    pub chart_width: usize,
}

/// A training run's configuration.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub rows: usize,
    pub seed: u64,
    pub test_fraction: f64,
    pub boost: BoostParams,
    pub model_path: PathBuf,
    pub export_data: Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
            boost: BoostParams::default(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            export_data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_unclamped() {
        let current = Readings::new(0.1, 30.0, 0.05);
        let delta = ScenarioDelta {
            vegetation: -0.3,
            temperature: 1.0,
            particulate: -0.1,
        };
        let p = current.project(&delta);
        assert!((p.vegetation_index - (-0.2)).abs() < 1e-12);
        assert!((p.surface_temp_c - 31.0).abs() < 1e-12);
        assert!((p.particulate_index - (-0.05)).abs() < 1e-12);
    }

    #[test]
    fn scenario_flags_are_opposite() {
        assert_eq!(Scenario::Develop.flag(), 1);
        assert_eq!(Scenario::Park.flag(), -Scenario::Develop.flag());
    }

    #[test]
    fn baselines_respect_invariants() {
        for city in City::ALL {
            let b = city.baseline();
            assert_eq!(b.city, city);
            assert!((0.0..=1.0).contains(&b.readings.vegetation_index));
            assert!(b.readings.particulate_index >= 0.0);
        }
    }

    #[test]
    fn sample_features_follow_feature_names() {
        let s = SyntheticSample {
            current_ndvi: 0.1,
            impervious_frac: 0.2,
            elevation: 3.0,
            dist_to_water: 4.0,
            current_lst: 25.0,
            proposed_flag: -1,
            delta_lst: 0.0,
        };
        assert_eq!(s.features(), [0.1, 0.2, 3.0, 4.0, 25.0, -1.0]);
        assert_eq!(FEATURE_NAMES[5], "proposed_flag");
    }
}
