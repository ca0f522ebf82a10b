//! Command-line parsing for the city impact prototype.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the evaluation/training code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{City, Scenario, ScenarioDelta, ScenarioParams};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "impact", version, about = "City Growth Impact prototype: area evaluator + delta-LST trainer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a drawn area (GeoJSON) against a city baseline and both scenarios.
    Eval(EvalArgs),
    /// Compute the impact score for explicit readings.
    Score(ScoreArgs),
    /// List the built-in city baselines.
    Cities,
    /// Generate synthetic data, train the delta-LST model, and save it.
    Train(TrainArgs),
    /// Predict delta-LST for one row with a saved model.
    Predict(PredictArgs),
}

/// Options for area evaluation.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    /// City baseline to start from.
    #[arg(short = 'c', long, value_enum, default_value_t = City::NewDelhi)]
    pub city: City,

    /// GeoJSON with the drawn polygon (Polygon, Feature or FeatureCollection; `-` = stdin).
    #[arg(short = 'g', long, value_name = "GEOJSON")]
    pub geojson: Option<PathBuf>,

    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Export the selection as a GeoJSON Feature (`-` = stdout).
    #[arg(long, value_name = "GEOJSON")]
    pub export: Option<PathBuf>,

    /// Disable the terminal bar chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

/// Editable scenario deltas.
#[derive(Debug, Args, Clone)]
pub struct ScenarioArgs {
    /// Develop: ΔNDVI.
    #[arg(long, default_value_t = -0.30, allow_negative_numbers = true)]
    pub develop_ndvi: f64,

    /// Develop: ΔLST (°C).
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub develop_lst: f64,

    /// Develop: ΔAOD.
    #[arg(long, default_value_t = 0.10, allow_negative_numbers = true)]
    pub develop_aod: f64,

    /// Park: ΔNDVI.
    #[arg(long, default_value_t = 0.25, allow_negative_numbers = true)]
    pub park_ndvi: f64,

    /// Park: ΔLST (°C).
    #[arg(long, default_value_t = -2.0, allow_negative_numbers = true)]
    pub park_lst: f64,

    /// Park: ΔAOD.
    #[arg(long, default_value_t = -0.05, allow_negative_numbers = true)]
    pub park_aod: f64,
}

impl ScenarioArgs {
    pub fn to_params(&self) -> ScenarioParams {
        ScenarioParams {
            develop: ScenarioDelta {
                vegetation: self.develop_ndvi,
                temperature: self.develop_lst,
                particulate: self.develop_aod,
            },
            park: ScenarioDelta {
                vegetation: self.park_ndvi,
                temperature: self.park_lst,
                particulate: self.park_aod,
            },
        }
    }
}

/// Options for a direct score computation.
#[derive(Debug, Parser, Clone)]
pub struct ScoreArgs {
    /// Vegetation index.
    #[arg(long, allow_negative_numbers = true)]
    pub ndvi: f64,

    /// Land-surface temperature (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub lst: f64,

    /// Particulate index (AOD proxy).
    #[arg(long, allow_negative_numbers = true)]
    pub aod: f64,
}

/// Options for training.
#[derive(Debug, Parser, Clone, Default)]
pub struct TrainArgs {
    /// Number of synthetic rows.
    #[arg(short = 'n', long)]
    pub rows: Option<usize>,

    /// Seed for data generation and the train/test split.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Artifact path (default: models/gbt_model.json or $IMPACT_MODEL_PATH).
    #[arg(short = 'o', long, value_name = "JSON")]
    pub out: Option<PathBuf>,

    /// Also write the synthetic dataset to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_data: Option<PathBuf>,

    /// Number of boosting rounds.
    #[arg(long)]
    pub trees: Option<usize>,

    /// Maximum tree depth.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Learning rate (shrinkage).
    #[arg(long)]
    pub learning_rate: Option<f64>,
}

/// Options for a single prediction.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Artifact path (default: models/gbt_model.json or $IMPACT_MODEL_PATH).
    #[arg(short = 'm', long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Current NDVI.
    #[arg(long)]
    pub ndvi: f64,

    /// Impervious fraction.
    #[arg(long)]
    pub impervious: f64,

    /// Elevation (m).
    #[arg(long, allow_negative_numbers = true)]
    pub elevation: f64,

    /// Distance to water (km).
    #[arg(long)]
    pub dist_water: f64,

    /// Current land-surface temperature (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub lst: f64,

    /// Proposed change.
    #[arg(long, value_enum, default_value_t = Scenario::Develop)]
    pub proposed: Scenario,
}

impl PredictArgs {
    /// Feature row in model column order.
    pub fn feature_row(&self) -> [f64; crate::domain::N_FEATURES] {
        [
            self.ndvi,
            self.impervious,
            self.elevation,
            self.dist_water,
            self.lst,
            f64::from(self.proposed.flag()),
        ]
    }
}
