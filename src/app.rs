//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment settings
//! - runs the area evaluator or the trainer
//! - prints reports/charts
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::cli::{Command, EvalArgs, PredictArgs, ScoreArgs, TrainArgs};
use crate::config::Settings;
use crate::domain::{DEFAULT_MODEL_PATH, EvalConfig, TrainConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `impact` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    // `impact` and `impact -c nairobi` behave like `impact eval ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Score(args) => handle_score(args),
        Command::Cities => {
            print!("{}", crate::report::format_cities());
            Ok(())
        }
        Command::Train(args) => handle_train(args),
        Command::Predict(args) => handle_predict(args),
    }
}

/// Entry point for the `train-delta-lst` binary: defaults only, no flags.
pub fn run_default_training() -> Result<(), AppError> {
    init_logging();
    let settings = Settings::from_env()?;
    let config = train_config(&TrainArgs::default(), &settings);
    run_and_print_training(&config)
}

/// Initialise `env_logger` once (`RUST_LOG` overrides the `warn` default).
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let config = eval_config_from_args(&args);

    let geojson = match &config.geojson {
        Some(path) => crate::io::read_geojson(path)?,
        None => None,
    };
    let evaluator = pipeline::AreaEvaluator::new(config.city, config.params);
    info!(
        "evaluating {} ({})",
        evaluator.city().display_name(),
        if geojson.is_some() { "with selection input" } else { "baseline only" }
    );
    let result = evaluator.evaluate(geojson.as_ref());

    println!("{}", crate::report::format_evaluation_summary(&result, &config.params));
    println!("{}", crate::report::format_comparison_table(&result));
    println!("{}", crate::report::format_scores(&result));

    if config.chart {
        println!(
            "{}",
            crate::plot::render_score_bars(&result.score_bars(), config.chart_width)
        );
    }

    // Optional export (only meaningful with a selection).
    if let Some(path) = &config.export {
        match crate::io::selection_feature(&result) {
            Some(feature) => {
                crate::io::write_feature(path, &feature)?;
                info!("selection exported to {}", path.display());
            }
            None => eprintln!("No polygon selected; nothing to export."),
        }
    }

    Ok(())
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let score = crate::models::compute_score(args.ndvi, args.lst, args.aod);
    println!("Impact score: {score:.1}");
    Ok(())
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    let config = train_config(&args, &settings);
    run_and_print_training(&config)
}

fn run_and_print_training(config: &TrainConfig) -> Result<(), AppError> {
    let run = pipeline::run_training(config)?;
    print!("{}", crate::report::format_training_report(&run));
    println!("Test RMSE: {:.3} °C", run.report.test_rmse);
    println!("Saved model to {}", config.model_path.display());
    if let Some(path) = &config.export_data {
        println!("Saved dataset to {}", path.display());
    }
    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    let path = args
        .model
        .clone()
        .or(settings.model_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

    let artifact = crate::io::read_artifact(&path)?;
    let delta = artifact.model.predict_row(&args.feature_row())?;
    print!("{}", crate::report::format_prediction(args.proposed, delta));
    Ok(())
}

pub fn eval_config_from_args(args: &EvalArgs) -> EvalConfig {
    EvalConfig {
        city: args.city,
        params: args.scenario.to_params(),
        geojson: args.geojson.clone(),
        export: args.export.clone(),
        chart: !args.no_chart,
        chart_width: args.width,
    }
}

/// Merge CLI flags over environment settings over built-in defaults.
pub fn train_config(args: &TrainArgs, settings: &Settings) -> TrainConfig {
    let defaults = TrainConfig::default();
    let mut boost = defaults.boost;
    if let Some(trees) = args.trees {
        boost.n_estimators = trees;
    }
    if let Some(depth) = args.max_depth {
        boost.max_depth = depth;
    }
    if let Some(lr) = args.learning_rate {
        boost.learning_rate = lr;
    }

    TrainConfig {
        rows: args.rows.unwrap_or(defaults.rows),
        seed: args.seed.or(settings.seed).unwrap_or(defaults.seed),
        test_fraction: defaults.test_fraction,
        boost,
        model_path: args
            .out
            .clone()
            .or_else(|| settings.model_path.clone())
            .unwrap_or(defaults.model_path),
        export_data: args.export_data.clone(),
    }
}

/// Rewrite argv so `impact` defaults to `impact eval`.
///
/// Rules:
/// - `impact`                      -> `impact eval`
/// - `impact -c nairobi ...`       -> `impact eval -c nairobi ...`
/// - `impact --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("eval".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "eval flags".
    if arg1.starts_with('-') {
        argv.insert(1, "eval".to_string());
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_eval() {
        assert_eq!(rewrite_args(argv(&["impact"])), argv(&["impact", "eval"]));
        assert_eq!(
            rewrite_args(argv(&["impact", "-c", "nairobi"])),
            argv(&["impact", "eval", "-c", "nairobi"])
        );
        assert_eq!(rewrite_args(argv(&["impact", "--help"])), argv(&["impact", "--help"]));
        assert_eq!(rewrite_args(argv(&["impact", "train"])), argv(&["impact", "train"]));
    }

    #[test]
    fn train_config_precedence() {
        let settings = Settings {
            model_path: Some(PathBuf::from("env/model.json")),
            seed: Some(7),
        };
        let defaults = train_config(&TrainArgs::default(), &Settings::default());
        assert_eq!(defaults.rows, 3000);
        assert_eq!(defaults.seed, 42);
        assert_eq!(defaults.model_path, PathBuf::from("models/gbt_model.json"));
        assert_eq!(defaults.boost.n_estimators, 200);
        assert_eq!(defaults.boost.max_depth, 4);
        assert_eq!(defaults.boost.learning_rate, 0.05);

        let from_env = train_config(&TrainArgs::default(), &settings);
        assert_eq!(from_env.seed, 7);
        assert_eq!(from_env.model_path, PathBuf::from("env/model.json"));

        let args = TrainArgs {
            seed: Some(1),
            out: Some(PathBuf::from("cli.json")),
            trees: Some(10),
            ..TrainArgs::default()
        };
        let from_cli = train_config(&args, &settings);
        assert_eq!(from_cli.seed, 1);
        assert_eq!(from_cli.model_path, PathBuf::from("cli.json"));
        assert_eq!(from_cli.boost.n_estimators, 10);
    }
}
