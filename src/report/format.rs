//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the evaluator and trainer stay free of presentation concerns
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::TrainRun;
use crate::domain::{City, EvaluationResult, Readings, Scenario, ScenarioParams};

/// Header, selection stats and headline readings for one evaluation.
pub fn format_evaluation_summary(result: &EvaluationResult, params: &ScenarioParams) -> String {
    let mut out = String::new();

    out.push_str("=== impact - City Growth Impact (prototype) ===\n");
    out.push_str(&format!("City: {}\n", result.city.display_name()));
    out.push_str(&format!("Baseline: {}\n", fmt_readings(&result.baseline)));

    match (&result.selection, result.seed) {
        (Some(selection), Some(seed)) => {
            let c = selection.polygon.centroid();
            out.push_str(&format!(
                "Selection: polygon detected ({} vertices)\n",
                selection.polygon.n_vertices()
            ));
            out.push_str(&format!(
                "- approx. area (map coordinate units): {:.4}\n",
                selection.polygon.area()
            ));
            out.push_str(&format!("- centroid: ({:.5}, {:.5}) | seed={seed:.4}\n", c.x, c.y));
        }
        _ => out.push_str("Selection: none (showing city baseline; pass --geojson to evaluate an area)\n"),
    }

    out.push_str(&format!(
        "Current NDVI (veg index): {:.2}\n",
        result.current.vegetation_index
    ));
    out.push_str(&format!(
        "Current Land Surface Temp: {:.1}°C\n",
        result.current.surface_temp_c
    ));
    out.push_str(&format!(
        "Current AOD (air particulates proxy): {:.2}\n",
        result.current.particulate_index
    ));

    out.push_str("\nScenario rules:\n");
    for scenario in Scenario::ALL {
        let d = params.delta(scenario);
        out.push_str(&format!(
            "- {:<8} ΔNDVI={:+.2} ΔLST={:+.1}°C ΔAOD={:+.2}\n",
            scenario.display_name(),
            d.vegetation,
            d.temperature,
            d.particulate
        ));
    }
    out.push('\n');

    out
}

/// Metric × (current, develop, park) comparison table.
pub fn format_comparison_table(result: &EvaluationResult) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<10} {:>10} {:>10} {:>10}", "metric", "current", "develop", "park").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<10} {:-<10} {:-<10}", "", "", "", "").trim_end());
    out.push('\n');

    let rows: [(&str, fn(&Readings) -> f64); 3] = [
        ("NDVI", |r| r.vegetation_index),
        ("LST (°C)", |r| r.surface_temp_c),
        ("AOD", |r| r.particulate_index),
    ];
    for (label, get) in rows {
        out.push_str(&format!(
            "{:<10} {:>10.3} {:>10.3} {:>10.3}\n",
            label,
            get(&result.current),
            get(result.readings(Scenario::Develop)),
            get(result.readings(Scenario::Park))
        ));
    }
    out
}

/// The two scenario scores.
pub fn format_scores(result: &EvaluationResult) -> String {
    let mut out = String::new();
    out.push_str("Impact Score (lower is better)\n");
    for scenario in Scenario::ALL {
        out.push_str(&format!(
            "- {} scenario score: {:.1}\n",
            scenario.display_name(),
            result.score(scenario)
        ));
    }
    out
}

/// Compiled-in city baselines.
pub fn format_cities() -> String {
    let mut out = String::new();
    out.push_str(format!("{:<14} {:<14} {:>6} {:>8} {:>6}", "key", "city", "NDVI", "LST °C", "AOD").trim_end());
    out.push('\n');
    for city in City::ALL {
        let r = city.baseline().readings;
        out.push_str(&format!(
            "{:<14} {:<14} {:>6.2} {:>8.1} {:>6.2}\n",
            city_key(city),
            city.display_name(),
            r.vegetation_index,
            r.surface_temp_c,
            r.particulate_index
        ));
    }
    out
}

/// Training run summary (what the trainer prints besides the RMSE line).
pub fn format_training_report(run: &TrainRun) -> String {
    let r = &run.report;
    let b = &run.config.boost;
    let mut out = String::new();
    out.push_str("=== delta-LST trainer (synthetic data) ===\n");
    out.push_str(&format!(
        "Rows: n={} (train={}, test={}) | seed={}\n",
        r.rows, r.n_train, r.n_test, run.config.seed
    ));
    out.push_str(&format!(
        "Target delta_lst: mean={:.3} std={:.3}\n",
        r.target_mean, r.target_std
    ));
    out.push_str(&format!(
        "Model: {} trees | depth={} | lr={} | lambda={}\n",
        r.n_trees, b.max_depth, b.learning_rate, b.lambda
    ));
    out.push_str(&format!("Mean-predictor RMSE: {:.3} °C\n", r.mean_baseline_rmse));
    out
}

/// Single-row prediction output.
pub fn format_prediction(scenario: Scenario, delta_lst: f64) -> String {
    format!(
        "Predicted ΔLST ({}): {delta_lst:+.3} °C\n",
        scenario.display_name()
    )
}

fn fmt_readings(r: &Readings) -> String {
    format!(
        "NDVI={:.2} LST={:.1}°C AOD={:.2}",
        r.vegetation_index, r.surface_temp_c, r.particulate_index
    )
}

fn city_key(city: City) -> String {
    use clap::ValueEnum;
    city.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| city.display_name().to_string())
}
