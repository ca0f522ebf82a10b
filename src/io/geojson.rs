//! GeoJSON in and out.
//!
//! Input is whatever the map widget hands over: a bare `Polygon` geometry, a
//! `Feature` wrapping one, or a `FeatureCollection` whose last feature is the
//! most recent drawing. Anything that does not yield a usable polygon is
//! treated as "no selection" rather than an error.
//!
//! Output is a single `Feature` echoing the original geometry with the city and
//! rounded headline numbers as properties.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, warn};
use nalgebra::Point2;
use serde_json::{Value, json};

use crate::domain::{EvaluationResult, SelectedArea};
use crate::error::AppError;
use crate::math::Polygon;

/// Path that means stdin/stdout instead of a file.
pub const STDIO_PATH: &str = "-";

/// Extract a polygon selection, swallowing every failure.
pub fn parse_selection(value: &Value) -> Option<SelectedArea> {
    match try_parse_selection(value) {
        Ok(area) => Some(area),
        Err(e) => {
            debug!("ignoring unusable selection geometry: {e}");
            None
        }
    }
}

fn try_parse_selection(value: &Value) -> Result<SelectedArea, AppError> {
    let geometry = extract_geometry(value)?;
    if let Some(kind) = geometry.get("type").and_then(Value::as_str) {
        if kind != "Polygon" {
            return Err(AppError::input(format!("Expected Polygon geometry, got {kind}.")));
        }
    }
    let ring = geometry
        .get("coordinates")
        .and_then(|c| c.get(0))
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::input("Geometry has no exterior ring."))?;

    let points = ring
        .iter()
        .map(parse_position)
        .collect::<Result<Vec<_>, _>>()?;
    let polygon = Polygon::from_ring(points)?;
    let centroid = polygon.centroid();
    if !(polygon.area().is_finite() && centroid.x.is_finite() && centroid.y.is_finite()) {
        return Err(AppError::input("Polygon is too large to measure."));
    }

    Ok(SelectedArea {
        geometry: geometry.clone(),
        polygon,
    })
}

fn extract_geometry(value: &Value) -> Result<&Value, AppError> {
    if let Some(geometry) = value.get("geometry") {
        return Ok(geometry);
    }
    if let Some(features) = value.get("features") {
        return features
            .as_array()
            .and_then(|f| f.last())
            .and_then(|f| f.get("geometry"))
            .ok_or_else(|| AppError::input("FeatureCollection has no feature geometry."));
    }
    if value.get("coordinates").is_some() {
        return Ok(value);
    }
    Err(AppError::input("No geometry found in GeoJSON input."))
}

fn parse_position(value: &Value) -> Result<Point2<f64>, AppError> {
    let coords = value
        .as_array()
        .filter(|c| c.len() >= 2)
        .ok_or_else(|| AppError::input("Position must be an array of at least two numbers."))?;
    let x = coords[0].as_f64();
    let y = coords[1].as_f64();
    match (x, y) {
        (Some(x), Some(y)) => Ok(Point2::new(x, y)),
        _ => Err(AppError::input("Position coordinates must be numbers.")),
    }
}

/// Load GeoJSON from a file (or stdin for `-`).
///
/// Read failures are errors; malformed JSON is logged and yields `None` so the
/// evaluator falls back to the city baseline.
pub fn read_geojson(path: &Path) -> Result<Option<Value>, AppError> {
    let mut text = String::new();
    if path.as_os_str() == STDIO_PATH {
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::input(format!("Failed to read GeoJSON from stdin: {e}")))?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .map_err(|e| AppError::input(format!("Failed to read GeoJSON '{}': {e}", path.display())))?;
    }

    match serde_json::from_str(&text) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("GeoJSON input is not valid JSON, evaluating without a selection: {e}");
            Ok(None)
        }
    }
}

/// Build the exported `Feature`, or `None` when nothing was selected.
pub fn selection_feature(result: &EvaluationResult) -> Option<Value> {
    let selection = result.selection.as_ref()?;
    Some(json!({
        "type": "Feature",
        "properties": {
            "city": result.city.display_name(),
            "current_ndvi": round_to(result.current.vegetation_index, 3),
            "current_lst": round_to(result.current.surface_temp_c, 2),
            "develop_score": round_to(result.develop_score, 1),
            "park_score": round_to(result.park_score, 1),
        },
        "geometry": selection.geometry,
    }))
}

/// Write a feature to a file (or stdout for `-`).
pub fn write_feature(path: &Path, feature: &Value) -> Result<(), AppError> {
    let text = serde_json::to_string(feature)
        .map_err(|e| AppError::input(format!("Failed to serialize GeoJSON: {e}")))?;
    if path.as_os_str() == STDIO_PATH {
        println!("{text}");
        return Ok(());
    }
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create GeoJSON '{}': {e}", path.display())))?;
    writeln!(file, "{text}")
        .map_err(|e| AppError::input(format!("Failed to write GeoJSON: {e}")))?;
    Ok(())
}

/// Round to `decimals` places via exact decimal formatting (ties to even).
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
