//! Export the synthetic training dataset to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Columns follow the `SyntheticSample` field order, target last.

use std::path::Path;

use crate::domain::SyntheticSample;
use crate::error::AppError;

/// Write every sample as one CSV row with a header.
pub fn write_dataset_csv(path: &Path, samples: &[SyntheticSample]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create dataset CSV '{}': {e}", path.display())))?;

    for s in samples {
        writer
            .serialize(s)
            .map_err(|e| AppError::input(format!("Failed to write dataset CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush dataset CSV: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let path = std::env::temp_dir().join(format!("urban-impact-data-{}.csv", std::process::id()));
        let samples = crate::data::generate_synthetic(5, 3).unwrap();
        write_dataset_csv(&path, &samples).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("current_ndvi,impervious_frac,elevation,dist_to_water,current_lst,proposed_flag,delta_lst")
        );
        assert_eq!(lines.count(), 5);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: Vec<SyntheticSample> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(back.len(), 5);
        assert_eq!(back[0].proposed_flag, samples[0].proposed_flag);

        let _ = std::fs::remove_file(&path);
    }
}
