//! Generate 3000 synthetic rows, train the delta-LST model, write `models/gbt_model.json`.

use std::process::ExitCode;

fn main() -> ExitCode {
    match urban_impact::app::run_default_training() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
