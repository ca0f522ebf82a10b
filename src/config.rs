//! Environment settings.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. CLI flags take precedence over these; these take precedence over the
//! built-in defaults.
//!
//! - `IMPACT_MODEL_PATH`: where the trainer writes (and `predict` reads) the artifact
//! - `IMPACT_SEED`: trainer seed

use std::path::PathBuf;

use crate::error::AppError;

pub const ENV_MODEL_PATH: &str = "IMPACT_MODEL_PATH";
pub const ENV_SEED: &str = "IMPACT_SEED";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub model_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Load `.env` (if present) and read settings from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, AppError> {
        let model_path = lookup(ENV_MODEL_PATH)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let seed = match lookup(ENV_SEED).filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::input(format!("Invalid {ENV_SEED}='{raw}': {e}")))?,
            ),
            None => None,
        };
        Ok(Self { model_path, seed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Settings::from_lookup(lookup(&[])).unwrap(), Settings::default());
        assert_eq!(
            Settings::from_lookup(lookup(&[(ENV_MODEL_PATH, "  ")])).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn reads_path_and_seed() {
        let s = Settings::from_lookup(lookup(&[(ENV_MODEL_PATH, "out/m.json"), (ENV_SEED, " 7 ")])).unwrap();
        assert_eq!(s.model_path, Some(PathBuf::from("out/m.json")));
        assert_eq!(s.seed, Some(7));
    }

    #[test]
    fn rejects_bad_seed() {
        let err = Settings::from_lookup(lookup(&[(ENV_SEED, "forty-two")])).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
