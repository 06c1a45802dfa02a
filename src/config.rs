use crate::error::AppError;
use crate::features::encoder::EncodingMode;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TREES: usize = 100;
pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub games_path: PathBuf,
    pub champions_path: PathBuf,
    pub seed: u64,
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub test_size: f64,
    pub top_k: usize,
    pub encoding: EncodingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            games_path: PathBuf::from("games.csv"),
            champions_path: PathBuf::from("champion_info.json"),
            seed: DEFAULT_SEED,
            n_trees: DEFAULT_TREES,
            max_depth: None,
            test_size: DEFAULT_TEST_SIZE,
            top_k: DEFAULT_TOP_K,
            encoding: EncodingMode::PerSlot,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("LEAGUE_PREDICT_GAMES") {
            config.games_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("LEAGUE_PREDICT_CHAMPIONS") {
            config.champions_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("LEAGUE_PREDICT_SEED") {
            config.seed = parse_var("LEAGUE_PREDICT_SEED", &raw)?;
        }
        if let Some(raw) = lookup("LEAGUE_PREDICT_TREES") {
            config.n_trees = parse_var("LEAGUE_PREDICT_TREES", &raw)?;
        }
        if let Some(raw) = lookup("LEAGUE_PREDICT_TEST_SIZE") {
            config.test_size = parse_var("LEAGUE_PREDICT_TEST_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("LEAGUE_PREDICT_TOP_K") {
            config.top_k = parse_var("LEAGUE_PREDICT_TOP_K", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(AppError::Config(format!(
                "test size must be strictly between 0 and 1, got {}",
                self.test_size
            )));
        }
        if self.n_trees == 0 {
            return Err(AppError::Config("forest needs at least one tree".to_string()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.n_trees, 100);
        assert_eq!(config.games_path, PathBuf::from("games.csv"));
        assert_eq!(config.encoding, EncodingMode::PerSlot);
    }

    #[test]
    fn env_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("LEAGUE_PREDICT_SEED", "7"),
            ("LEAGUE_PREDICT_TREES", "12"),
            ("LEAGUE_PREDICT_TEST_SIZE", "0.25"),
            ("LEAGUE_PREDICT_GAMES", "/data/games.csv"),
        ]))
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.n_trees, 12);
        assert!((config.test_size - 0.25).abs() < 1e-12);
        assert_eq!(config.games_path, PathBuf::from("/data/games.csv"));
    }

    #[test]
    fn unparseable_seed_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("LEAGUE_PREDICT_SEED", "abc")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_size_out_of_range_is_rejected() {
        let err =
            Config::from_lookup(lookup_from(&[("LEAGUE_PREDICT_TEST_SIZE", "1.5")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
