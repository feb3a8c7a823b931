use crate::nutrition::DeltaThresholds;
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub thresholds: DeltaThresholds,
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse::<T>().ok())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = DeltaThresholds::default();
        Self {
            port: env_parse("PORT").unwrap_or(8080),
            data_dir: resolve_data_dir(),
            thresholds: DeltaThresholds {
                meal_tolerance: env_parse("MEAL_DELTA_TOLERANCE").unwrap_or(defaults.meal_tolerance),
                day_ok: env_parse("DAY_DELTA_OK").unwrap_or(defaults.day_ok),
                day_warn: env_parse("DAY_DELTA_WARN").unwrap_or(defaults.day_warn),
                timing_sum_tolerance: env_parse("TIMING_SUM_TOLERANCE")
                    .unwrap_or(defaults.timing_sum_tolerance),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            data_dir: PathBuf::from("data"),
            thresholds: DeltaThresholds::default(),
        }
    }
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}
