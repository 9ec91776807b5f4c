//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::navitia::{DEFAULT_BASE_URL, DEFAULT_COVERAGE, NavitiaConfig};
use crate::stations::DEFAULT_MIN_SCORE;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATIONS_CSV: &str = "data/stations.csv";

/// An environment variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {key}: {value:?} ({reason})")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub navitia: NavitiaConfig,
    pub stations_csv: PathBuf,
    /// Minimum station match score, 0..=100
    pub match_threshold: u8,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; unset and blank values
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("NAVITIA_API_KEY").unwrap_or_default();
        let base_url = get("NAVITIA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let coverage = get("NAVITIA_COVERAGE").unwrap_or_else(|| DEFAULT_COVERAGE.to_string());
        let timeout_secs = parse("NAVITIA_TIMEOUT_SECS", get("NAVITIA_TIMEOUT_SECS"))?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let match_threshold: u8 = parse("STATION_MATCH_THRESHOLD", get("STATION_MATCH_THRESHOLD"))?
            .unwrap_or(DEFAULT_MIN_SCORE);
        if match_threshold > 100 {
            return Err(ConfigError {
                key: "STATION_MATCH_THRESHOLD",
                value: match_threshold.to_string(),
                reason: "must be between 0 and 100".to_string(),
            });
        }

        let bind_addr = parse("BIND_ADDR", get("BIND_ADDR"))?.unwrap_or_else(default_bind_addr);

        Ok(Self {
            navitia: NavitiaConfig::new(api_key)
                .with_base_url(base_url)
                .with_coverage(coverage)
                .with_timeout(timeout_secs),
            stations_csv: get("STATIONS_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIONS_CSV)),
            match_threshold,
            bind_addr,
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn parse<T>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.parse().map_err(|e: T::Err| ConfigError {
                key,
                reason: e.to_string(),
                value: v,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.navitia.api_key, "");
        assert!(!config.navitia.has_api_key());
        assert_eq!(config.navitia.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.navitia.coverage, "sncf");
        assert_eq!(config.navitia.timeout_secs, 30);
        assert_eq!(config.stations_csv, PathBuf::from("data/stations.csv"));
        assert_eq!(config.match_threshold, 60);
        assert_eq!(config.bind_addr, default_bind_addr());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("NAVITIA_API_KEY", " abc "),
            ("NAVITIA_BASE_URL", "http://localhost:9000/v1"),
            ("NAVITIA_COVERAGE", "fr-idf"),
            ("NAVITIA_TIMEOUT_SECS", "5"),
            ("STATIONS_CSV", "/srv/stations.csv"),
            ("STATION_MATCH_THRESHOLD", "75"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();
        assert_eq!(config.navitia.api_key, "abc");
        assert_eq!(config.navitia.base_url, "http://localhost:9000/v1");
        assert_eq!(config.navitia.coverage, "fr-idf");
        assert_eq!(config.navitia.timeout_secs, 5);
        assert_eq!(config.stations_csv, PathBuf::from("/srv/stations.csv"));
        assert_eq!(config.match_threshold, 75);
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = config(&[("NAVITIA_TIMEOUT_SECS", "  "), ("BIND_ADDR", "")]).unwrap();
        assert_eq!(config.navitia.timeout_secs, 30);
        assert_eq!(config.bind_addr, default_bind_addr());
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let err = config(&[("NAVITIA_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(err.key, "NAVITIA_TIMEOUT_SECS");
        assert_eq!(err.value, "soon");

        let err = config(&[("STATION_MATCH_THRESHOLD", "120")]).unwrap_err();
        assert_eq!(err.key, "STATION_MATCH_THRESHOLD");

        let err = config(&[("STATION_MATCH_THRESHOLD", "-1")]).unwrap_err();
        assert_eq!(err.key, "STATION_MATCH_THRESHOLD");

        let err = config(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.key, "BIND_ADDR");
    }
}
