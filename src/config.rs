// Service configuration - read once from the environment (and `.env`)

use std::env;
use std::time::Duration;

use tracing::{debug, warn};

pub const DEMO_API_KEY: &str = "DEMO_KEY";

const DEFAULT_NEOWS_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1";
const DEFAULT_USGS_EVENT_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
const DEFAULT_COMETS_URL: &str = "https://data.nasa.gov/resource/b67r-rgxc.json";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub nasa_api_key: String,
    pub neows_base_url: String,
    pub usgs_event_url: String,
    pub comets_url: String,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            nasa_api_key: DEMO_API_KEY.to_string(),
            neows_base_url: DEFAULT_NEOWS_BASE_URL.to_string(),
            usgs_event_url: DEFAULT_USGS_EVENT_URL.to_string(),
            comets_url: DEFAULT_COMETS_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_ok() {
            debug!("loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout = match get("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid PROVIDER_TIMEOUT_SECS");
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            nasa_api_key: get("NASA_API_KEY").unwrap_or(defaults.nasa_api_key),
            neows_base_url: get("NEOWS_BASE_URL").unwrap_or(defaults.neows_base_url),
            usgs_event_url: get("USGS_EVENT_URL").unwrap_or(defaults.usgs_event_url),
            comets_url: get("NASA_COMETS_URL").unwrap_or(defaults.comets_url),
            request_timeout,
        }
    }

    pub fn uses_demo_key(&self) -> bool {
        self.nasa_api_key == DEMO_API_KEY
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServiceConfig::default());
        assert!(config.uses_demo_key());
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("NASA_API_KEY", "abc123"),
            ("PROVIDER_TIMEOUT_SECS", "3"),
            ("USGS_EVENT_URL", "http://localhost:9000/query"),
        ]));
        assert_eq!(config.nasa_api_key, "abc123");
        assert!(!config.uses_demo_key());
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.usgs_event_url, "http://localhost:9000/query");
        assert_eq!(config.neows_base_url, DEFAULT_NEOWS_BASE_URL);
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("NASA_API_KEY", "  "),
            ("PROVIDER_TIMEOUT_SECS", "soon"),
        ]));
        assert!(config.uses_demo_key());
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
