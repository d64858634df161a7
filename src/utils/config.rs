use std::path::PathBuf;

use tracing::Level;

use crate::utils::error::ConfigError;

pub const LOG_LEVEL_VAR: &str = "TENSORVIEW_LOG_LEVEL";
pub const EVENTS_JSONL_VAR: &str = "TENSORVIEW_EVENTS_JSONL";

/// Runtime settings read from the process environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub log_level: Level,
    /// Where recorded delegate events are written, if anywhere.
    pub events_jsonl_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            events_jsonl_path: None,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so parsing can be exercised
    /// without touching the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(value) if !value.trim().is_empty() => parse_log_level(&value)?,
            _ => Level::INFO,
        };

        let events_jsonl_path = lookup(EVENTS_JSONL_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            log_level,
            events_jsonl_path,
        })
    }
}

fn parse_log_level(value: &str) -> Result<Level, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigError::InvalidLogLevel {
            name: LOG_LEVEL_VAR,
            value: value.to_string(),
        }),
    }
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
    fn defaults_when_unset() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn parses_values() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_VAR, "Debug"),
            (EVENTS_JSONL_VAR, "/tmp/events.jsonl"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(
            config.events_jsonl_path.as_deref(),
            Some(std::path::Path::new("/tmp/events.jsonl"))
        );
    }

    #[test]
    fn rejects_unknown_level() {
        match RuntimeConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "verbose")])) {
            Err(ConfigError::InvalidLogLevel { name, value }) => {
                assert_eq!(name, LOG_LEVEL_VAR);
                assert_eq!(value, "verbose");
            }
            other => panic!("expected invalid log level error, got {other:?}"),
        }
    }
}
