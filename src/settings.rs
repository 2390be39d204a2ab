//! Layered settings: defaults, an optional config file, then `BEATWATCH_*`
//! environment variables.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::MonitorConfig;
use crate::error::ConfigError;

/// Environment variable prefix, e.g. `BEATWATCH_ALLOWED_MISSES=5`.
pub const ENV_PREFIX: &str = "BEATWATCH";

/// Settings as read from file and environment, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Interval string, e.g. "60s" or "1.5m".
    pub expected_interval: String,
    pub allowed_misses: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            expected_interval: "60s".to_string(),
            allowed_misses: 3,
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("expected_interval", defaults.expected_interval)?
            .set_default("allowed_misses", i64::from(defaults.allowed_misses))?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Convert into a validated [`MonitorConfig`].
    pub fn monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        MonitorConfig::new(parse_duration(&self.expected_interval)?, self.allowed_misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = Settings::load_with(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());

        let config = settings.monitor_config().unwrap();
        assert_eq!(config.expected_interval, Duration::from_secs(60));
        assert_eq!(config.allowed_misses, 3);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file("expected_interval = \"30s\"\nallowed_misses = 2\n");
        let settings = Settings::load_with(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.expected_interval, "30s");
        assert_eq!(settings.allowed_misses, 2);
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("expected_interval = \"30s\"\nallowed_misses = 2\n");
        let settings = Settings::load_with(
            Some(file.path()),
            env(&[("BEATWATCH_ALLOWED_MISSES", "5"), ("BEATWATCH_EXPECTED_INTERVAL", "2m")]),
        )
        .unwrap();
        assert_eq!(settings.allowed_misses, 5);
        assert_eq!(
            settings.monitor_config().unwrap().expected_interval,
            Duration::from_secs(120)
        );
    }

    #[test]
    fn json_file_drives_the_monitor() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"expected_interval": "30s", "allowed_misses": 2}}"#).unwrap();

        let config = Settings::load_with(Some(file.path()), env(&[]))
            .unwrap()
            .monitor_config()
            .unwrap();
        let result = crate::data::process(
            &[serde_json::json!({"service": "custom", "timestamp": "2025-08-04T10:00:00Z"})],
            &config,
        )
        .unwrap();

        assert_eq!(
            result.alerts[0].alert_at.to_rfc3339(),
            "2025-08-04T10:01:00+00:00"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Settings::load_with(Some(Path::new("/nonexistent/beatwatch.toml")), env(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let bad_interval = Settings {
            expected_interval: "soon".to_string(),
            allowed_misses: 3,
        };
        assert!(matches!(
            bad_interval.monitor_config(),
            Err(ConfigError::InvalidDuration { .. })
        ));

        let zero_misses = Settings {
            allowed_misses: 0,
            ..Settings::default()
        };
        assert!(matches!(
            zero_misses.monitor_config(),
            Err(ConfigError::ZeroAllowedMisses)
        ));
    }
}
