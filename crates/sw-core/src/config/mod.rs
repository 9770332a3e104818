//! Config file contents as plain data.
//!
//! Values are copied out of the TOML tree as they are. Absent keys become
//! empty strings or zero; the bootstrap layer turns those into defaults and
//! rejects values it cannot use.

use std::path::PathBuf;

/// Raw `[storage]`, `[api]`, `[submission]` and `[logging]` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Storage key prefix, empty when not configured
    pub storage_namespace: String,

    /// Directory holding the persisted form records
    pub data_dir: PathBuf,

    /// Quiescence window for form writes, milliseconds (0 = unset)
    pub debounce_ms: u64,

    /// Base URL of the backend (submission and suggestion endpoints)
    pub api_base_url: String,

    pub submission_path: String,

    pub suggestion_path: String,

    /// Ceiling for each network call, seconds (0 = unset)
    pub request_timeout_secs: u64,

    /// Raw failure policy spelling, e.g. `"surface"`
    pub submission_failure_policy: String,

    pub logs_dir: PathBuf,
}

impl AppConfig {
    /// Map a parsed TOML document. Wrongly typed values read as absent.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let string_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let integer_at = |section: &str, key: &str| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(0)
        };

        Ok(Self {
            storage_namespace: string_at("storage", "namespace"),
            data_dir: PathBuf::from(string_at("storage", "data_dir")),
            debounce_ms: integer_at("storage", "debounce_ms"),
            api_base_url: string_at("api", "base_url"),
            submission_path: string_at("api", "submission_path"),
            suggestion_path: string_at("api", "suggestion_path"),
            request_timeout_secs: integer_at("api", "timeout_secs"),
            submission_failure_policy: string_at("submission", "failure_policy"),
            logs_dir: PathBuf::from(string_at("logging", "logs_dir")),
        })
    }

    /// A config with nothing set.
    pub fn empty() -> Self {
        Self {
            storage_namespace: String::new(),
            data_dir: PathBuf::new(),
            debounce_ms: 0,
            api_base_url: String::new(),
            submission_path: String::new(),
            suggestion_path: String::new(),
            request_timeout_secs: 0,
            submission_failure_policy: String::new(),
            logs_dir: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_maps_every_section() {
        let value: toml::Value = toml::from_str(
            r#"
            [storage]
            namespace = "wizard"
            data_dir = "/tmp/wizard"
            debounce_ms = 250

            [api]
            base_url = "http://localhost:5000"
            submission_path = "/api/applications"
            suggestion_path = "/api/chat"
            timeout_secs = 30

            [submission]
            failure_policy = "surface"

            [logging]
            logs_dir = "/tmp/wizard/logs"
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.storage_namespace, "wizard");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/wizard"));
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.submission_path, "/api/applications");
        assert_eq!(config.suggestion_path, "/api/chat");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.submission_failure_policy, "surface");
        assert_eq!(config.logs_dir, PathBuf::from("/tmp/wizard/logs"));
    }

    #[test]
    fn missing_sections_become_empty_facts() {
        let value: toml::Value = toml::from_str("").unwrap();
        assert_eq!(AppConfig::from_toml(&value).unwrap(), AppConfig::empty());
    }

    #[test]
    fn negative_integers_are_treated_as_unset() {
        let value: toml::Value = toml::from_str("[storage]\ndebounce_ms = -5").unwrap();
        assert_eq!(AppConfig::from_toml(&value).unwrap().debounce_ms, 0);
    }
}
