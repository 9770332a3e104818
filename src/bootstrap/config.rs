//! Config file loading and default resolution.
//!
//! [`load_config`] accepts whatever the file says. Defaults and the one hard
//! check (an unknown failure policy) live in [`resolve_settings`].

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use sw_core::config::AppConfig;
use sw_core::persistence::DEFAULT_NAMESPACE;
use sw_core::{StorageNamespace, SubmissionFailurePolicy};

pub const APP_DIR_NAME: &str = "support-wizard";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_SUBMISSION_PATH: &str = "/api/applications";
pub const DEFAULT_SUGGESTION_PATH: &str = "/api/chat";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Read and parse a TOML config file. Missing sections become empty values.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Runtime settings with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub namespace: StorageNamespace,
    pub data_dir: PathBuf,
    pub debounce: Duration,
    pub api_base_url: String,
    pub submission_path: String,
    pub suggestion_path: String,
    pub request_timeout: Duration,
    pub failure_policy: SubmissionFailurePolicy,
    pub logs_dir: PathBuf,
}

/// Fill the gaps in `config` with defaults.
///
/// The data directory falls back to `<local data dir>/support-wizard`, and
/// logs go to `<data dir>/logs` unless configured.
pub fn resolve_settings(config: AppConfig) -> anyhow::Result<Settings> {
    fn or_default(value: String, default: &str) -> String {
        if value.trim().is_empty() {
            default.to_string()
        } else {
            value
        }
    }

    let data_dir = if config.data_dir.as_os_str().is_empty() {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .context("Could not determine the local data directory")?
    } else {
        config.data_dir
    };

    let logs_dir = if config.logs_dir.as_os_str().is_empty() {
        data_dir.join("logs")
    } else {
        config.logs_dir
    };

    let failure_policy = if config.submission_failure_policy.trim().is_empty() {
        SubmissionFailurePolicy::default()
    } else {
        SubmissionFailurePolicy::parse(&config.submission_failure_policy).with_context(|| {
            format!(
                "Unknown submission failure policy: {:?} (expected \"surface\" or \"synthesize_reference\")",
                config.submission_failure_policy
            )
        })?
    };

    let debounce_ms = match config.debounce_ms {
        0 => DEFAULT_DEBOUNCE_MS,
        ms => ms,
    };
    let timeout_secs = match config.request_timeout_secs {
        0 => DEFAULT_TIMEOUT_SECS,
        secs => secs,
    };

    Ok(Settings {
        namespace: StorageNamespace::new(or_default(config.storage_namespace, DEFAULT_NAMESPACE)),
        data_dir,
        debounce: Duration::from_millis(debounce_ms),
        api_base_url: or_default(config.api_base_url, DEFAULT_API_BASE_URL),
        submission_path: or_default(config.submission_path, DEFAULT_SUBMISSION_PATH),
        suggestion_path: or_default(config.suggestion_path, DEFAULT_SUGGESTION_PATH),
        request_timeout: Duration::from_secs(timeout_secs),
        failure_policy,
        logs_dir,
    })
}
