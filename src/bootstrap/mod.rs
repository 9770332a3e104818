//! Bootstrap: configuration, logging and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

use std::path::PathBuf;

pub use config::{load_config, resolve_settings, Settings};
pub use wiring::{build_session, build_session_with_store, WizardSession};

use sw_core::AppConfig;

/// Load configuration (when a path is given), initialize logging and build a
/// ready-to-use session.
pub async fn start(config_path: Option<PathBuf>) -> anyhow::Result<WizardSession> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::empty(),
    };
    let settings = resolve_settings(config)?;

    self::tracing::init_tracing_subscriber(Some(&settings.logs_dir))?;
    ::tracing::info!(
        data_dir = %settings.data_dir.display(),
        namespace = settings.namespace.prefix(),
        "support wizard starting"
    );

    build_session(&settings).await
}
