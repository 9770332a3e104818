//! Log output for the support wizard.
//!
//! `RUST_LOG` wins when set. Otherwise the workspace crates log at debug in
//! debug builds and info in release builds, while the HTTP stack stays at
//! warn. Lines go to stdout and, when a logs directory is available, to
//! `support-wizard.log` inside it.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc, writer::MakeWriter},
    prelude::*,
    registry, EnvFilter, Layer, Registry,
};

pub const LOG_FILE_NAME: &str = "support-wizard.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// Dropping the guard stops the background writer, so it lives for the process.
static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn default_directives(debug_build: bool) -> Vec<String> {
    let level = if debug_build { "debug" } else { "info" };
    let mut directives = vec![level.to_string()];
    directives.extend(["sw_app", "sw_infra"].map(|krate| format!("{krate}={level}")));
    directives.extend(["hyper_util", "reqwest", "rustls"].map(|krate| format!("{krate}=warn")));
    directives
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(cfg!(debug_assertions)).join(",")))
}

/// `2025-01-15 10:30:45.123 INFO sw_app::usecases [coordinator.rs:42] message`
fn line_layer<W>(writer: W, ansi: bool) -> impl Layer<Registry> + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(ansi)
        .with_writer(writer)
}

/// Install the global subscriber.
///
/// A logs directory that cannot be created only costs the file output.
/// Fails when a subscriber is already installed.
pub fn init_tracing_subscriber(logs_dir: Option<&Path>) -> anyhow::Result<()> {
    let file_layer = match logs_dir.map(open_log_file).transpose() {
        Ok(writer) => writer.map(|writer| line_layer(writer, false)),
        Err(err) => {
            eprintln!("file logging disabled: {err:#}");
            None
        }
    };

    registry()
        .with(
            line_layer(io::stdout, cfg!(not(test)))
                .and_then(file_layer)
                .with_filter(env_filter()),
        )
        .try_init()?;
    Ok(())
}

fn open_log_file(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME));
    FILE_WRITER_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("log file writer already installed"))?;
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_builds_log_workspace_crates_at_debug() {
        let directives = default_directives(true);
        assert_eq!(directives[0], "debug");
        assert!(directives.contains(&"sw_app=debug".to_string()));
        assert!(directives.contains(&"reqwest=warn".to_string()));
    }

    #[test]
    fn release_builds_log_at_info() {
        let directives = default_directives(false);
        assert_eq!(directives[0], "info");
        assert!(directives.contains(&"sw_infra=info".to_string()));
        assert!(directives.contains(&"hyper_util=warn".to_string()));
    }

    #[test]
    fn default_directives_parse() {
        assert!(EnvFilter::try_new(default_directives(true).join(",")).is_ok());
    }
}
