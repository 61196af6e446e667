//! Shared utilities for the workspace binaries.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for command output. When
/// `log_file` is set, the same events are appended to that file through a
/// non-blocking writer. `RUST_LOG` takes precedence over `default_level`.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// until the program exits.
pub fn init_tracing(default_level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = build_filter(default_level)?;

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

fn build_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level '{}'", default_level)),
    }
}

fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path '{}' has no file name", path.display()))?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(build_filter("info").is_ok());
        assert!(build_filter("trace,clients_binance=debug").is_ok());
        assert!(build_filter("clients_binance=loud").is_err());
    }

    #[test]
    fn file_writer_needs_a_file_name() {
        assert!(file_writer(Path::new("/")).is_err());
    }
}
