//! Tracing setup for the command line tool.

use std::fs::{self, OpenOptions};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// Logs go to stderr, filtered by `RUST_LOG` (default `info`). When
/// `log_file` is given, the same events are appended to that file without
/// ANSI colors. The returned guard must be kept alive until exit so the
/// file writer is flushed.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_writer, guard) = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(file_writer.map(|writer| fmt::layer().with_writer(writer).with_ansi(false)))
        .with(filter)
        .try_init()
        .map_err(|e| eyre!("Cannot install log subscriber: {e}"))?;

    if let Some(path) = log_file {
        info!(path = %path.display(), "logging to file");
    }

    Ok(guard)
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Cannot create log directory {}", parent.display())
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Cannot create or write to log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("nested").join("test.log");

        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_open_log_file_parent_is_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = open_log_file(&blocker.join("test.log")).unwrap_err();
        assert!(err.to_string().contains("Cannot create log directory"));
    }
}
