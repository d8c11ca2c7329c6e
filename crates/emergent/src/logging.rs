//! File logging.
//!
//! The terminal is busy drawing the field, so logs go to a file. The filter
//! comes from `EMERGENT_LOG` and defaults to `info`.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EMERGENT_LOG";
const LOG_FILE: &str = "emergent.log";

/// Install the global subscriber.
///
/// Returns `None` when no log location is known. Keep the guard alive for
/// the whole run, buffered lines are flushed when it drops.
pub fn init(log_file: Option<&Path>) -> color_eyre::Result<Option<WorkerGuard>> {
    let Some(path) = log_file
        .map(Path::to_path_buf)
        .or_else(|| emergent_config::data_dir().map(|dir| dir.join(LOG_FILE)))
    else {
        return Ok(None);
    };
    let (dir, file_name) = split(&path);

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!(e))?;

    Ok(Some(guard))
}

fn split(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE.to_string());
    (dir, file_name)
}
