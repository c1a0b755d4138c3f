// File-based diagnostics, enabled with --debug.
// The terminal UI owns stdout, so everything goes to a file instead.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "penguinfut-debug.log";

pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Install the global subscriber. With `enabled == false` nothing is
/// installed and every `tracing` macro is a no-op.
///
/// `RUST_LOG` overrides the default `debug` level when set.
pub fn init(enabled: bool) -> anyhow::Result<Option<PathBuf>> {
    if !enabled {
        return Ok(None);
    }

    let path = log_file_path();
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;

    tracing::info!("Penguinfut {} debug log", env!("CARGO_PKG_VERSION"));
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_installs_nothing() {
        assert_eq!(init(false).unwrap(), None);
    }

    #[test]
    fn test_log_file_lives_in_temp_dir() {
        let path = log_file_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(LOG_FILE_NAME));
    }
}
