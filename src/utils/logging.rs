//! Logger setup.
//!
//! The terminal belongs to the game while it runs, so records go to
//! ~/.flapper/flapper.log instead of stderr.

use crate::constants::LOG_FILE;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "flapper=debug"). `RUST_LOG` wins over it when set.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub path: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Pick the active filter: `RUST_LOG`, then the configured one, then "info".
pub fn resolve_filter(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|s| !s.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| "info".to_string())
}

/// Initializes the global logger once. Later calls are ignored.
///
/// Returns the log file path on the first successful call.
pub fn init_logging(config: LoggingConfig) -> io::Result<Option<PathBuf>> {
    let path = match config.path {
        Some(path) => path,
        None => super::persistence::data_path(LOG_FILE)?,
    };

    let mut result = Ok(None);
    INIT.call_once(|| {
        result = open_log(&path).map(|file| {
            let filter = resolve_filter(std::env::var("RUST_LOG").ok(), config.filter.as_deref());
            env_logger::Builder::new()
                .parse_filters(&filter)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .write_style(env_logger::WriteStyle::Never)
                .format_timestamp_millis()
                .init();
            log::debug!("logging initialized ({})", filter);
            Some(path.clone())
        });
    });
    result
}

fn open_log(path: &Path) -> io::Result<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_wins() {
        assert_eq!(
            resolve_filter(Some("debug".into()), Some("warn")),
            "debug"
        );
    }

    #[test]
    fn test_configured_filter_used_without_env() {
        assert_eq!(resolve_filter(None, Some("warn")), "warn");
        assert_eq!(resolve_filter(Some("  ".into()), Some("warn")), "warn");
    }

    #[test]
    fn test_default_filter_is_info() {
        assert_eq!(resolve_filter(None, None), "info");
    }
}
