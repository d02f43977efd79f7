use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Route tracing output to `path`. The terminal belongs to the UI, so logs
/// never go to stdout or stderr while it is running. `RUST_LOG` overrides the
/// default `info` level.
pub fn init(path: &Path) -> io::Result<()> {
    let file = open_log_file(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(io::Error::other)
}

const LOG_FILE: &str = "pumpdeck.log";

/// Platform state directory for pumpdeck, or the local data directory where
/// the platform has no notion of state (macOS, Windows).
pub fn default_log_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "pumpdeck")?;
    Some(log_path_in(dirs.state_dir(), dirs.data_local_dir()))
}

fn log_path_in(state_dir: Option<&Path>, data_local_dir: &Path) -> PathBuf {
    state_dir.unwrap_or(data_local_dir).join(LOG_FILE)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_file_and_parents_are_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state/pumpdeck.log");
        let file = open_log_file(&path);
        assert!(file.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn log_path_prefers_state_dir() {
        let path = log_path_in(Some(Path::new("/x/state")), Path::new("/x/data"));
        assert_eq!(path, PathBuf::from("/x/state/pumpdeck.log"));
    }

    #[test]
    fn log_path_falls_back_to_local_data_dir() {
        let path = log_path_in(None, Path::new("/x/data"));
        assert_eq!(path, PathBuf::from("/x/data/pumpdeck.log"));
    }
}
