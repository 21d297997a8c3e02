use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Sends diagnostics to `path`. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr. `RUST_LOG` wins over `level` when set.
pub fn init(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("typetarot.log");

        // a second init in the same process reports an error instead of panicking
        let first = init(&path, "debug");
        let second = init(&path, "debug");

        assert!(path.exists());
        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::Logging(_))));
    }
}
