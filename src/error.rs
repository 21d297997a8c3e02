use std::io;

/// Failures at the edges of the app: config file, embedded assets, log file.
///
/// The typing core itself never fails; degenerate input yields default values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("dictionary not found: {0}")]
    DictionaryNotFound(String),

    #[error("logging init failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
