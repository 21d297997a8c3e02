use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("typetarot"),
            )
        } else {
            ProjectDirs::from("", "", "typetarot").map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    /// Diagnostic log written while the TUI owns the terminal.
    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("typetarot.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_lives_in_state_dir() {
        if let (Some(dir), Some(log)) = (AppDirs::state_dir(), AppDirs::log_path()) {
            assert_eq!(log.parent(), Some(dir.as_path()));
            assert!(dir.ends_with("typetarot"));
        }
    }
}
