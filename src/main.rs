use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use typetarot::{
    app::AppControl,
    app_dirs::AppDirs,
    config::{Config, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    ui, App,
};

/// reveal a hidden message, type a little, and get a reading of your typing personality
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// hidden message to reveal
    #[clap(short = 'm', long)]
    message: Option<String>,

    /// sentence to copy before free typing
    #[clap(short = 's', long)]
    sentence: Option<String>,

    /// config file to use instead of the platform default
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// log filter written to the log file (RUST_LOG takes precedence)
    #[clap(long)]
    log_level: Option<String>,
}

impl Cli {
    fn store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Flags win over the stored config.
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(message) = &self.message {
            config.message = message.clone();
        }
        if let Some(sentence) = &self.sentence {
            config.scripted_sentence = sentence.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli.store();
    let loaded = store.read();
    let config = cli.apply_overrides(loaded.as_ref().cloned().unwrap_or_default());
    start_logging(AppDirs::log_path().as_deref(), &config.log_level);
    if let Err(e) = &loaded {
        tracing::warn!(path = %store.path().display(), error = %e, "config unusable, using defaults");
    }
    tracing::info!(config = %store.path().display(), "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

/// Installs the file logger. A log that cannot be opened only costs the
/// diagnostics, the session still runs.
fn start_logging(path: Option<&Path>, level: &str) -> bool {
    let Some(path) = path else {
        return false;
    };
    match logging::init(path, level) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("typetarot: logging disabled: {e}");
            false
        }
    }
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        if app.handle(runner.step()) == AppControl::Quit {
            tracing::info!(phase = %app.session.phase(), "quit");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("typetarot").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_defaults() {
        let cli = cli(&[]);
        assert!(cli.message.is_none());
        assert!(cli.sentence.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.apply_overrides(Config::default()), Config::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = cli(&["-m", "cab", "--sentence", "Pack my box.", "--log-level", "debug"]);
        let config = cli.apply_overrides(Config::default());

        assert_eq!(config.message, "cab");
        assert_eq!(config.scripted_sentence, "Pack my box.");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.highlight_ms, Config::default().highlight_ms);
    }

    #[test]
    fn test_cli_config_path() {
        let cli = cli(&["--config", "/tmp/tarot.json"]);
        assert_eq!(cli.store().path(), PathBuf::from("/tmp/tarot.json").as_path());
    }

    #[test]
    fn test_unwritable_log_path_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("state");
        std::fs::write(&blocker, b"").unwrap();

        let log = blocker.join("typetarot.log");
        assert!(!start_logging(Some(log.as_path()), "info"));
        assert!(!start_logging(None, "info"));
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }
}
