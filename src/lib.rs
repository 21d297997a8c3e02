// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod archetype;
pub mod capture;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod input;
pub mod keystroke;
pub mod logging;
pub mod metrics;
pub mod quality;
pub mod reveal;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;

pub use app::App;
pub use error::{Error, Result};
