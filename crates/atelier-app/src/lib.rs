//! Atelier Application
//!
//! Practice session shell: owns the shared stores and a drawing board, and
//! turns toolbar actions and keyboard shortcuts into board commands.

pub mod actions;
pub mod session;
pub mod shortcuts;

pub use actions::UiAction;
pub use session::{AppConfig, AppError, AppResult, PracticeSession};
pub use shortcuts::{Shortcut, ShortcutRegistry};

/// Initialise logging from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once.
#[cfg(feature = "native")]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        log::info!("Starting Atelier");
    }
}
