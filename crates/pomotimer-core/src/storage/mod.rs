mod config;

pub use config::{
    validate, ConfigField, ConfigStore, Configuration, FileConfigStore, LoadOutcome,
    MemoryConfigStore, RawConfiguration,
};

use std::path::PathBuf;

/// Returns `~/.config/pomotimer[-dev]/` based on POMOTIMER_ENV.
///
/// Set POMOTIMER_ENV=dev to use development data directory. The directory
/// is created lazily by the first save.
pub fn data_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOTIMER_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("pomotimer-dev")
    } else {
        base_dir.join("pomotimer")
    }
}
