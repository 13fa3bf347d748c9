use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;

use crate::shared::config::model::{Settings, load_settings, load_settings_from};

static CONFIG_PATH: OnceCell<String> = OnceCell::new();

pub static CONFIG: Lazy<Arc<Settings>> = Lazy::new(|| {
    Arc::new(
        resolve_settings(CONFIG_PATH.get().map(String::as_str))
            .expect("Failed to load configuration"),
    )
});

/// Overrides the configuration path. Only effective before `CONFIG` is first
/// read; a second call hands the rejected path back.
pub fn set_config_path(path: impl Into<String>) -> Result<(), String> {
    CONFIG_PATH.set(path.into())
}

/// An explicit path wins over `SNEL_SEARCH_CONFIG` and the default `config`.
pub fn resolve_settings(explicit: Option<&str>) -> Result<Settings, config::ConfigError> {
    match explicit {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    }
}
