pub mod global;
pub mod model;


pub use global::{CONFIG, resolve_settings, set_config_path};
pub use model::{
    LoggingConfig, QueryConfig, SelectorConfig, ServerConfig, Settings, WorkerConfig,
    load_settings,
};
