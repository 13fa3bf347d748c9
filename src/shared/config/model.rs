use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::engine::types::{WorkerId, WorkerRecord};

pub const CONFIG_ENV_VAR: &str = "SNEL_SEARCH_CONFIG";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub workers: Vec<WorkerConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub http_addr: String,
    #[serde(default = "default_keep_alive")]
    pub keep_alive: bool,
    /// 0 disables the connection limit
    #[serde(default)]
    pub max_connections: usize,
}

fn default_keep_alive() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectorConfig {
    /// Size of the top-K candidate pool
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default = "default_resync_interval_secs")]
    pub resync_interval_secs: u64,
}

fn default_max_workers() -> usize {
    100
}

fn default_resync_interval_secs() -> u64 {
    60
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            resync_interval_secs: default_resync_interval_secs(),
        }
    }
}

impl SelectorConfig {
    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_interval_secs.max(1))
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryConfig {
    /// Number of workers drawn for one aggregating query
    #[serde(default = "default_workers_per_query")]
    pub workers_per_query: usize,
    /// Upper bound for a single worker round-trip
    #[serde(default = "default_worker_timeout_ms")]
    pub worker_timeout_ms: u64,
}

fn default_workers_per_query() -> usize {
    3
}

fn default_worker_timeout_ms() -> u64 {
    15_000
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            workers_per_query: default_workers_per_query(),
            worker_timeout_ms: default_worker_timeout_ms(),
        }
    }
}

impl QueryConfig {
    pub fn worker_timeout(&self) -> Duration {
        Duration::from_millis(self.worker_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    pub id: u32,
    pub addr: String,
    #[serde(default)]
    pub rank: f64,
}

impl WorkerConfig {
    pub fn record(&self) -> WorkerRecord {
        WorkerRecord::new(WorkerId(self.id), self.rank)
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
