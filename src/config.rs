use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Optional configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "config/default";
/// Prefix of configuration environment variables, e.g. `INFLATION_DATA_DIR`
pub const ENV_PREFIX: &str = "INFLATION";

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Address the web server binds to (IP:PORT)
    pub bind_address: String,
    /// Directory holding one `<code>/FittedTermStructure.csv` per country
    pub data_dir: PathBuf,
    /// Per-request timeout of the web server
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from `.env`, the optional config file and the environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(CONFIG_FILE)
    }

    /// Load settings using `config_file` (extension optional) as the file layer
    pub fn load_from(config_file: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .add_source(File::with_name(config_file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<Settings>()?;
        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, bind_address: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Initialize application state for the given settings
pub fn initialize_app_state(settings: &Settings) -> AppState {
    info!("Reading country data from {}", settings.data_dir.display());
    AppState::new(compute::default_source(settings.data_dir.clone()))
}
