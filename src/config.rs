use std::path::PathBuf;
use std::sync::OnceLock;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::error::ConfigError;

pub type SharedConfig = RwLock<Config>;

// initialized once by the embedding application
pub static CONFIG: OnceLock<SharedConfig> = OnceLock::new();

pub const CONFIG_FILE_NAME: &str = "rootcellar.toml";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Where the app keeps its files, including this config.
    pub data_dir: PathBuf,

    /// Shown in page titles and startup logs.
    pub site_name: String,

    /// Page size used when a catalog request doesn't pick one.
    pub default_page_size: u32,

    /// Whether `bootstrap` should run the reference-data seeder.
    pub seed_on_startup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            site_name: "Root Beer Review".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            seed_on_startup: true,
        }
    }
}

impl Config {
    /// Attempts to read a previous `Config` from disk.
    pub async fn from_disk(data_dir: PathBuf) -> Result<Self, ConfigError> {
        let s = tokio::fs::read_to_string(data_dir.join(CONFIG_FILE_NAME))
            .await
            .map_err(ConfigError::ReadFailed)?;

        let config: Self = toml::from_str(s.as_str()).map_err(ConfigError::ParseFailed)?;
        Ok(config)
    }

    /// Use this EXACTLY ONCE to initialize the config.
    ///
    /// The embedding app should be the only one calling this.
    pub async fn init(config: Config) {
        if CONFIG.get().is_none() {
            CONFIG
                .set(RwLock::new(config))
                .unwrap_or_else(|_| tracing::error!("config was initialized concurrently"));
        } else {
            tracing::error!("attempted to init the config, but it is already initialized");
        }
    }

    /// Grabs the config for reading.
    ///
    /// Others can't write while you hold this, so don't hold it long.
    pub async fn read() -> RwLockReadGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .read()
            .await
    }

    pub async fn write() -> RwLockWriteGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .write()
            .await
    }
}
