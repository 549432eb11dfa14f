use crate::core::{AppError, Result};
use std::env;

pub mod database;
pub mod server;
pub mod store;

pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageBackend,
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Where order items are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MySql,
    /// Process-local; contents are lost on restart
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(StorageBackend::MySql),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(AppError::Configuration(format!(
                "Invalid STORAGE_BACKEND: {}",
                s
            ))),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let storage: StorageBackend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "mysql".to_string())
            .parse()?;

        let database = match storage {
            StorageBackend::MySql => Some(DatabaseConfig::from_env()?),
            StorageBackend::Memory => None,
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            storage,
            database,
            server: ServerConfig::from_env()?,
            store: StoreConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage == StorageBackend::MySql && self.database.is_none() {
            return Err(AppError::Configuration(
                "MySQL storage requires DATABASE_URL".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        self.store.validate()
    }
}
