//! Configuration management for the barbershop tools

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// File name of the flat-file store inside the user's documents folder
pub const DEFAULT_DATA_FILE_NAME: &str = "registros_barberia.csv";
/// File name of the spreadsheet export inside the user's documents folder
pub const DEFAULT_EXPORT_FILE_NAME: &str = "reporte_barberia.xlsx";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Per-subdomain database selection
#[derive(Debug, Deserialize, Clone)]
pub struct TenantsConfig {
    pub enabled: bool,
    /// Directory holding one `<subdomain>.db` file per tenant
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Flat-file locations used by the command-line tool
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    pub data_file: Option<PathBuf>,
    pub export_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub tenants: TenantsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with prefix BARBERIA_ (e.g. BARBERIA_SERVER__PORT)
            .add_source(
                Environment::with_prefix("BARBERIA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl StorageConfig {
    /// Flat-file store path, falling back to `~/Documents/registros_barberia.csv`
    pub fn resolved_data_file(&self) -> Option<PathBuf> {
        self.data_file
            .clone()
            .or_else(|| documents_dir().map(|dir| dir.join(DEFAULT_DATA_FILE_NAME)))
    }

    /// Spreadsheet export path, falling back to `~/Documents/reporte_barberia.xlsx`
    pub fn resolved_export_file(&self) -> Option<PathBuf> {
        self.export_file
            .clone()
            .or_else(|| documents_dir().map(|dir| dir.join(DEFAULT_EXPORT_FILE_NAME)))
    }
}

fn documents_dir() -> Option<PathBuf> {
    let dirs = directories::UserDirs::new()?;
    Some(
        dirs.document_dir()
            .map(PathBuf::from)
            .unwrap_or_else(|| dirs.home_dir().join("Documents")),
    )
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://barber_mvp.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Default for TenantsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_dir: PathBuf::from("tenants"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
