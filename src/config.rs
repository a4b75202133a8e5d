use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{collections::HashMap, env};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Pluralization and pdf font settings for shopping list exports.
#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    /// `ru` for Russian numeral agreement, `none` to keep units as stored
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_plural_threshold")]
    pub plural_threshold: u64,
    /// unit -> [few, many]
    #[serde(default = "default_plural_exceptions")]
    pub plural_exceptions: HashMap<String, [String; 2]>,
    /// Font file used instead of the embedded one
    #[serde(default)]
    pub font_path: Option<String>,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            plural_threshold: default_plural_threshold(),
            plural_exceptions: default_plural_exceptions(),
            font_path: None,
        }
    }
}

fn default_locale() -> String {
    "ru".to_string()
}

fn default_plural_threshold() -> u64 {
    foodgram_shopping::DEFAULT_PLURAL_THRESHOLD
}

fn default_plural_exceptions() -> HashMap<String, [String; 2]> {
    HashMap::from([(
        "банка".to_string(),
        ["банки".to_string(), "банок".to_string()],
    )])
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOODGRAM__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite:foodgram.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOODGRAM")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy variables without prefix
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", jwt_secret)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.shopping.plural_threshold == 0 {
            return Err("Shopping plural_threshold must be greater than 0".to_string());
        }
        if !matches!(self.shopping.locale.as_str(), "ru" | "none") {
            return Err(format!(
                "Unsupported shopping locale '{}', expected 'ru' or 'none'",
                self.shopping.locale
            ));
        }
        Ok(())
    }
}
