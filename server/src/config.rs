use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LoggingFormat,
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFormat {
    Json,
    Pretty,
    Full,
    Compact,
}

impl AppConfig {
    /// Load from `path`, picking the environment file from `APP_ENV`.
    pub fn new<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let run_mode = std::env::var("APP_ENV").ok();
        Self::load_with_options(path, run_mode, None)
    }

    /// Layered load: `default` -> `<run_mode>` -> `local` -> `TODO_*`
    /// environment variables -> explicit overrides.
    pub fn load_with_options<P: AsRef<Path>>(
        path: P,
        run_mode: Option<String>,
        overrides: Option<HashMap<String, String>>,
    ) -> crate::Result<Self> {
        let dir = path.as_ref().to_string_lossy();
        let mut builder = Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")));

        if let Some(run_mode) = run_mode.filter(|m| !m.is_empty()) {
            builder = builder
                .add_source(File::with_name(&format!("{dir}/{run_mode}")).required(false));
        }

        // not committed; developer-local tweaks
        builder = builder
            .add_source(File::with_name(&format!("{dir}/local")).required(false))
            .add_source(
                Environment::with_prefix("TODO")
                    .prefix_separator("_")
                    .separator("__"),
            );

        for (key, value) in overrides.unwrap_or_default() {
            builder = builder.set_override(key, value)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("configs")
    }

    #[test]
    fn loads_defaults() {
        let config = AppConfig::load_with_options(config_dir(), None, None).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.format, LoggingFormat::Full);
    }

    #[test]
    fn run_mode_file_layers_over_default() {
        let config =
            AppConfig::load_with_options(config_dir(), Some("test".to_string()), None).unwrap();
        assert_eq!(config.server.port, 0);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.format, LoggingFormat::Compact);
    }

    #[test]
    fn missing_run_mode_file_is_optional() {
        let config =
            AppConfig::load_with_options(config_dir(), Some("staging".to_string()), None)
                .unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn explicit_overrides_win() {
        let mut overrides = HashMap::new();
        overrides.insert("server.port".to_string(), "9000".to_string());
        overrides.insert("database.url".to_string(), "sqlite://other.db".to_string());

        let config = AppConfig::load_with_options(
            config_dir(),
            Some("test".to_string()),
            Some(overrides),
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, "sqlite://other.db");
    }

    #[test]
    fn missing_directory_is_config_error() {
        let err = AppConfig::load_with_options("/nonexistent/configs", None, None).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
