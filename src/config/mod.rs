use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::core::{PredictorError, PredictorResult};
use crate::monitoring::{LogLevel, TelemetryConfig};

/// Prefix of environment overrides, e.g. `PREDICTOR__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "PREDICTOR";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "predictor.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: LogLevel,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Load defaults, then the config file, then `PREDICTOR__*` variables
    pub fn load(config_path: Option<&Path>) -> PredictorResult<Self> {
        Self::load_with_prefix(config_path, ENV_PREFIX)
    }

    /// Same as [`Settings::load`] with a custom environment prefix.
    ///
    /// An explicit `config_path` must exist; the implicit
    /// `predictor.toml` is optional.
    pub fn load_with_prefix(config_path: Option<&Path>, env_prefix: &str) -> PredictorResult<Self> {
        let defaults = Settings::default();

        let file_source = match config_path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.enable_cors", defaults.server.enable_cors)?
            .set_default("logging.enabled", defaults.logging.enabled)?
            .set_default("logging.level", defaults.logging.level.as_str())?
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Apply command-line overrides on top of loaded settings
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        log_level: Option<LogLevel>,
    ) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
        self
    }

    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            enabled: self.logging.enabled,
            log_level: self.logging.level,
        }
    }

    pub fn save(&self, path: &Path) -> PredictorResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PredictorError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
