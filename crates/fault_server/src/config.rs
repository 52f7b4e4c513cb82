//! Server configuration
//!
//! Loaded from defaults, an optional `config.toml` in the working directory,
//! and `FAULT_`-prefixed environment variables (in that order of
//! precedence, last wins). Nested keys use `__`, e.g.
//! `FAULT_SERVER__PORT=8080` or `FAULT_FAULT__INJECT_PERCENT=0.25`.

use std::{sync::Arc, time::Duration};

use fault_engine::{FaultEngine, FaultOptions, Injector};
use fault_injectors::{ErrorInjector, InjectorError, SlowInjector};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// When and where faults are injected
    #[serde(default)]
    pub fault: FaultOptions,

    /// What an injected fault does
    #[serde(default)]
    pub injector: InjectorConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_format: default_log_format(),
            shutdown_timeout_secs: Some(30),
        }
    }
}

impl ServerConfig {
    /// Address to bind, as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether logs should be emitted as JSON
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Graceful shutdown timeout
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs.unwrap_or(30))
    }
}

/// Injector selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InjectorConfig {
    /// No injector; every request passes through
    None,

    /// Respond with an error status
    Error {
        /// HTTP status code to respond with
        #[serde(default = "default_status_code")]
        status_code: u16,

        /// Response body, defaults to the reason phrase
        #[serde(default)]
        status_text: Option<String>,
    },

    /// Delay the request, then run the handler
    Slow {
        /// Added latency in milliseconds
        delay_ms: u64,
    },
}

const fn default_status_code() -> u16 {
    500
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self::Error {
            status_code: default_status_code(),
            status_text: None,
        }
    }
}

impl InjectorConfig {
    /// Build the configured injector
    pub fn build(&self) -> Result<Option<Arc<dyn Injector>>, InjectorError> {
        let injector: Arc<dyn Injector> = match self {
            Self::None => return Ok(None),
            Self::Error {
                status_code,
                status_text,
            } => {
                let mut injector = ErrorInjector::new(*status_code)?;
                if let Some(text) = status_text {
                    injector = injector.with_status_text(text.clone());
                }
                Arc::new(injector)
            },
            Self::Slow { delay_ms } => {
                Arc::new(SlowInjector::new(Duration::from_millis(*delay_ms)))
            },
        };

        Ok(Some(injector))
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, ServerError> {
        Self::from_sources(config::File::with_name("config").required(false), None)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ServerError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Layer the environment over a file source.
    ///
    /// `env` replaces the process environment when given.
    fn from_sources<S>(
        file: S,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ServerError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., FAULT_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("FAULT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("fault.path_blacklist")
                    .with_list_parse_key("fault.path_whitelist")
                    .source(env),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Build the fault engine described by this configuration
    pub fn build_engine(&self) -> Result<FaultEngine, ServerError> {
        let injector = self.injector.build()?;
        Ok(FaultEngine::from_optional(injector, self.fault.clone()))
    }
}
