use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::bulk_print::EligibilityGate;

const DEFAULT_SUBMIT_TYPES: &str = "paper";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dispatch: DispatchConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let submit_types = DispatchConfig::parse_submit_types(
            &env::var("DISPATCH_SUBMIT_TYPES").unwrap_or_else(|_| DEFAULT_SUBMIT_TYPES.to_string()),
        )?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dispatch: DispatchConfig { submit_types },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Bulk-print dispatch tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// "Received via" channels whose cases are posted on paper.
    pub submit_types: Vec<String>,
}

impl DispatchConfig {
    fn parse_submit_types(raw: &str) -> Result<Vec<String>, ConfigError> {
        let submit_types: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect();

        if submit_types.is_empty() {
            return Err(ConfigError::EmptySubmitTypes);
        }
        Ok(submit_types)
    }

    pub fn eligibility_gate(&self) -> EligibilityGate {
        EligibilityGate::new(self.submit_types.clone())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            submit_types: vec![DEFAULT_SUBMIT_TYPES.to_string()],
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptySubmitTypes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptySubmitTypes => {
                write!(f, "DISPATCH_SUBMIT_TYPES must list at least one channel")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptySubmitTypes => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
