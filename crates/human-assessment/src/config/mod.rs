use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub narrative: NarrativeConfig,
    pub business: BusinessProfile,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&env_or("APP_ENV", "development"));

        let host = env_or("APP_HOST", "127.0.0.1");
        let port = env_or("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env_or("APP_LOG_LEVEL", "info");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            narrative: NarrativeConfig::from_env()?,
            business: BusinessProfile::from_env(),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection and sampling settings for the text-generation service.
#[derive(Clone)]
pub struct NarrativeConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl NarrativeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("NARRATIVE_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            api_base: env_or("NARRATIVE_API_BASE", "https://api.openai.com/v1"),
            api_key,
            model: env_or("NARRATIVE_MODEL", "gpt-4"),
            max_tokens: parse_env("NARRATIVE_MAX_TOKENS", 2000)?,
            temperature: parse_temperature()?,
            timeout: Duration::from_secs(parse_env("NARRATIVE_TIMEOUT_SECS", 30)?),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for NarrativeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Contact and branding details surfaced in reports and the fallback narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessProfile {
    pub business_name: String,
    pub coach_name: String,
    pub contact_email: String,
    pub phone: String,
    pub website: String,
    pub brand_message: String,
    pub calendar_link: String,
    pub service_price: String,
}

impl BusinessProfile {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            business_name: env_or("BUSINESS_NAME", &defaults.business_name),
            coach_name: env_or("BUSINESS_COACH_NAME", &defaults.coach_name),
            contact_email: env_or("BUSINESS_CONTACT_EMAIL", &defaults.contact_email),
            phone: env_or("BUSINESS_PHONE", &defaults.phone),
            website: env_or("BUSINESS_WEBSITE", &defaults.website),
            brand_message: env_or("BUSINESS_BRAND_MESSAGE", &defaults.brand_message),
            calendar_link: env_or("BUSINESS_CALENDAR_LINK", &defaults.calendar_link),
            service_price: env_or("BUSINESS_SERVICE_PRICE", &defaults.service_price),
        }
    }
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            business_name: "Human 2.0 Assessment".to_string(),
            coach_name: "Your coach".to_string(),
            contact_email: "hello@example.com".to_string(),
            phone: String::new(),
            website: "https://example.com".to_string(),
            brand_message: "You're not broken. You're upgrading. It's Time to get dangerous!"
                .to_string(),
            calendar_link: String::new(),
            service_price: "$497".to_string(),
        }
    }
}

/// Sampling temperature accepted by chat-completions services.
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

fn parse_temperature() -> Result<f32, ConfigError> {
    const KEY: &str = "NARRATIVE_TEMPERATURE";
    let temperature: f32 = parse_env(KEY, 0.7)?;
    if temperature.is_finite() && TEMPERATURE_RANGE.contains(&temperature) {
        Ok(temperature)
    } else {
        Err(ConfigError::InvalidNumber {
            key: KEY,
            value: env::var(KEY).unwrap_or_else(|_| temperature.to_string()),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a number in the accepted range, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
