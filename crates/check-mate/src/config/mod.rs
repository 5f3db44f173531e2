use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::workflows::assessment::JudgePolicy;

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
    pub llm: LlmConfig,
    pub mail: MailConfig,
    pub ocr: OcrConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig::from_env(),
            llm: LlmConfig::from_env()?,
            mail: MailConfig::from_env()?,
            ocr: OcrConfig::from_env(),
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

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Connection and pacing settings for the hosted model that judges conditions.
#[derive(Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_concurrency: usize,
    pub max_retries: u32,
}

impl LlmConfig {
    pub const DEFAULT_PROVIDER: &'static str = "google";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";

    fn from_env() -> Result<Self, ConfigError> {
        let provider = env::var("LLM_PROVIDER")
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_else(|_| Self::DEFAULT_PROVIDER.to_string());
        let model = env::var("LLM_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let api_key = env::var("LLM_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() && provider != "ollama" {
            return Err(ConfigError::MissingApiKey { provider });
        }

        Ok(Self {
            provider,
            model,
            api_key,
            temperature: parse_var("LLM_TEMPERATURE", 0.3)?,
            timeout_secs: parse_var("LLM_TIMEOUT_SECS", 60)?,
            max_concurrency: parse_var("LLM_MAX_CONCURRENCY", 4)?,
            max_retries: parse_var("LLM_MAX_RETRIES", 2)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn judge_policy(&self) -> JudgePolicy {
        JudgePolicy {
            max_concurrency: self.max_concurrency.max(1),
            max_retries: self.max_retries,
            request_timeout: self.timeout(),
            ..JudgePolicy::default()
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_concurrency", &self.max_concurrency)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Outbound report delivery settings.
///
/// SMTP is used when `SENDER_PASSWORD` is present, then the HTTP relay, and
/// sharing is disabled when neither is configured.
#[derive(Clone)]
pub struct MailConfig {
    pub sender: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_password: Option<String>,
    pub relay_url: Option<String>,
    pub relay_token: Option<String>,
}

/// Transport selected from [`MailConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTransport<'a> {
    Smtp {
        host: &'a str,
        port: u16,
        password: &'a str,
    },
    Relay {
        url: &'a str,
        token: Option<&'a str>,
    },
    Disabled,
}

impl MailConfig {
    pub const DEFAULT_SENDER: &'static str = "checkmate.app@gmail.com";
    pub const DEFAULT_SMTP_HOST: &'static str = "smtp.gmail.com";
    pub const DEFAULT_SMTP_PORT: u16 = 587;

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            sender: env::var("SENDER_EMAIL").unwrap_or_else(|_| Self::DEFAULT_SENDER.to_string()),
            smtp_host: non_empty_var("SMTP_HOST")
                .unwrap_or_else(|| Self::DEFAULT_SMTP_HOST.to_string()),
            smtp_port: parse_var("SMTP_PORT", Self::DEFAULT_SMTP_PORT)?,
            smtp_password: non_empty_var("SENDER_PASSWORD"),
            relay_url: non_empty_var("MAIL_RELAY_URL"),
            relay_token: non_empty_var("MAIL_RELAY_TOKEN"),
        })
    }

    pub fn transport(&self) -> MailTransport<'_> {
        if let Some(password) = &self.smtp_password {
            return MailTransport::Smtp {
                host: &self.smtp_host,
                port: self.smtp_port,
                password,
            };
        }
        match &self.relay_url {
            Some(url) => MailTransport::Relay {
                url,
                token: self.relay_token.as_deref(),
            },
            None => MailTransport::Disabled,
        }
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender", &self.sender)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field(
                "smtp_password",
                &self.smtp_password.as_ref().map(|_| "<redacted>"),
            )
            .field("relay_url", &self.relay_url)
            .field("relay_token", &self.relay_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Optical character recognition settings for image uploads.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub tesseract_path: PathBuf,
    pub languages: String,
}

impl OcrConfig {
    pub fn from_env() -> Self {
        Self {
            tesseract_path: env::var("OCR_TESSERACT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("tesseract")),
            languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "kor+eng".to_string()),
        }
    }
}

/// Reads an optional `.env` file into the process environment.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { variable: name }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str },
    MissingApiKey { provider: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a valid number")
            }
            ConfigError::MissingApiKey { provider } => write!(
                f,
                "LLM_API_KEY (or GOOGLE_API_KEY) must be set for provider '{provider}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::MissingApiKey { .. } => None,
        }
    }
}
