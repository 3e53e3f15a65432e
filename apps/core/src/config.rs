//! Environment-sourced configuration.
//!
//! Everything is read once at startup and handed to the components that need
//! it. Nothing in the analysis path touches the process environment.

use crate::analysis::ScorePolicy;
use crate::error::AppError;
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FILE_NAME: &str = "분석문서";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Message shown when the provider credential is missing.
pub const MISSING_API_KEY_MESSAGE: &str = "API 키가 설정되지 않았습니다.";

/// Settings for the analysis pipeline and its provider.
#[derive(Clone, Validate)]
pub struct AnalyzerConfig {
    /// Provider credential. `None` is allowed here and reported per request.
    pub api_key: Option<String>,
    pub api_url: Url,
    #[validate(length(min = 1))]
    pub api_version: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1, max = 64000))]
    pub max_tokens: u32,
    pub connect_timeout: Duration,
    #[validate(length(min = 1))]
    pub default_file_name: String,
    pub score_policy: ScorePolicy,
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url.as_str())
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("connect_timeout", &self.connect_timeout)
            .field("default_file_name", &self.default_file_name)
            .field("score_policy", &self.score_policy)
            .finish()
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            // Constant, known-good URL.
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            score_policy: ScorePolicy::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// A missing API key is not an error here; malformed values are.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let api_key = env::var(API_KEY_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let api_url = match non_empty_var("ANALYZER_API_URL") {
            Some(raw) => Url::parse(&raw)?,
            None => defaults.api_url,
        };

        let config = Self {
            api_key,
            api_url,
            api_version: non_empty_var("ANALYZER_API_VERSION").unwrap_or(defaults.api_version),
            model: non_empty_var("ANALYZER_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_var("ANALYZER_MAX_TOKENS")?.unwrap_or(defaults.max_tokens),
            connect_timeout: parse_var::<u64>("ANALYZER_CONNECT_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            default_file_name: non_empty_var("ANALYZER_DEFAULT_FILE_NAME")
                .unwrap_or(defaults.default_file_name),
            score_policy: parse_var("ANALYZER_SCORE_POLICY")?.unwrap_or(defaults.score_policy),
        };

        config
            .validate()
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the credential, or `AppError::Config` when it is absent.
    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Config(MISSING_API_KEY_MESSAGE.to_string()))
    }
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Settings for the HTTP surface.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr = match parse_var("ANALYZER_LISTEN_ADDR")? {
            Some(addr) => addr,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid listen address: {}", e)))?,
        };
        Ok(Self {
            listen_addr,
            log_format: parse_var("ANALYZER_LOG_FORMAT")?.unwrap_or_default(),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    non_empty_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::Config(format!("Invalid value for {}: {}", name, e)))
        })
        .transpose()
}
