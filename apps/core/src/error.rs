use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure reported by (or while talking to) the external analysis provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderError {
    /// User-facing message. The provider's own message when it sent one.
    pub message: String,
    /// Technical detail (HTTP status, raw body, transport error text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_details: Option<String>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            provider_details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.provider_details = Some(details.into());
        self
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provider_details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Application-wide error type. Every failure of an analysis request ends up
/// as exactly one of these variants.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Caller input is malformed or empty. Correctable by the user.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Deployment misconfiguration (e.g., missing API key). Correctable by the operator.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider call failed or returned something we could not read.
    #[error("Provider error: {0}")]
    Provider(ProviderError),
}

/// Error body returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// Shorthand for a provider failure without details.
    pub fn provider(message: impl Into<String>) -> Self {
        AppError::Provider(ProviderError::new(message))
    }

    /// HTTP status equivalent of this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Config(_) => "config",
            AppError::Provider(_) => "provider",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            AppError::Validation(message) | AppError::Config(message) => ErrorEnvelope {
                error: message.clone(),
                details: None,
            },
            AppError::Provider(err) => ErrorEnvelope {
                error: err.message.clone(),
                details: err.provider_details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Provider(
            ProviderError::new("분석 서비스에 연결할 수 없습니다.")
                .with_details(format!("HTTP error: {}", err)),
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Provider(
            ProviderError::new("분석 서비스 응답을 해석할 수 없습니다.")
                .with_details(format!("JSON error: {}", err)),
        )
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("Invalid provider URL: {}", err))
    }
}
