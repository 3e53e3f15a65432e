use crate::config::AnalyzerConfig;
use crate::error::{AppError, ProviderError};
use crate::provider::traits::AnalysisProvider;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use url::Url;

// --- Constants ---
const GENERIC_FAILURE_MESSAGE: &str = "분석 중 오류가 발생했습니다.";
const MALFORMED_RESPONSE_MESSAGE: &str = "분석 서비스 응답 형식이 올바르지 않습니다.";
const MAX_DETAIL_CHARS: usize = 500;

// --- Wire types ---

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    message: String,
}

/// Client for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_key: Option<String>,
    api_url: Url,
    api_version: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Config(crate::config::MISSING_API_KEY_MESSAGE.to_string()))
    }
}

#[async_trait]
impl AnalysisProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn ensure_configured(&self) -> Result<(), AppError> {
        self.api_key().map(|_| ())
    }

    async fn generate_analysis_text(&self, prompt: String) -> Result<String, AppError> {
        let api_key = self.api_key()?;
        let payload = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [UserMessage {
                role: "user",
                content: &prompt,
            }],
        };

        info!(
            model = %self.model,
            max_tokens = self.max_tokens,
            prompt_chars = prompt.chars().count(),
            "Sending analysis request to provider"
        );

        let res = self
            .client
            .post(self.api_url.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Provider request failed: {}", e);
                AppError::from(e)
            })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let err = failure_from_response(status, &body);
            error!(status = %status, "Provider returned an error: {}", err);
            return Err(AppError::Provider(err));
        }

        let text = extract_text(&body)?;
        debug!(response_chars = text.chars().count(), "Provider response parsed");
        Ok(text)
    }
}

/// Pulls the analysis text out of a Messages API response body.
///
/// Only the first content block is considered; it must carry non-blank text.
fn extract_text(body: &str) -> Result<String, AppError> {
    let response: MessagesResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::new(MALFORMED_RESPONSE_MESSAGE).with_details(format!("JSON error: {}", e))
    })?;

    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            AppError::Provider(
                ProviderError::new(MALFORMED_RESPONSE_MESSAGE)
                    .with_details(format!("no text in content[0]: {}", truncate(body))),
            )
        })
}

/// Uses the provider's own error message when the body is its error envelope.
fn failure_from_response(status: StatusCode, body: &str) -> ProviderError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => {
            let kind = envelope.error.kind.unwrap_or_else(|| "unknown".to_string());
            ProviderError::new(envelope.error.message)
                .with_details(format!("status {} ({})", status.as_u16(), kind))
        }
        Err(_) => ProviderError::new(GENERIC_FAILURE_MESSAGE)
            .with_details(format!("status {}: {}", status.as_u16(), truncate(body))),
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_DETAIL_CHARS {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_DETAIL_CHARS).collect();
    cut.push('…');
    cut
}
