use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Message returned when the uploaded document has no text.
pub const EMPTY_CONTENT_MESSAGE: &str = "분석할 내용이 없습니다.";

/// Inbound analysis request, as posted by the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Plain text already extracted from the uploaded file.
    /// A missing field deserializes to "" so it fails validation, not parsing.
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
    /// Original name of the uploaded file.
    #[serde(default)]
    pub file_name: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl AnalysisRequest {
    pub fn new(content: impl Into<String>, file_name: Option<String>) -> Self {
        Self {
            content: content.into(),
            file_name,
        }
    }

    /// File name to report, falling back to `default` when absent or blank.
    pub fn resolved_file_name(&self, default: &str) -> String {
        self.file_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

/// Coarse legal-compliance risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics derived from the provider's free-text analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_issues: u32,
    pub risk_level: RiskLevel,
    /// 0..=100
    pub compliance_score: u8,
}

/// Outcome of one successful analysis. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file_name: String,
    pub analyzed_at: DateTime<Utc>,
    /// Free-text report exactly as returned by the provider.
    pub analysis: String,
    pub summary: Summary,
}
