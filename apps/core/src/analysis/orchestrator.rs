//! Analysis Orchestrator - owns the lifecycle of one analysis request.
//!
//! Received → Validated → PromptBuilt → ProviderCalled → Parsed → Completed,
//! or a single terminal `AppError`. Nothing in between is visible to callers.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;
use validator::Validate;

use super::keywords::KeywordTable;
use super::prompt::build_analysis_prompt;
use super::summary::{derive_summary, ScorePolicy};
use crate::config::AnalyzerConfig;
use crate::error::AppError;
use crate::models::{AnalysisRequest, AnalysisResult, Summary, EMPTY_CONTENT_MESSAGE};
use crate::provider::{AnalysisProvider, AnthropicProvider};

/// Stateless analysis pipeline. Cheap to clone; safe to share across tasks.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn AnalysisProvider>,
    keywords: Arc<KeywordTable>,
    score_policy: ScorePolicy,
    default_file_name: String,
}

impl Analyzer {
    /// Creates an analyzer around an explicit provider.
    pub fn new(config: &AnalyzerConfig, provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            provider,
            keywords: Arc::new(KeywordTable::default()),
            score_policy: config.score_policy,
            default_file_name: config.default_file_name.clone(),
        }
    }

    /// Creates an analyzer backed by the Anthropic provider.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AppError> {
        let provider = AnthropicProvider::from_config(config)?;
        Ok(Self::new(config, Arc::new(provider)))
    }

    /// Replaces the built-in keyword table.
    pub fn with_keyword_table(mut self, table: KeywordTable) -> Self {
        self.keywords = Arc::new(table);
        self
    }

    pub fn keyword_table(&self) -> &KeywordTable {
        &self.keywords
    }

    pub fn score_policy(&self) -> ScorePolicy {
        self.score_policy
    }

    /// Runs one analysis end to end.
    ///
    /// Fails with `Validation` for empty content, `Config` when the provider
    /// is not configured, and `Provider` for any provider-side failure. The
    /// provider is contacted at most once and only after both checks pass.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
        let span = info_span!(
            "analyze",
            request_id = %Uuid::new_v4(),
            provider = self.provider.name(),
        );

        async move {
            let result = self.run(request).await;
            match &result {
                Ok(done) => info!(
                    file_name = %done.file_name,
                    total_issues = done.summary.total_issues,
                    risk_level = %done.summary.risk_level,
                    compliance_score = done.summary.compliance_score,
                    "Analysis completed"
                ),
                Err(e) => warn!(kind = e.kind(), "Analysis failed: {}", e),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
        // 1. Validate input
        request
            .validate()
            .map_err(|_| AppError::Validation(EMPTY_CONTENT_MESSAGE.to_string()))?;
        let file_name = request.resolved_file_name(&self.default_file_name);
        info!(
            file_name = %file_name,
            content_chars = request.content.chars().count(),
            "Analysis request validated"
        );

        // 2. Provider must be usable before any work is done
        self.provider.ensure_configured()?;

        // 3. Build prompt
        let prompt = build_analysis_prompt(&request.content, request.file_name.as_deref());
        debug!(prompt_chars = prompt.chars().count(), "Prompt built");

        // 4-5. Call provider and extract its text
        let analysis = self.provider.generate_analysis_text(prompt).await?;

        // 6. Derive summary
        let summary = self.summarize(&analysis);
        debug!(keyword_table = self.keywords.version(), "Summary derived");

        // 7. Assemble
        Ok(AnalysisResult {
            file_name,
            analyzed_at: Utc::now(),
            analysis,
            summary,
        })
    }

    // Kept out of `run` so the thread-local RNG never lives across an await.
    fn summarize(&self, analysis: &str) -> Summary {
        derive_summary(
            &self.keywords,
            self.score_policy,
            analysis,
            &mut rand::thread_rng(),
        )
    }
}
