use crate::error::AppError;
use async_trait::async_trait;

/// Capability interface for the external analysis provider.
///
/// The orchestrator only needs "prompt in, free text out". Keeping it behind a
/// trait lets tests inject a stub and keeps the wire format in one place.
#[async_trait]
pub trait AnalysisProvider: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fails with `AppError::Config` when the provider cannot be called at all
    /// (e.g., missing credential). Must not perform I/O.
    fn ensure_configured(&self) -> Result<(), AppError> {
        Ok(())
    }

    /// Sends one prompt and returns the provider's free-text answer.
    ///
    /// Transport failures, non-success responses and unreadable payloads are
    /// all reported as `AppError::Provider`.
    async fn generate_analysis_text(&self, prompt: String) -> Result<String, AppError>;
}
