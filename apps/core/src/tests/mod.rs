//! Test Module
//!
//! Cross-module test suite for the RuleCheck backend.
//!
//! ## Test Categories
//! - `analysis_tests`: orchestrator lifecycle against a stub provider
//! - `config_tests`: environment-driven configuration
//! - `server_tests`: HTTP surface and error envelopes
//! - `integration_tests`: full stack against a mocked Anthropic endpoint

pub mod analysis_tests;

use crate::error::{AppError, ProviderError};
use crate::provider::AnalysisProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Stub provider that returns a canned answer and records every prompt.
pub struct MockProvider {
    response: Result<String, ProviderError>,
    configured: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            configured: true,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(ProviderError::new(message).with_details("mock failure")),
            ..Self::new("")
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new("unused")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn ensure_configured(&self) -> Result<(), AppError> {
        if self.configured {
            Ok(())
        } else {
            Err(AppError::Config(crate::config::MISSING_API_KEY_MESSAGE.to_string()))
        }
    }

    async fn generate_analysis_text(&self, prompt: String) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt);
        self.response.clone().map_err(AppError::Provider)
    }
}
