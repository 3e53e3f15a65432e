//! RuleCheck backend: work-rules compliance analysis.
//!
//! "The Pipeline" - prompt building, one provider call, and lexical
//! classification of the answer into a structured result.

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod server;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use analysis::Analyzer;
pub use config::{AnalyzerConfig, ServerConfig};
pub use error::{AppError, ErrorEnvelope, ProviderError};
pub use models::{AnalysisRequest, AnalysisResult, RiskLevel, Summary};
