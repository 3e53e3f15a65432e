//! # Analysis Module
//!
//! Work-rules analysis pipeline: prompt construction, provider invocation and
//! lexical classification of the provider's answer.
//!
//! ## Components
//! - `prompt`: fixed evaluation prompt template
//! - `keywords`: versioned keyword table
//! - `summary`: issue count, risk tier and compliance score
//! - `orchestrator`: request lifecycle

pub mod keywords;
pub mod orchestrator;
pub mod prompt;
pub mod summary;

pub use keywords::{KeywordSet, KeywordTable, KEYWORD_TABLE_VERSION};
pub use orchestrator::Analyzer;
pub use prompt::{build_analysis_prompt, REVIEW_CATEGORIES};
pub use summary::{derive_summary, ScorePolicy, SCORE_CEILING, SCORE_FLOOR};
