//! # Provider Module
//!
//! The single external analysis provider and the capability trait the
//! orchestrator depends on.
//!
//! ## Components
//! - `traits`: `AnalysisProvider` capability interface
//! - `anthropic`: Anthropic Messages API client

pub mod anthropic;
pub mod traits;

pub use anthropic::AnthropicProvider;
pub use traits::AnalysisProvider;
