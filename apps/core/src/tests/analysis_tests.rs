//! Analysis Orchestrator Tests
//!
//! Lifecycle tests for `Analyzer` against the stub provider.

use super::MockProvider;
use crate::analysis::{Analyzer, KeywordTable, ScorePolicy, REVIEW_CATEGORIES, SCORE_CEILING, SCORE_FLOOR};
use crate::config::{AnalyzerConfig, DEFAULT_FILE_NAME};
use crate::error::AppError;
use crate::models::{AnalysisRequest, RiskLevel};
use std::sync::Arc;

fn analyzer_with(provider: Arc<MockProvider>) -> Analyzer {
    Analyzer::new(&AnalyzerConfig::default(), provider)
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_content_fails_without_calling_provider() {
        let provider = Arc::new(MockProvider::new("위반"));
        let analyzer = analyzer_with(provider.clone());

        for content in ["", "   ", "\n\t"] {
            let result = analyzer
                .analyze(AnalysisRequest::new(content, Some("a.txt".into())))
                .await;
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "Expected Validation for {:?}",
                content
            );
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_runs_before_config_check() {
        let provider = Arc::new(MockProvider::unconfigured());
        let analyzer = analyzer_with(provider.clone());

        let result = analyzer.analyze(AnalysisRequest::default()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_credential_is_config_error() {
        let provider = Arc::new(MockProvider::unconfigured());
        let analyzer = analyzer_with(provider.clone());

        let result = analyzer
            .analyze(AnalysisRequest::new("제1조 (목적)", None))
            .await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert_eq!(provider.calls(), 0);
    }
}

#[cfg(test)]
mod provider_failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_provider_failure_is_terminal() {
        let provider = Arc::new(MockProvider::failing("overloaded"));
        let analyzer = analyzer_with(provider.clone());

        match analyzer.analyze(AnalysisRequest::new("제1조", None)).await {
            Err(AppError::Provider(err)) => {
                assert_eq!(err.message, "overloaded");
                assert_eq!(err.provider_details.as_deref(), Some("mock failure"));
            }
            other => panic!("Expected AppError::Provider, got {:?}", other),
        }
        // No retry.
        assert_eq!(provider.calls(), 1);
    }
}

#[cfg(test)]
mod result_tests {
    use super::*;

    #[tokio::test]
    async fn test_end_to_end_medium_risk() {
        let provider = Arc::new(MockProvider::new(
            "1. 연차휴가 규정 위반 소지가 있습니다. 근로시간 조항도 위반입니다.\n\
             2. 휴게시간 개선이 필요합니다. 징계 절차 개선을 권장합니다.",
        ));
        let analyzer = analyzer_with(provider.clone());

        let result = analyzer
            .analyze(AnalysisRequest::new("제1조 ...", Some("규칙.txt".into())))
            .await
            .unwrap();

        assert_eq!(result.file_name, "규칙.txt");
        assert_eq!(result.summary.total_issues, 4);
        assert_eq!(result.summary.risk_level, RiskLevel::Medium);
        assert!(result.analysis.contains("연차휴가"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_severe_keyword_is_high_risk() {
        let provider = Arc::new(MockProvider::new("해고 조항에 심각한 결함이 있으며 개선이 필요합니다."));
        let result = analyzer_with(provider)
            .analyze(AnalysisRequest::new("제1조", None))
            .await
            .unwrap();
        assert_eq!(result.summary.risk_level, RiskLevel::High);
        assert_eq!(result.summary.total_issues, 1);
    }

    #[tokio::test]
    async fn test_no_keywords_is_low_risk() {
        let provider = Arc::new(MockProvider::new("전반적으로 법령에 부합하며 양호합니다."));
        let result = analyzer_with(provider)
            .analyze(AnalysisRequest::new("제1조", None))
            .await
            .unwrap();
        assert_eq!(result.summary.risk_level, RiskLevel::Low);
        assert_eq!(result.summary.total_issues, 0);
    }

    #[tokio::test]
    async fn test_default_file_name_and_timestamp() {
        let before = chrono::Utc::now();
        let result = analyzer_with(Arc::new(MockProvider::new("양호")))
            .analyze(AnalysisRequest::new("제1조", None))
            .await
            .unwrap();
        let after = chrono::Utc::now();

        assert_eq!(result.file_name, DEFAULT_FILE_NAME);
        assert!(result.analyzed_at >= before && result.analyzed_at <= after);
    }

    #[tokio::test]
    async fn test_prompt_sent_to_provider() {
        let provider = Arc::new(MockProvider::new("양호"));
        let document = "제1조 (목적) 이 규칙은 주식회사 예시의 근로조건을 정한다.";
        analyzer_with(provider.clone())
            .analyze(AnalysisRequest::new(document, Some("규칙.txt".into())))
            .await
            .unwrap();

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains(document));
        for category in REVIEW_CATEGORIES {
            assert!(prompt.contains(category), "missing category {}", category);
        }
    }

    #[tokio::test]
    async fn test_preliminary_score_stays_in_range() {
        let analyzer = analyzer_with(Arc::new(MockProvider::new("위반 개선")));
        assert_eq!(analyzer.score_policy(), ScorePolicy::Preliminary);

        for _ in 0..50 {
            let result = analyzer
                .analyze(AnalysisRequest::new("제1조", None))
                .await
                .unwrap();
            let score = result.summary.compliance_score;
            assert!((SCORE_FLOOR..SCORE_CEILING).contains(&score), "score {} out of range", score);
        }
    }

    #[tokio::test]
    async fn test_deterministic_policy_is_repeatable() {
        let config = AnalyzerConfig {
            score_policy: ScorePolicy::Deterministic,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(&config, Arc::new(MockProvider::new("위반 위반 개선")));

        let first = analyzer.analyze(AnalysisRequest::new("제1조", None)).await.unwrap();
        let second = analyzer.analyze(AnalysisRequest::new("제1조", None)).await.unwrap();
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.summary.compliance_score, 82);
    }

    #[tokio::test]
    async fn test_custom_keyword_table() {
        let table = KeywordTable::new("custom-1", &["누락"], &["불법"], &["검토"]).unwrap();
        let analyzer = analyzer_with(Arc::new(MockProvider::new("필수 기재사항 누락, 누락. 검토 바람")))
            .with_keyword_table(table);
        assert_eq!(analyzer.keyword_table().version(), "custom-1");

        let result = analyzer.analyze(AnalysisRequest::new("제1조", None)).await.unwrap();
        assert_eq!(result.summary.total_issues, 2);
        assert_eq!(result.summary.risk_level, RiskLevel::Medium);
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let provider = Arc::new(MockProvider::new("위반"));
        let analyzer = analyzer_with(provider.clone());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let analyzer = analyzer.clone();
                tokio::spawn(async move {
                    analyzer
                        .analyze(AnalysisRequest::new("제1조", Some(format!("doc-{}.txt", i))))
                        .await
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap().unwrap();
            assert_eq!(result.file_name, format!("doc-{}.txt", i));
            assert_eq!(result.summary.total_issues, 1);
        }
        assert_eq!(provider.calls(), 8);
    }
}
