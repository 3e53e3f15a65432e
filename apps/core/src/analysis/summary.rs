//! Summary derivation: issue count, risk tier and compliance score.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::keywords::KeywordTable;
use crate::models::{RiskLevel, Summary};

/// Lowest score either policy can produce.
pub const SCORE_FLOOR: u8 = 70;
/// Exclusive upper bound of produced scores.
pub const SCORE_CEILING: u8 = 100;

/// How the compliance score is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Uniform random preliminary estimate in `[70, 100)`, independent of the text.
    #[default]
    Preliminary,
    /// Pure function of risk tier and issue count, also in `[70, 100)`.
    Deterministic,
}

impl fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorePolicy::Preliminary => f.write_str("preliminary"),
            ScorePolicy::Deterministic => f.write_str("deterministic"),
        }
    }
}

impl FromStr for ScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preliminary" | "random" => Ok(ScorePolicy::Preliminary),
            "deterministic" => Ok(ScorePolicy::Deterministic),
            other => Err(format!("unknown score policy '{}'", other)),
        }
    }
}

/// Severe terms win over caution terms; neither means low risk.
pub fn classify_risk(table: &KeywordTable, text: &str) -> RiskLevel {
    if table.has_severe(text) {
        RiskLevel::High
    } else if table.has_caution(text) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Issue count, saturating at `u32::MAX`.
pub fn count_issues(table: &KeywordTable, text: &str) -> u32 {
    u32::try_from(table.count_issues(text)).unwrap_or(u32::MAX)
}

/// Score for the given inputs under `policy`.
pub fn compliance_score<R: Rng>(
    policy: ScorePolicy,
    risk_level: RiskLevel,
    total_issues: u32,
    rng: &mut R,
) -> u8 {
    match policy {
        ScorePolicy::Preliminary => rng.gen_range(SCORE_FLOOR..SCORE_CEILING),
        ScorePolicy::Deterministic => deterministic_score(risk_level, total_issues),
    }
}

// Bands do not overlap: LOW 90..=95, MEDIUM 80..=85, HIGH 70..=75.
fn deterministic_score(risk_level: RiskLevel, total_issues: u32) -> u8 {
    let base: u8 = match risk_level {
        RiskLevel::Low => 95,
        RiskLevel::Medium => 85,
        RiskLevel::High => 75,
    };
    let penalty = total_issues.min(5) as u8;
    base.saturating_sub(penalty).clamp(SCORE_FLOOR, SCORE_CEILING - 1)
}

/// Derives the full summary for one provider answer.
pub fn derive_summary<R: Rng>(
    table: &KeywordTable,
    policy: ScorePolicy,
    text: &str,
    rng: &mut R,
) -> Summary {
    let total_issues = count_issues(table, text);
    let risk_level = classify_risk(table, text);
    Summary {
        total_issues,
        risk_level,
        compliance_score: compliance_score(policy, risk_level, total_issues, rng),
    }
}
