//! Keyword table used to classify provider answers.
//!
//! Classification is purely lexical: it counts and detects terms in the
//! provider's free text. The table is versioned so results can be traced back
//! to the rule set that produced them.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::LazyLock;

/// Version of the built-in table. Bump when any term list changes.
pub const KEYWORD_TABLE_VERSION: &str = "2024-09.1";

/// Terms that each count as one reported issue.
const ISSUE_TERMS: &[&str] = &[
    "문제",
    "위반",
    "개선",
    "권고",
    "problem",
    "violation",
    "improvement",
    "recommendation",
];

/// Terms that mark the document as high risk.
const SEVERE_TERMS: &[&str] = &["심각", "위험", "severe", "dangerous"];

/// Terms that mark the document as needing attention.
const CAUTION_TERMS: &[&str] = &["주의", "개선", "보완", "caution", "improvement"];

static DEFAULT_TABLE: LazyLock<KeywordTable> = LazyLock::new(|| {
    KeywordTable::new(KEYWORD_TABLE_VERSION, ISSUE_TERMS, SEVERE_TERMS, CAUTION_TERMS)
        .expect("built-in keyword table compiles")
});

/// A list of literal terms compiled into a single case-insensitive matcher.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    terms: Vec<String>,
    matcher: Option<Regex>,
}

impl KeywordSet {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self, regex::Error> {
        let mut terms: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        terms.dedup();

        if terms.is_empty() {
            return Ok(Self {
                terms,
                matcher: None,
            });
        }

        // Longest first, so "needs improvement" wins over "improvement" at the same position.
        let mut ordered: Vec<&String> = terms.iter().collect();
        ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        let pattern = ordered
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");

        let matcher = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self {
            terms,
            matcher: Some(matcher),
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of non-overlapping occurrences of any term.
    pub fn count(&self, text: &str) -> usize {
        self.matcher
            .as_ref()
            .map_or(0, |matcher| matcher.find_iter(text).count())
    }

    pub fn is_present(&self, text: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(text))
    }
}

/// Versioned set of keyword lists driving issue counting and risk tiers.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    version: String,
    issues: KeywordSet,
    severe: KeywordSet,
    caution: KeywordSet,
}

/// Serializable description of a table, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordTableInfo {
    pub version: String,
    pub issue_terms: Vec<String>,
    pub severe_terms: Vec<String>,
    pub caution_terms: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl KeywordTable {
    pub fn new<S: AsRef<str>>(
        version: impl Into<String>,
        issue_terms: &[S],
        severe_terms: &[S],
        caution_terms: &[S],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            version: version.into(),
            issues: KeywordSet::new(issue_terms)?,
            severe: KeywordSet::new(severe_terms)?,
            caution: KeywordSet::new(caution_terms)?,
        })
    }

    /// The shared built-in table.
    pub fn builtin() -> &'static KeywordTable {
        &DEFAULT_TABLE
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn count_issues(&self, text: &str) -> usize {
        self.issues.count(text)
    }

    pub fn has_severe(&self, text: &str) -> bool {
        self.severe.is_present(text)
    }

    pub fn has_caution(&self, text: &str) -> bool {
        self.caution.is_present(text)
    }

    pub fn info(&self) -> KeywordTableInfo {
        KeywordTableInfo {
            version: self.version.clone(),
            issue_terms: self.issues.terms().to_vec(),
            severe_terms: self.severe.terms().to_vec(),
            caution_terms: self.caution.terms().to_vec(),
        }
    }
}
