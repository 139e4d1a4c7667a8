//! Improvement suggestions derived from a match result

use crate::processing::matcher::MatchResult;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use strsim::jaro_winkler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    AddMissing,
    AlreadyCovered,
    Highlight,
    PossibleMisspelling,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub keywords: Vec<String>,
}

impl Suggestion {
    fn new(kind: SuggestionKind, message: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            keywords,
        }
    }
}

pub struct SuggestionEngine {
    fuzzy_threshold: f64,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(0.9)
    }
}

impl SuggestionEngine {
    pub fn new(fuzzy_threshold: f64) -> Self {
        Self {
            fuzzy_threshold: fuzzy_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    pub fn generate(
        &self,
        result: &MatchResult,
        resume_text: &str,
        resume_keywords: &BTreeSet<String>,
        processor: &TextProcessor,
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        if result.missing.is_empty() {
            suggestions.push(Suggestion::new(
                SuggestionKind::AlreadyCovered,
                "Your resume already covers every key term in the job description",
                Vec::new(),
            ));
        } else {
            suggestions.push(Suggestion::new(
                SuggestionKind::AddMissing,
                "Consider adding these keywords to better align with the job description",
                result.missing.clone(),
            ));
        }

        if !result.matched.is_empty() {
            suggestions.push(Suggestion::new(
                SuggestionKind::Highlight,
                "Your resume already includes these keywords",
                result.matched.clone(),
            ));
        }

        suggestions.extend(self.near_misses(&result.missing, resume_text, resume_keywords, processor));

        suggestions.push(Suggestion::new(
            SuggestionKind::Tip,
            "Highlight these skills in your summary or experience section to boost visibility",
            Vec::new(),
        ));

        suggestions
    }

    /// Resume words close to a missing keyword, most likely a spelling variant
    fn near_misses(
        &self,
        missing: &[String],
        resume_text: &str,
        resume_keywords: &BTreeSet<String>,
        processor: &TextProcessor,
    ) -> Vec<Suggestion> {
        let tokens = processor.tokenize(resume_text);
        let mut suggestions = Vec::new();

        for keyword in missing {
            let width = keyword.split_whitespace().count().max(1);
            let mut seen = HashSet::new();

            let best = tokens
                .windows(width)
                .map(|window| window.join(" "))
                .filter(|candidate| candidate.chars().count() >= 3)
                .filter(|candidate| candidate != keyword && !resume_keywords.contains(candidate))
                .filter(|candidate| seen.insert(candidate.clone()))
                .map(|candidate| {
                    let score = jaro_winkler(&candidate, keyword);
                    (candidate, score)
                })
                .filter(|(_, score)| *score >= self.fuzzy_threshold)
                .max_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((candidate, _)) = best {
                suggestions.push(Suggestion::new(
                    SuggestionKind::PossibleMisspelling,
                    format!(
                        "'{}' in your resume looks like '{}'; use the job description's spelling so ATS filters pick it up",
                        candidate, keyword
                    ),
                    vec![keyword.clone()],
                ));
            }
        }

        suggestions
    }
}
