//! Serializable analysis report

use crate::config::KeywordMode;
use crate::input::FileType;
use crate::processing::matcher::{CategoryCoverage, MatchResult};
use crate::processing::suggestions::Suggestion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one analysis produced, ready for any output format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: MatchResult,
    pub suggestions: Vec<Suggestion>,
    pub category_breakdown: Vec<CategoryCoverage>,
    pub resume: DocumentSummary,
    pub job: DocumentSummary,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub source: String,
    pub file_type: Option<FileType>,
    pub word_count: usize,
    pub keywords: Vec<String>,
    /// Leading text of the document, truncated on a word boundary
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub keyword_mode: KeywordMode,
    pub vocabulary_size: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => ScoreBand::Excellent,
            s if s >= 60.0 => ScoreBand::Good,
            s if s >= 40.0 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Strong keyword alignment with the job description",
            ScoreBand::Good => "Good alignment; a few key terms are missing",
            ScoreBand::Fair => "Partial alignment; several key terms are missing",
            ScoreBand::Poor => "Weak alignment; the resume misses most key terms",
        }
    }
}

impl AnalysisReport {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.result.match_score)
    }
}
