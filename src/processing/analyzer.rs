//! Analysis engine: one resume against one job description

use crate::config::Config;
use crate::error::Result;
use crate::output::report::{AnalysisReport, DocumentSummary, ReportMetadata};
use crate::processing::document::Document;
use crate::processing::keywords::KeywordExtractor;
use crate::processing::matcher::MatchResult;
use crate::processing::skills::SkillVocabulary;
use crate::processing::suggestions::SuggestionEngine;
use log::{debug, info};
use std::collections::BTreeSet;
use std::time::Instant;

pub struct Analyzer {
    extractor: KeywordExtractor,
    suggestion_engine: SuggestionEngine,
    preview_chars: usize,
}

impl Analyzer {
    pub fn new(extractor: KeywordExtractor, suggestion_engine: SuggestionEngine, preview_chars: usize) -> Self {
        Self {
            extractor,
            suggestion_engine,
            preview_chars,
        }
    }

    pub fn from_config(config: &Config, vocabulary: SkillVocabulary) -> Result<Self> {
        let extractor = KeywordExtractor::from_config(vocabulary, &config.matching)?;
        Ok(Self::new(
            extractor,
            SuggestionEngine::new(config.matching.fuzzy_threshold),
            config.output.preview_chars,
        ))
    }

    pub fn extract_keywords(&self, text: &str) -> BTreeSet<String> {
        self.extractor.extract(text)
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        self.extractor.matcher().vocabulary()
    }

    pub fn analyze(&self, resume: &Document, job: &Document) -> Result<AnalysisReport> {
        let start_time = Instant::now();

        resume.validate()?;
        job.validate()?;

        info!("Analyzing {} against {}", resume.source, job.source);

        let resume_keywords = self.extractor.extract(&resume.content);
        let job_keywords = self.extractor.extract(&job.content);
        debug!(
            "Keywords: resume={} job={}",
            resume_keywords.len(),
            job_keywords.len()
        );

        let result = MatchResult::compute(&resume_keywords, &job_keywords)?;
        let category_breakdown = result.category_breakdown(self.vocabulary());
        let suggestions = self.suggestion_engine.generate(
            &result,
            &resume.content,
            &resume_keywords,
            self.extractor.processor(),
        );

        info!(
            "Match score {:.2}% ({} of {} job keywords)",
            result.match_score,
            result.matched.len(),
            result.job_keyword_count
        );

        let metadata = ReportMetadata {
            generated_at: chrono::Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            keyword_mode: self.extractor.mode(),
            vocabulary_size: self.vocabulary().len(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(AnalysisReport {
            resume: self.summarize(resume, &resume_keywords),
            job: self.summarize(job, &job_keywords),
            result,
            suggestions,
            category_breakdown,
            metadata,
        })
    }

    fn summarize(&self, document: &Document, keywords: &BTreeSet<String>) -> DocumentSummary {
        let processor = self.extractor.processor();
        let cleaned = processor.clean_text(&document.content);

        DocumentSummary {
            source: document.source.clone(),
            file_type: document.file_type,
            word_count: processor.word_count(&cleaned),
            keywords: keywords.iter().cloned().collect(),
            preview: processor.preview(&cleaned, self.preview_chars),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordMode;
    use crate::error::ResumeAnalyzerError;
    use crate::processing::suggestions::SuggestionKind;

    fn analyzer() -> Analyzer {
        Analyzer::from_config(&Config::default(), SkillVocabulary::default()).unwrap()
    }

    #[test]
    fn test_end_to_end_analysis() {
        let resume = Document::resume(
            "Jane Smith\nCloud engineer. Azure, Terraform, Docker and Python. Built CI/CD in GitHub Actions.",
            "resume.txt",
        );
        let job = Document::job_description(
            "We need Azure, Terraform, Kubernetes, Bicep and CI/CD experience. Python is a bonus.",
            "jd.txt",
        );

        let report = analyzer().analyze(&resume, &job).unwrap();

        assert_eq!(report.result.matched, vec!["azure", "ci/cd", "python", "terraform"]);
        assert_eq!(report.result.missing, vec!["bicep", "kubernetes"]);
        assert_eq!(report.result.match_score, 66.67);
        assert_eq!(report.metadata.keyword_mode, KeywordMode::Vocabulary);
        assert_eq!(report.suggestions[0].kind, SuggestionKind::AddMissing);
        assert!(report.resume.keywords.contains(&"github".to_string()));
        assert!(report.resume.preview.starts_with("Jane Smith"));
    }

    #[test]
    fn test_empty_resume_rejected() {
        let resume = Document::resume("   ", "resume.txt");
        let job = Document::job_description("Azure", "jd.txt");

        let result = analyzer().analyze(&resume, &job);
        assert!(matches!(result, Err(ResumeAnalyzerError::EmptyInput(_))));
    }

    #[test]
    fn test_job_without_reference_keywords() {
        let resume = Document::resume("Azure and Terraform", "resume.txt");
        let job = Document::job_description("Friendly barista wanted for a busy cafe.", "jd.txt");

        let result = analyzer().analyze(&resume, &job);
        assert!(matches!(result, Err(ResumeAnalyzerError::NoJobKeywords)));
    }
}
