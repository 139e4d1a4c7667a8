//! Keyword extraction

use crate::config::{KeywordMode, MatchingConfig};
use crate::error::Result;
use crate::processing::skills::{SkillMatcher, SkillVocabulary};
use crate::processing::text_processor::TextProcessor;
use log::debug;
use std::collections::BTreeSet;

pub struct KeywordExtractor {
    processor: TextProcessor,
    matcher: SkillMatcher,
    mode: KeywordMode,
    min_keyword_length: usize,
}

impl KeywordExtractor {
    pub fn new(vocabulary: SkillVocabulary, mode: KeywordMode, min_keyword_length: usize) -> Result<Self> {
        Ok(Self {
            processor: TextProcessor::new(),
            matcher: SkillMatcher::new(vocabulary)?,
            mode,
            min_keyword_length,
        })
    }

    pub fn from_config(vocabulary: SkillVocabulary, config: &MatchingConfig) -> Result<Self> {
        Self::new(vocabulary, config.mode, config.min_keyword_length)
    }

    /// Keyword set of a text. In vocabulary mode only reference skills count;
    /// open mode adds every significant word.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let cleaned = self.processor.clean_text(text);
        let mut keywords = self.matcher.find_skills(&cleaned);

        if self.mode == KeywordMode::Open {
            keywords.extend(self.processor.significant_terms(&cleaned, self.min_keyword_length));
        }

        debug!("Extracted {} keywords ({} mode)", keywords.len(), self.mode);
        keywords
    }

    pub fn mode(&self) -> KeywordMode {
        self.mode
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Looking for an Azure engineer: Terraform, Bicep, Kubernetes and CI/CD. \
                      Experience with policies and landing zones is a plus.";

    #[test]
    fn test_vocabulary_mode_only_reference_skills() {
        let extractor = KeywordExtractor::new(SkillVocabulary::default(), KeywordMode::Vocabulary, 3).unwrap();
        let keywords = extractor.extract(JD);

        let expected: BTreeSet<String> = ["azure", "bicep", "ci/cd", "kubernetes", "landing zone", "policies", "terraform"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_open_mode_adds_significant_words() {
        let extractor = KeywordExtractor::new(SkillVocabulary::default(), KeywordMode::Open, 3).unwrap();
        let keywords = extractor.extract(JD);

        assert!(keywords.contains("ci/cd"));
        assert!(keywords.contains("engineer"));
        assert!(keywords.contains("terraform"));
        assert!(!keywords.contains("experience"));
        assert!(!keywords.contains("an"));
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        let extractor = KeywordExtractor::new(SkillVocabulary::default(), KeywordMode::Vocabulary, 3).unwrap();
        assert!(extractor.extract("   ").is_empty());
    }
}
