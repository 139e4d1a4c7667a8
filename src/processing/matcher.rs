//! Keyword set comparison and match scoring

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::skills::{SkillCategory, SkillVocabulary};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage of job description keywords present in the resume,
    /// rounded to two decimals
    pub match_score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// Resume keywords the job description does not ask for
    pub extra: Vec<String>,
    pub resume_keyword_count: usize,
    pub job_keyword_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    pub category: SkillCategory,
    pub matched: usize,
    pub total: usize,
}

impl CategoryCoverage {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            round2(self.matched as f64 / self.total as f64 * 100.0)
        }
    }
}

impl MatchResult {
    /// Compare keyword sets. Fails when the job description has no keywords,
    /// since there is nothing to score against.
    pub fn compute(resume_keywords: &BTreeSet<String>, job_keywords: &BTreeSet<String>) -> Result<Self> {
        if job_keywords.is_empty() {
            return Err(ResumeAnalyzerError::NoJobKeywords);
        }

        let matched: Vec<String> = job_keywords.intersection(resume_keywords).cloned().collect();
        let missing: Vec<String> = job_keywords.difference(resume_keywords).cloned().collect();
        let extra: Vec<String> = resume_keywords.difference(job_keywords).cloned().collect();

        let match_score = round2(matched.len() as f64 / job_keywords.len() as f64 * 100.0);

        Ok(Self {
            match_score,
            matched,
            missing,
            extra,
            resume_keyword_count: resume_keywords.len(),
            job_keyword_count: job_keywords.len(),
        })
    }

    pub fn is_full_match(&self) -> bool {
        self.missing.is_empty()
    }

    /// Coverage per vocabulary category, for categories the job asks for
    pub fn category_breakdown(&self, vocabulary: &SkillVocabulary) -> Vec<CategoryCoverage> {
        let mut coverage: BTreeMap<SkillCategory, CategoryCoverage> = BTreeMap::new();

        let mut tally = |keyword: &String, is_match: bool| {
            let category = vocabulary.category_of(keyword);
            let entry = coverage.entry(category).or_insert(CategoryCoverage {
                category,
                matched: 0,
                total: 0,
            });
            entry.total += 1;
            if is_match {
                entry.matched += 1;
            }
        };

        for keyword in &self.matched {
            tally(keyword, true);
        }
        for keyword in &self.missing {
            tally(keyword, false);
        }

        coverage.into_values().collect()
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_partial_match() {
        let resume = set(&["azure", "docker", "python"]);
        let job = set(&["azure", "kubernetes", "terraform"]);

        let result = MatchResult::compute(&resume, &job).unwrap();

        assert_eq!(result.match_score, 33.33);
        assert_eq!(result.matched, vec!["azure"]);
        assert_eq!(result.missing, vec!["kubernetes", "terraform"]);
        assert_eq!(result.extra, vec!["docker", "python"]);
        assert_eq!(result.job_keyword_count, 3);
        assert_eq!(result.resume_keyword_count, 3);
    }

    #[test]
    fn test_full_and_empty_overlap() {
        let job = set(&["ansible", "linux"]);

        let full = MatchResult::compute(&set(&["ansible", "linux", "sql"]), &job).unwrap();
        assert_eq!(full.match_score, 100.0);
        assert!(full.is_full_match());

        let none = MatchResult::compute(&set(&["sql"]), &job).unwrap();
        assert_eq!(none.match_score, 0.0);
        assert_eq!(none.missing, vec!["ansible", "linux"]);
    }

    #[test]
    fn test_matched_and_missing_partition_job_keywords() {
        let resume = set(&["bicep", "git", "helm"]);
        let job = set(&["bicep", "helm", "iac", "linux", "sql", "terraform"]);

        let result = MatchResult::compute(&resume, &job).unwrap();

        let mut union: BTreeSet<String> = result.matched.iter().cloned().collect();
        assert!(result.missing.iter().all(|k| !union.contains(k)));
        union.extend(result.missing.iter().cloned());
        assert_eq!(union, job);
        assert_eq!(result.match_score, 33.33);
    }

    #[test]
    fn test_empty_job_keywords_is_error() {
        let result = MatchResult::compute(&set(&["python"]), &BTreeSet::new());
        assert!(matches!(result, Err(ResumeAnalyzerError::NoJobKeywords)));
    }

    #[test]
    fn test_category_breakdown() {
        let vocabulary = SkillVocabulary::default();
        let result = MatchResult::compute(
            &set(&["python", "terraform"]),
            &set(&["ansible", "python", "sql", "terraform"]),
        )
        .unwrap();

        let breakdown = result.category_breakdown(&vocabulary);
        let devops = breakdown.iter().find(|c| c.category == SkillCategory::DevOps).unwrap();
        let language = breakdown.iter().find(|c| c.category == SkillCategory::Language).unwrap();

        assert_eq!((devops.matched, devops.total), (1, 2));
        assert_eq!((language.matched, language.total), (1, 2));
        assert_eq!(language.percentage(), 50.0);
    }
}
