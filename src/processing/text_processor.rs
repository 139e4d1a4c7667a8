//! Text processing and normalization

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Words that carry no signal in resumes and job postings on top of the
/// general English list.
const DOMAIN_STOP_WORDS: &[&str] = &[
    "ability", "candidate", "company", "duties", "etc", "experience", "including",
    "job", "knowledge", "months", "plus", "position", "preferred", "required",
    "requirements", "responsibilities", "responsible", "role", "skills", "strong",
    "team", "using", "work", "working", "year", "years",
];

pub struct TextProcessor {
    stop_words: HashSet<String>,
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let mut stop_words: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        stop_words.extend(DOMAIN_STOP_WORDS.iter().map(|w| w.to_string()));

        let whitespace_regex = Regex::new(r"[ \t\u{a0}]+").expect("Invalid whitespace regex");

        Self {
            stop_words,
            whitespace_regex,
        }
    }

    /// Normalize typography and collapse runs of spaces, keeping line breaks
    pub fn clean_text(&self, text: &str) -> String {
        let normalized = self.normalize_unicode(text);
        normalized
            .lines()
            .map(|line| self.whitespace_regex.replace_all(line, " ").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tokenize text into lowercase words using Unicode segmentation
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().any(|c| c.is_alphabetic()))
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Alphabetic, non-stop-word tokens of at least `min_length` characters
    pub fn significant_terms(&self, text: &str, min_length: usize) -> BTreeSet<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|token| token.chars().all(|c| c.is_alphabetic()))
            .filter(|token| token.chars().count() >= min_length)
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    pub fn word_count(&self, text: &str) -> usize {
        text.unicode_words().count()
    }

    /// Truncate to at most `max_chars` characters, backing off to the last
    /// word boundary and appending an ellipsis.
    pub fn preview(&self, text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        let cut = text
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(text.len());
        let truncated = &text[..cut];
        let end = truncated
            .rfind(char::is_whitespace)
            .filter(|&idx| idx > 0)
            .unwrap_or(cut);

        format!("{}...", truncated[..end].trim_end())
    }

    fn normalize_unicode(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{2022}' | '\u{25CF}' | '\u{25AA}' => '-',
                '\u{2026}' => '.',
                _ => c,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust, Python & 2024 Kubernetes!");

        assert_eq!(tokens, vec!["rust", "python", "kubernetes"]);
    }

    #[test]
    fn test_text_cleaning() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("  Senior   Engineer \u{2014} Cloud\n\n\u{2022}  Azure\u{2019}s  platform ");

        assert_eq!(cleaned, "Senior Engineer - Cloud\n- Azure's platform");
    }

    #[test]
    fn test_significant_terms_filtering() {
        let processor = TextProcessor::new();
        let terms = processor.significant_terms(
            "We are hiring for Kubernetes and Terraform experience, 5 years in Go.",
            3,
        );

        assert!(terms.contains("terraform"));
        assert!(terms.contains("kubernetes"));
        assert!(!terms.contains("are"));
        assert!(!terms.contains("experience"));
        assert!(!terms.contains("years"));
        // too short
        assert!(!terms.contains("go"));
    }

    #[test]
    fn test_stop_words_case_insensitive() {
        let processor = TextProcessor::new();
        assert!(processor.is_stop_word("The"));
        assert!(processor.is_stop_word("responsibilities"));
        assert!(!processor.is_stop_word("ansible"));
    }

    #[test]
    fn test_preview_breaks_on_word_boundary() {
        let processor = TextProcessor::new();

        assert_eq!(processor.preview("short text", 50), "short text");
        assert_eq!(processor.preview("Azure DevOps engineer", 10), "Azure...");
        // multi-byte characters must not split
        assert_eq!(processor.preview("Zürich café résumé", 9), "Zürich...");
    }
}
