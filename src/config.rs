//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub enable_cache: bool,
    pub max_file_size_mb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub mode: KeywordMode,
    pub min_keyword_length: usize,
    pub fuzzy_threshold: f64,
    /// Extra skills appended to the vocabulary, by canonical name
    pub extra_skills: Vec<String>,
    /// TOML vocabulary that replaces the built-in one
    pub skills_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMode {
    /// Only terms from the skill vocabulary count as keywords
    Vocabulary,
    /// Every significant word counts, plus vocabulary phrases
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            max_file_size_mb: 10,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            mode: KeywordMode::Vocabulary,
            min_keyword_length: 3,
            fuzzy_threshold: 0.9,
            extra_skills: Vec::new(),
            skills_file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            preview_chars: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            matching: MatchingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl std::fmt::Display for KeywordMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordMode::Vocabulary => write!(f, "vocabulary"),
            KeywordMode::Open => write!(f, "open"),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matching.fuzzy_threshold) {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "matching.fuzzy_threshold must be between 0.0 and 1.0, got {}",
                self.matching.fuzzy_threshold
            )));
        }
        if self.matching.min_keyword_length == 0 {
            return Err(ResumeAnalyzerError::Configuration(
                "matching.min_keyword_length must be at least 1".to_string(),
            ));
        }
        if self.input.max_file_size_mb == 0 {
            return Err(ResumeAnalyzerError::Configuration(
                "input.max_file_size_mb must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
