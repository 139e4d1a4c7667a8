//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} is empty after text extraction")]
    EmptyInput(String),

    #[error("File too large: {path} is {size_mb:.1} MB (limit {limit_mb} MB)")]
    FileTooLarge {
        path: String,
        size_mb: f64,
        limit_mb: u64,
    },

    #[error("No reference keywords found in the job description; nothing to score against")]
    NoJobKeywords,

    #[error("Skill vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeAnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeAnalyzerError::Processing(err.to_string())
    }
}
