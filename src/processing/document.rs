//! Document structures

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::FileType;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    /// File path, upload name, or a label such as "<inline>"
    pub source: String,
    pub document_type: DocumentType,
    pub file_type: Option<FileType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "Resume"),
            DocumentType::JobDescription => write!(f, "Job description"),
        }
    }
}

impl Document {
    pub fn new(content: String, source: String, document_type: DocumentType) -> Self {
        let file_type = Some(FileType::from_path(Path::new(&source))).filter(FileType::is_supported);
        Self {
            content,
            source,
            document_type,
            file_type,
        }
    }

    pub fn resume(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(content.into(), source.into(), DocumentType::Resume)
    }

    pub fn job_description(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(content.into(), source.into(), DocumentType::JobDescription)
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Reject documents with nothing to analyze
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ResumeAnalyzerError::EmptyInput(format!(
                "{} ({})",
                self.document_type, self.source
            )));
        }
        Ok(())
    }
}
