//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::Document;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Where the job description text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum JobSource {
    Inline(String),
    Stdin,
    File(PathBuf),
}

impl JobSource {
    /// `--job-text` wins over `--job`; a `--job` of "-" means standard input
    pub fn from_args(job: Option<PathBuf>, job_text: Option<String>) -> Result<Self> {
        match (job, job_text) {
            (_, Some(text)) => Ok(JobSource::Inline(text)),
            (Some(path), None) if path.as_os_str() == "-" => Ok(JobSource::Stdin),
            (Some(path), None) => Ok(JobSource::File(path)),
            (None, None) => Err(ResumeAnalyzerError::InvalidInput(
                "Provide a job description with --job or --job-text".to_string(),
            )),
        }
    }
}

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size_mb: u64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_cache,
            max_file_size_mb: config.max_file_size_mb,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_file_size_mb(mut self, limit: u64) -> Self {
        self.max_file_size_mb = limit;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = Self::detect_file_type(path)?;

        let size = fs::metadata(path).await?.len();
        self.check_size(&path_str, size)?;

        let bytes = fs::read(path).await?;
        info!("Extracting {} text from: {}", file_type, path.display());
        let text = Self::route(file_type, &bytes, &path_str)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract text from an in-memory upload; `file_name` decides the format
    pub fn extract_from_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let file_type = Self::detect_file_type(Path::new(file_name))?;
        self.check_size(file_name, bytes.len() as u64)?;

        debug!("Extracting {} text from upload '{}' ({} bytes)", file_type, file_name, bytes.len());
        Self::route(file_type, bytes, file_name)
    }

    fn route(file_type: FileType, bytes: &[u8], source: &str) -> Result<String> {
        match file_type {
            FileType::Pdf => PdfExtractor.extract(bytes, source),
            FileType::Docx => DocxExtractor.extract(bytes, source),
            FileType::Text => PlainTextExtractor.extract(bytes, source),
            FileType::Markdown => MarkdownExtractor.extract(bytes, source),
            FileType::Unknown => Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                source
            ))),
        }
    }

    fn detect_file_type(path: &Path) -> Result<FileType> {
        if path.extension().is_none() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File has no extension: {}",
                path.display()
            )));
        }

        match FileType::from_path(path) {
            FileType::Unknown => Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "{} (supported: pdf, docx, txt, md)",
                path.display()
            ))),
            file_type => Ok(file_type),
        }
    }

    fn check_size(&self, source: &str, size: u64) -> Result<()> {
        if size > self.max_file_size_mb * BYTES_PER_MB {
            return Err(ResumeAnalyzerError::FileTooLarge {
                path: source.to_string(),
                size_mb: size as f64 / BYTES_PER_MB as f64,
                limit_mb: self.max_file_size_mb,
            });
        }
        Ok(())
    }

    /// Load the job description; `stdin` is only read for `JobSource::Stdin`
    pub async fn read_job_description<R>(&mut self, source: JobSource, stdin: &mut R) -> Result<Document>
    where
        R: AsyncRead + Unpin,
    {
        match source {
            JobSource::Inline(text) => Ok(Document::job_description(text, "<inline>")),
            JobSource::Stdin => {
                let mut text = String::new();
                stdin.read_to_string(&mut text).await?;
                debug!("Read {} bytes of job description from stdin", text.len());
                Ok(Document::job_description(text, "<stdin>"))
            }
            JobSource::File(path) => {
                let text = self.extract_text(&path).await?;
                Ok(Document::job_description(text, path.to_string_lossy()))
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
