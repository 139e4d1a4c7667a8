//! CLI interface for the resume analyzer

use crate::config::{KeywordMode, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted for resumes and job description files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Compare a resume against a job description by keyword overlap")]
#[command(long_about = "Extract keywords from a resume and a job description, compute a match score, \
list matched and missing keywords, and suggest improvements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file, or "-" to read it from stdin
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description text given directly
        #[arg(long)]
        job_text: Option<String>,

        /// Keyword mode: vocabulary, open
        #[arg(short, long)]
        mode: Option<String>,

        /// Skill vocabulary TOML file replacing the built-in list
        #[arg(long)]
        skills: Option<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file (a directory gets a generated file name)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show the beginning of both documents
        #[arg(long)]
        preview: bool,

        /// Include category coverage and additional resume keywords
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Skill vocabulary commands
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// List reference skills grouped by category
    List {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,

        /// Skill vocabulary TOML file replacing the built-in list
        #[arg(long)]
        skills: Option<PathBuf>,
    },

    /// Print the keywords found in a single document
    Extract {
        /// Document to read (PDF, DOCX, TXT, MD)
        file: PathBuf,

        /// Keyword mode: vocabulary, open
        #[arg(short, long)]
        mode: Option<String>,

        /// Skill vocabulary TOML file replacing the built-in list
        #[arg(long)]
        skills: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

pub fn parse_keyword_mode(mode: &str) -> Result<KeywordMode, String> {
    match mode.to_lowercase().as_str() {
        "vocabulary" | "vocab" => Ok(KeywordMode::Vocabulary),
        "open" => Ok(KeywordMode::Open),
        _ => Err(format!("Invalid keyword mode: {}. Supported: vocabulary, open", mode)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// "-" stands for standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_requires_a_job_source() {
        assert!(Cli::try_parse_from(["resume-analyzer", "analyze", "--resume", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-analyzer", "analyze", "--resume", "cv.pdf", "--job", "jd.txt", "--job-text", "Azure",
        ])
        .is_err());

        let cli = Cli::try_parse_from(["resume-analyzer", "analyze", "-r", "cv.pdf", "--job-text", "Azure"]).unwrap();
        match cli.command {
            Commands::Analyze { job, job_text, .. } => {
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Azure"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
        assert_eq!(parse_keyword_mode("Open"), Ok(KeywordMode::Open));
        assert!(parse_keyword_mode("fuzzy").is_err());
    }

    #[test]
    fn test_extension_validation() {
        assert!(validate_file_extension(Path::new("cv.DOCX"), SUPPORTED_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.odt"), SUPPORTED_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), SUPPORTED_EXTENSIONS).is_err());
        assert!(is_stdin(Path::new("-")));
    }
}
