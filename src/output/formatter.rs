//! Output formatters for console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::{AnalysisReport, DocumentSummary, ScoreBand};
use crate::processing::suggestions::{Suggestion, SuggestionKind};
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    show_preview: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    show_preview: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
    show_preview: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume vs Job Description Keyword Match</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .keyword { display: inline-block; background: #e9ecef; border-radius: 4px; padding: 2px 8px; margin: 2px; font-family: monospace; }
        .matched .keyword { background: #d4edda; }
        .missing .keyword { background: #f8d7da; }
        .suggestion { background: #f8f9fa; padding: 12px; margin: 8px 0; border-left: 4px solid #17a2b8; border-radius: 6px; }
        pre { white-space: pre-wrap; background: #f8f9fa; padding: 12px; border-radius: 6px; }
        .metadata { color: #6c757d; font-size: 0.9em; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume vs Job Description Keyword Match</h1>
            <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
        </div>
        <div class="section">
            <h2>Match Score: {{ match_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
            <p>{{ verdict }}</p>
        </div>
        <div class="section matched">
            <h2>Matched Keywords ({{ matched.len() }})</h2>
            {% for keyword in matched %}<span class="keyword">{{ keyword }}</span>{% endfor %}
        </div>
        <div class="section missing">
            <h2>Missing Keywords ({{ missing.len() }})</h2>
            {% for keyword in missing %}<span class="keyword">{{ keyword }}</span>{% endfor %}
        </div>
        <div class="section">
            <h2>Suggestions</h2>
            {% for suggestion in suggestions %}
            <div class="suggestion">
                <p>{{ suggestion.message }}</p>
                {% for keyword in suggestion.keywords %}<span class="keyword">{{ keyword }}</span>{% endfor %}
            </div>
            {% endfor %}
        </div>
        {% if show_previews %}
        <div class="section">
            <h2>Resume Preview</h2>
            <pre>{{ resume_preview }}</pre>
            <h2>Job Description Preview</h2>
            <pre>{{ job_preview }}</pre>
        </div>
        {% endif %}
        <div class="metadata">
            <p>Generated by resume-analyzer v{{ version }} on {{ generated_at }} | {{ keyword_mode }} mode, {{ vocabulary_size }} reference skills</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    show_previews: bool,
    resume_source: &'a str,
    job_source: &'a str,
    match_score: String,
    score_class: &'static str,
    score_label: &'static str,
    verdict: &'static str,
    matched: &'a [String],
    missing: &'a [String],
    suggestions: &'a [Suggestion],
    resume_preview: &'a str,
    job_preview: &'a str,
    version: &'a str,
    generated_at: String,
    keyword_mode: String,
    vocabulary_size: usize,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, show_preview: bool) -> Self {
        Self {
            use_colors,
            detailed,
            show_preview,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_suggestion_icon(&self, kind: SuggestionKind) -> &'static str {
        match (kind, self.use_colors) {
            (SuggestionKind::AddMissing, true) => "➕",
            (SuggestionKind::AlreadyCovered, true) => "✅",
            (SuggestionKind::Highlight, true) => "🎯",
            (SuggestionKind::PossibleMisspelling, true) => "🔤",
            (SuggestionKind::Tip, true) => "💡",
            (SuggestionKind::AddMissing, false) => "[+]",
            (SuggestionKind::AlreadyCovered, false) => "[ok]",
            (SuggestionKind::Highlight, false) => "[*]",
            (SuggestionKind::PossibleMisspelling, false) => "[?]",
            (SuggestionKind::Tip, false) => "[i]",
        }
    }

    fn format_document_line(label: &str, summary: &DocumentSummary) -> String {
        let file_type = summary
            .file_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "inline".to_string());
        format!(
            "{}: {} ({}, {} words, {} keywords)\n",
            label,
            summary.source,
            file_type,
            summary.word_count,
            summary.keywords.len()
        )
    }

    fn format_keyword_list(keywords: &[String]) -> String {
        if keywords.is_empty() {
            "(none)".to_string()
        } else {
            keywords.join(", ")
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("Resume vs Job Description Keyword Match", 1));
        output.push_str(&Self::format_document_line("Resume", &report.resume));
        output.push_str(&Self::format_document_line("Job description", &report.job));

        if self.show_preview {
            output.push_str(&self.format_header("📄 Resume Preview", 3));
            output.push_str(&report.resume.preview);
            output.push('\n');
            output.push_str(&self.format_header("🧾 Job Description Preview", 3));
            output.push_str(&report.job.preview);
            output.push('\n');
        }

        let band = report.score_band();
        output.push_str(&self.format_header("🔍 Keyword Match", 2));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            result.match_score,
            self.format_score_badge(band)
        ));
        output.push_str(&format!("Verdict: {}\n\n", self.colorize(band.verdict(), Color::Cyan)));

        output.push_str(&format!(
            "Matched Keywords ({}): {}\n",
            result.matched.len(),
            self.colorize(&Self::format_keyword_list(&result.matched), Color::Green)
        ));
        output.push_str(&format!(
            "Missing Keywords ({}): {}\n",
            result.missing.len(),
            self.colorize(&Self::format_keyword_list(&result.missing), Color::Yellow)
        ));

        if self.detailed {
            output.push_str(&format!(
                "Additional Resume Keywords ({}): {}\n",
                result.extra.len(),
                Self::format_keyword_list(&result.extra)
            ));

            if !report.category_breakdown.is_empty() {
                output.push_str(&self.format_header("📈 Category Coverage", 3));
                for coverage in &report.category_breakdown {
                    output.push_str(&format!(
                        "  • {}: {}/{} ({:.1}%)\n",
                        coverage.category,
                        coverage.matched,
                        coverage.total,
                        coverage.percentage()
                    ));
                }
            }
        }

        output.push_str(&self.format_header("💡 Suggestions", 2));
        for suggestion in &report.suggestions {
            output.push_str(&format!(
                "{} {}\n",
                self.format_suggestion_icon(suggestion.kind),
                suggestion.message
            ));
            if !suggestion.keywords.is_empty() {
                output.push_str(&format!(
                    "   {}\n",
                    self.colorize(&suggestion.keywords.join(", "), Color::BrightBlack)
                ));
            }
        }

        output.push_str(&format!(
            "\n{} Generated by resume-analyzer v{} | {} mode, {} reference skills | {}ms\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.analyzer_version,
            report.metadata.keyword_mode,
            report.metadata.vocabulary_size,
            report.metadata.processing_time_ms
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, show_preview: bool) -> Self {
        Self {
            include_metadata,
            show_preview,
        }
    }

    fn keyword_line(keywords: &[String]) -> String {
        if keywords.is_empty() {
            "_none_".to_string()
        } else {
            keywords
                .iter()
                .map(|k| format!("`{}`", k))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;
        let band = report.score_band();

        output.push_str("# Resume vs Job Description Keyword Match\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_label(&report.resume.source),
                file_label(&report.job.source)
            ));
        }

        if self.show_preview {
            output.push_str("## Resume Preview\n\n");
            output.push_str(&format!("> {}\n\n", report.resume.preview.replace('\n', "\n> ")));
            output.push_str("## Job Description Preview\n\n");
            output.push_str(&format!("> {}\n\n", report.job.preview.replace('\n', "\n> ")));
        }

        output.push_str("## Match Score\n\n");
        output.push_str(&format!("**{:.2}%** ({})\n\n", result.match_score, band.label()));
        output.push_str(&format!("{}\n\n", band.verdict()));

        output.push_str("| | Count |\n|---|---|\n");
        output.push_str(&format!("| Job description keywords | {} |\n", result.job_keyword_count));
        output.push_str(&format!("| Resume keywords | {} |\n", result.resume_keyword_count));
        output.push_str(&format!("| Matched | {} |\n", result.matched.len()));
        output.push_str(&format!("| Missing | {} |\n\n", result.missing.len()));

        output.push_str(&format!("## Matched Keywords ({})\n\n", result.matched.len()));
        output.push_str(&format!("{}\n\n", Self::keyword_line(&result.matched)));
        output.push_str(&format!("## Missing Keywords ({})\n\n", result.missing.len()));
        output.push_str(&format!("{}\n\n", Self::keyword_line(&result.missing)));

        if !report.category_breakdown.is_empty() {
            output.push_str("## Category Coverage\n\n");
            output.push_str("| Category | Matched | Total | Coverage |\n|---|---|---|---|\n");
            for coverage in &report.category_breakdown {
                output.push_str(&format!(
                    "| {} | {} | {} | {:.1}% |\n",
                    coverage.category,
                    coverage.matched,
                    coverage.total,
                    coverage.percentage()
                ));
            }
            output.push('\n');
        }

        output.push_str("## Suggestions\n\n");
        for suggestion in &report.suggestions {
            output.push_str(&format!("- {}", suggestion.message));
            if !suggestion.keywords.is_empty() {
                output.push_str(&format!(": {}", Self::keyword_line(&suggestion.keywords)));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str(&format!(
                "\n---\n_Generated by resume-analyzer v{} ({} mode, {} reference skills)_\n",
                report.metadata.analyzer_version,
                report.metadata.keyword_mode,
                report.metadata.vocabulary_size
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, show_preview: bool) -> Self {
        Self {
            include_styles,
            show_preview,
        }
    }

    fn create_template_data<'a>(&self, report: &'a AnalysisReport) -> HtmlTemplate<'a> {
        let band = report.score_band();
        let score_class = match band {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::Poor => "score-poor",
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            show_previews: self.show_preview,
            resume_source: &report.resume.source,
            job_source: &report.job.source,
            match_score: format!("{:.2}", report.result.match_score),
            score_class,
            score_label: band.label(),
            verdict: band.verdict(),
            matched: &report.result.matched,
            missing: &report.result.missing,
            suggestions: &report.suggestions,
            resume_preview: &report.resume.preview,
            job_preview: &report.job.preview,
            version: &report.metadata.analyzer_version,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            keyword_mode: report.metadata.keyword_mode.to_string(),
            vocabulary_size: report.metadata.vocabulary_size,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, show_preview: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, show_preview),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true, show_preview),
            html_formatter: HtmlFormatter::new(true, show_preview),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn file_label(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// A directory target gets a generated file name; anything else is used as-is
pub fn resolve_output_path(target: &Path, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}
