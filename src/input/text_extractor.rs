//! Text extraction from various file formats

use crate::error::{Result, ResumeAnalyzerError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};

/// Turns the raw bytes of one document into plain text.
/// `source` names the document in error messages.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeAnalyzerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", source, e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let content = std::str::from_utf8(bytes).map_err(|e| {
            ResumeAnalyzerError::InvalidInput(format!("'{}' is not valid UTF-8 text: {}", source, e))
        })?;
        Ok(content.trim_start_matches('\u{feff}').to_string())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes, source)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> Result<String> {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ");

        let clean_text = strip_tags(&text)?;

        let lines: Vec<String> = unescape_entities(&clean_text)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

/// Word documents: a zip container whose body lives in `word/document.xml`
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ResumeAnalyzerError::DocxExtraction(format!("'{}' is not a valid DOCX archive: {}", source, e))
        })?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                ResumeAnalyzerError::DocxExtraction(format!("'{}' has no document body: {}", source, e))
            })?
            .read_to_string(&mut xml)?;

        self.xml_to_text(&xml)
    }
}

impl DocxExtractor {
    fn xml_to_text(&self, xml: &str) -> Result<String> {
        let breaks = Regex::new(r"<w:(?:br|cr)\b[^>]*/>|</w:p>")
            .map_err(|e| ResumeAnalyzerError::Processing(e.to_string()))?;
        let tabs = Regex::new(r"<w:tab\s*/>")
            .map_err(|e| ResumeAnalyzerError::Processing(e.to_string()))?;

        let text = breaks.replace_all(xml, "\n");
        let text = tabs.replace_all(&text, "\t");
        let text = strip_tags(&text)?;

        let lines: Vec<String> = unescape_entities(&text)
            .lines()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.trim().is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

fn strip_tags(markup: &str) -> Result<String> {
    let re = Regex::new(r"<[^>]*>").map_err(|e| ResumeAnalyzerError::Processing(e.to_string()))?;
    Ok(re.replace_all(markup, "").into_owned())
}

// `&amp;` goes last so that "&amp;lt;" decodes to "&lt;" and not "<"
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{}</w:body></w:document>",
            body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/document.xml", FileOptions::default()).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_plain_text_strips_bom() {
        let text = PlainTextExtractor.extract("\u{feff}Python developer".as_bytes(), "jd.txt").unwrap();
        assert_eq!(text, "Python developer");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let result = PlainTextExtractor.extract(&[0xff, 0xfe, 0x00], "resume.txt");
        assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
    }

    #[test]
    fn test_markdown_formatting_removed() {
        let md = "# Jane Smith\n\n## Skills\n\n- **Terraform** &amp; Bicep\n- Azure DevOps\n";
        let text = MarkdownExtractor.extract(md.as_bytes(), "resume.md").unwrap();

        assert!(text.contains("Jane Smith"));
        assert!(text.contains("Terraform & Bicep"));
        assert!(text.contains("Azure DevOps"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains("<li>"));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let bytes = build_docx(&["Cloud Engineer", "Kubernetes &amp; Docker", "CI/CD pipelines"]);
        let text = DocxExtractor.extract(&bytes, "resume.docx").unwrap();

        assert_eq!(text, "Cloud Engineer\nKubernetes & Docker\nCI/CD pipelines");
    }

    #[test]
    fn test_docx_breaks_with_attributes_split_words() {
        let bytes = build_docx(&["Terraform</w:t><w:br w:type=\"page\"/><w:t>Ansible<w:cr/>Helm"]);
        let text = DocxExtractor.extract(&bytes, "resume.docx").unwrap();

        assert_eq!(text, "Terraform\nAnsible\nHelm");
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        let result = DocxExtractor.extract(b"plain text pretending", "resume.docx");
        assert!(matches!(result, Err(ResumeAnalyzerError::DocxExtraction(_))));
    }

    #[test]
    fn test_docx_without_body_rejected() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/styles.xml", FileOptions::default()).unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = DocxExtractor.extract(&bytes, "resume.docx");
        assert!(matches!(result, Err(ResumeAnalyzerError::DocxExtraction(_))));
    }

    #[test]
    fn test_invalid_pdf_is_error() {
        let result = PdfExtractor.extract(b"not a pdf", "resume.pdf");
        assert!(matches!(result, Err(ResumeAnalyzerError::PdfExtraction(_))));
    }
}
