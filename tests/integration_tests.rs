//! Integration tests for the resume analyzer

use resume_analyzer::config::{Config, KeywordMode};
use resume_analyzer::input::{InputManager, JobSource};
use resume_analyzer::output::formatter::{OutputFormatter, MarkdownFormatter};
use resume_analyzer::processing::analyzer::Analyzer;
use resume_analyzer::processing::document::Document;
use resume_analyzer::processing::skills::SkillVocabulary;
use resume_analyzer::processing::suggestions::SuggestionKind;
use resume_analyzer::ResumeAnalyzerError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

async fn load(manager: &mut InputManager, path: &str) -> String {
    manager.extract_text(Path::new(path)).await.unwrap()
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:document><w:body>{}</w:body></w:document>",
        body
    );

    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap();
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = load(&mut manager, "tests/fixtures/sample_resume.txt").await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Cloud Platform Engineer"));
    assert!(text.contains("Terraform"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = load(&mut manager, "tests/fixtures/sample_resume.md").await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Azure DevOps"));
    assert!(text.contains("Terraform"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    write_docx(&path, &["Jane Roe", "Kubernetes, Helm &amp; Terraform"]);

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();

    assert_eq!(text, "Jane Roe\nKubernetes, Helm & Terraform");
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();

    let text1 = load(&mut manager, "tests/fixtures/sample_resume.txt").await;
    assert_eq!(manager.cache_size(), 1);

    // Second extraction should use cache
    let text2 = load(&mut manager, "tests/fixtures/sample_resume.txt").await;
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);

    let mut uncached = InputManager::new().with_cache(false);
    load(&mut uncached, "tests/fixtures/sample_resume.txt").await;
    assert_eq!(uncached.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;

    assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;

    assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_resume_against_job_description() {
    let mut manager = InputManager::new();
    let resume = Document::resume(
        load(&mut manager, "tests/fixtures/sample_resume.txt").await,
        "tests/fixtures/sample_resume.txt",
    );
    let job = Document::job_description(
        load(&mut manager, "tests/fixtures/sample_job.txt").await,
        "tests/fixtures/sample_job.txt",
    );

    let analyzer = Analyzer::from_config(&Config::default(), SkillVocabulary::default()).unwrap();
    let report = analyzer.analyze(&resume, &job).unwrap();

    assert_eq!(
        report.result.matched,
        vec![
            "azure", "azure devops", "bicep", "ci/cd", "docker", "iac",
            "landing zone", "powershell", "python", "terraform",
        ]
    );
    assert_eq!(report.result.missing, vec!["event grid", "kubernetes", "service bus"]);
    assert_eq!(report.result.match_score, 76.92);
    assert_eq!(report.result.job_keyword_count, 13);

    let near_miss = report
        .suggestions
        .iter()
        .find(|s| s.kind == SuggestionKind::PossibleMisspelling)
        .expect("misspelled Kubernetes should be flagged");
    assert_eq!(near_miss.keywords, vec!["kubernetes"]);

    let markdown = MarkdownFormatter::new(false, false).format_report(&report).unwrap();
    assert!(markdown.contains("**76.92%** (GOOD)"));
    assert!(markdown.contains("`event grid`, `kubernetes`, `service bus`"));
}

#[tokio::test]
async fn test_job_description_sources_agree() {
    let mut manager = InputManager::new();
    let mut stdin: &[u8] = b"";
    let from_file = manager
        .read_job_description(
            JobSource::from_args(Some(PathBuf::from("tests/fixtures/sample_job.txt")), None).unwrap(),
            &mut stdin,
        )
        .await
        .unwrap();
    assert_eq!(from_file.source, "tests/fixtures/sample_job.txt");

    let inline = manager
        .read_job_description(JobSource::from_args(None, Some(from_file.content.clone())).unwrap(), &mut stdin)
        .await
        .unwrap();

    let mut piped = from_file.content.as_bytes();
    let from_stdin = manager
        .read_job_description(JobSource::from_args(Some(PathBuf::from("-")), None).unwrap(), &mut piped)
        .await
        .unwrap();

    let analyzer = Analyzer::from_config(&Config::default(), SkillVocabulary::default()).unwrap();
    let resume = Document::resume(
        load(&mut manager, "tests/fixtures/sample_resume.txt").await,
        "tests/fixtures/sample_resume.txt",
    );
    for job in [&from_file, &inline, &from_stdin] {
        let report = analyzer.analyze(&resume, job).unwrap();
        assert_eq!(report.result.match_score, 76.92);
    }
}

#[tokio::test]
async fn test_open_mode_scores_plain_words() {
    let mut config = Config::default();
    config.matching.mode = KeywordMode::Open;
    let analyzer = Analyzer::from_config(&config, SkillVocabulary::default()).unwrap();

    let resume = Document::resume("Gardener and florist", "resume.txt");
    let job = Document::job_description("Hiring a florist", "<inline>");
    let report = analyzer.analyze(&resume, &job).unwrap();

    assert!(report.result.matched.contains(&"florist".to_string()));
    assert!(report.result.match_score > 0.0);
}

#[tokio::test]
async fn test_empty_job_description_rejected() {
    let mut manager = InputManager::new();
    let resume = Document::resume(
        load(&mut manager, "tests/fixtures/sample_resume.txt").await,
        "tests/fixtures/sample_resume.txt",
    );
    let job = Document::job_description(
        load(&mut manager, "tests/fixtures/empty_job.txt").await,
        "tests/fixtures/empty_job.txt",
    );

    let analyzer = Analyzer::from_config(&Config::default(), SkillVocabulary::default()).unwrap();
    let result = analyzer.analyze(&resume, &job);

    assert!(matches!(result, Err(ResumeAnalyzerError::EmptyInput(_))));
}

#[test]
fn test_custom_skill_file_replaces_builtin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skills.toml");
    std::fs::write(
        &path,
        "[[skill]]\nname = \"espresso\"\ncategory = \"practice\"\n\n[[skill]]\nname = \"latte art\"\n",
    )
    .unwrap();

    let vocabulary = SkillVocabulary::resolve(Some(&path), &["pour over".to_string()]).unwrap();
    assert_eq!(vocabulary.len(), 3);

    let analyzer = Analyzer::from_config(&Config::default(), vocabulary).unwrap();
    let resume = Document::resume("Espresso, pour over and Azure", "resume.txt");
    let job = Document::job_description("Espresso and latte art, Azure a plus", "jd.txt");
    let report = analyzer.analyze(&resume, &job).unwrap();

    assert_eq!(report.result.matched, vec!["espresso"]);
    assert_eq!(report.result.missing, vec!["latte art"]);
    assert_eq!(report.result.match_score, 50.0);
}
