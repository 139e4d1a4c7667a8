//! Resume analyzer: keyword match between a resume and a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, SkillsAction};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::input::{InputManager, JobSource};
use resume_analyzer::output::formatter::{resolve_output_path, save_report_to_file, ReportGenerator};
use resume_analyzer::output::report::AnalysisReport;
use resume_analyzer::processing::analyzer::Analyzer;
use resume_analyzer::processing::document::Document;
use resume_analyzer::processing::skills::{SkillCategory, SkillVocabulary};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            mode,
            skills,
            output,
            save,
            preview,
            detailed,
            no_color,
        } => {
            cli::validate_file_extension(&resume, cli::SUPPORTED_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job_path) = job.as_deref().filter(|p| !cli::is_stdin(p)) {
                cli::validate_file_extension(job_path, cli::SUPPORTED_EXTENSIONS)
                    .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            if let Some(mode) = mode {
                config.matching.mode = cli::parse_keyword_mode(&mode).map_err(ResumeAnalyzerError::InvalidInput)?;
            }
            if let Some(format) = output {
                config.output.format = cli::parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput)?;
            }
            config.output.detailed |= detailed;
            config.output.color_output &= !no_color && save.is_none();

            let show_progress = config.output.format == OutputFormat::Console && save.is_none();
            let spinner = show_progress.then(|| progress_spinner("Extracting text..."));

            let analysis = analyze_documents(&config, &resume, job, job_text, skills.as_deref(), spinner.as_ref()).await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            let report = analysis?;

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                config.output.detailed,
                preview,
                true,
            );
            let rendered = generator.generate_report(&report, &config.output.format)?;

            match save {
                Some(path) => {
                    let path = resolve_output_path(&path, &config.output.format, &resume.to_string_lossy());
                    save_report_to_file(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                    println!("Match score: {:.2}%. Report saved to {}", report.result.match_score, path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills { action } => match action {
            SkillsAction::List { category, skills } => {
                let vocabulary = load_vocabulary(&config, skills.as_deref())?;
                let filter = match category {
                    Some(name) => Some(SkillCategory::parse(&name).ok_or_else(|| {
                        ResumeAnalyzerError::InvalidInput(format!("Unknown skill category: {}", name))
                    })?),
                    None => None,
                };

                println!("📚 Reference skills ({})\n", vocabulary.len());
                for (category, skills) in vocabulary.by_category() {
                    if filter.is_some_and(|wanted| wanted != category) {
                        continue;
                    }
                    println!("{}:", category);
                    for skill in skills {
                        if skill.aliases.is_empty() {
                            println!("  • {}", skill.name);
                        } else {
                            println!("  • {} (also: {})", skill.name, skill.aliases.join(", "));
                        }
                    }
                    println!();
                }
            }

            SkillsAction::Extract { file, mode, skills } => {
                if let Some(mode) = mode {
                    config.matching.mode = cli::parse_keyword_mode(&mode).map_err(ResumeAnalyzerError::InvalidInput)?;
                }

                let mut input_manager = InputManager::from_config(&config.input);
                let text = input_manager.extract_text(&file).await?;
                let document = Document::resume(text, file.to_string_lossy());
                document.validate()?;

                let vocabulary = load_vocabulary(&config, skills.as_deref())?;
                let analyzer = Analyzer::from_config(&config, vocabulary)?;
                let keywords = analyzer.extract_keywords(&document.content);

                println!("🔤 {} keywords in {} ({} mode)", keywords.len(), file.display(), config.matching.mode);
                for keyword in &keywords {
                    match analyzer.vocabulary().get(keyword) {
                        Some(skill) => println!("  • {} [{}]", keyword, skill.category),
                        None => println!("  • {}", keyword),
                    }
                }
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeAnalyzerError::Configuration(e.to_string()))?;
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset to defaults at {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn analyze_documents(
    config: &Config,
    resume: &Path,
    job: Option<PathBuf>,
    job_text: Option<String>,
    skills: Option<&Path>,
    spinner: Option<&ProgressBar>,
) -> Result<AnalysisReport> {
    let mut input_manager = InputManager::from_config(&config.input);
    let resume_text = input_manager.extract_text(resume).await?;
    let resume_doc = Document::resume(resume_text, resume.to_string_lossy());
    let job_source = JobSource::from_args(job, job_text)?;
    let job_doc = input_manager
        .read_job_description(job_source, &mut tokio::io::stdin())
        .await?;

    if let Some(pb) = spinner {
        pb.set_message("Matching keywords...");
    }

    let vocabulary = load_vocabulary(config, skills)?;
    let analyzer = Analyzer::from_config(config, vocabulary)?;
    analyzer.analyze(&resume_doc, &job_doc)
}

fn load_vocabulary(config: &Config, override_file: Option<&Path>) -> Result<SkillVocabulary> {
    let skills_file = override_file.or(config.matching.skills_file.as_deref());
    if let Some(path) = skills_file {
        info!("Loading skill vocabulary from {}", path.display());
    }
    SkillVocabulary::resolve(skills_file, &config.matching.extra_skills)
}

fn progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
