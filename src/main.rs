// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;

use annotext::app_config::{self, Config};
use annotext::render::{self, RenderedText, SegmentRenderer, TranslationPresenter, TranslationView};
use annotext::segment::{Provenance, SegmentId};
use annotext::{AnalysisResult, AnalysisSession, AnnotationPipeline, AppError, LanguageTag, SessionOutcome};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Output format of the analyze command
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze text into annotated segments and translations
    Analyze(AnalyzeArgs),

    /// Show the detail card of one segment
    Lookup(LookupArgs),

    /// List the supported languages
    Languages,

    /// Generate shell completions for annotext
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Text to analyze (falls back to --file, then stdin)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Language tag or ISO code (chinese, hindi, telugu, portuguese, other)
    #[arg(short, long)]
    language: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the save payload (input, language and result) as JSON
    #[arg(long)]
    save: Option<PathBuf>,

    /// Hide pronunciation annotations above characters
    #[arg(long)]
    no_pronunciation: bool,
}

#[derive(Parser, Debug)]
struct LookupArgs {
    /// Text to analyze
    #[arg(value_name = "TEXT")]
    text: String,

    /// Segment id to look up
    #[arg(long)]
    id: u32,

    /// Language tag or ISO code
    #[arg(short, long)]
    language: Option<String>,
}

/// annotext - interactive text annotation
///
/// Breaks text into annotated segments with pronunciation and definitions,
/// alongside a literal and an idiomatic translation.
#[derive(Parser, Debug)]
#[command(name = "annotext")]
#[command(version)]
#[command(about = "Annotate text with pronunciation, definitions and translations")]
#[command(long_about = "annotext splits text into characters or words and annotates each unit.

EXAMPLES:
    annotext analyze -l chinese '紅豆生南國，春來發幾枝。'
    annotext analyze -l portuguese 'Olá Mundo' --format json
    annotext analyze -l hi -f poem.txt --save saved.json
    annotext lookup -l chinese '紅豆' --id 2
    annotext languages
    annotext completions bash > annotext.bash

CONFIGURATION:
    Configuration is stored in conf.json under the user config directory by
    default. You can specify a different file with --config-path. If the file
    doesn't exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// JSON report of one analysis
#[derive(Serialize)]
struct AnalysisReport<'a> {
    language: LanguageTag,
    result: &'a AnalysisResult,
    rendered: RenderedText,
    translation: TranslationView,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Max level is raised or lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "annotext", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages => {
            print_languages();
            Ok(())
        }
        Commands::Analyze(args) => {
            let config = load_config(cli.config_path, cli.log_level)?;
            run_analyze(config, args).await
        }
        Commands::Lookup(args) => {
            let config = load_config(cli.config_path, cli.log_level)?;
            run_lookup(config, args).await
        }
    }
}

fn load_config(path: Option<PathBuf>, log_level: Option<CliLogLevel>) -> Result<Config> {
    let path = path.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&path)?;

    // Update log level in config if specified via command line
    if let Some(level) = log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn resolve_language(tag: Option<&str>, config: &Config) -> Result<LanguageTag, AppError> {
    match tag {
        Some(tag) => Ok(tag.parse::<LanguageTag>()?),
        None => Ok(config.default_language),
    }
}

fn read_input(args: &AnalyzeArgs) -> Result<String, AppError> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .map_err(|e| AppError::File(format!("Failed to read input file {}: {}", path.display(), e)));
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

async fn analyze_once(
    config: &Config,
    text: &str,
    language: LanguageTag,
) -> Result<(AnalysisSession, AnalysisResult), AppError> {
    let pipeline = AnnotationPipeline::from_config(config)?;
    let session = AnalysisSession::new(language);

    let outcome = session.analyze_text(&pipeline, text, language).await;
    match outcome {
        SessionOutcome::Completed(result) => {
            let result = result.as_ref().clone();
            Ok((session, result))
        }
        SessionOutcome::Failed(err) => {
            if err.is_retryable() {
                warn!("The analysis can be retried with the same input");
            }
            Err(err.into())
        }
        SessionOutcome::Superseded { sequence } => {
            Err(AppError::Unknown(format!("Request #{} was superseded", sequence)))
        }
    }
}

async fn run_analyze(mut config: Config, args: AnalyzeArgs) -> Result<()> {
    if args.no_pronunciation {
        config.render.show_pronunciation = false;
    }

    let language = resolve_language(args.language.as_deref(), &config)?;
    let text = read_input(&args)?;
    let (session, result) = analyze_once(&config, &text, language).await?;

    let rendered = SegmentRenderer::new(&config.render).render(&result);
    let translation = TranslationPresenter::new(&config.render).present(&result, language);

    match args.format {
        OutputFormat::Json => {
            let report = AnalysisReport {
                language,
                result: &result,
                rendered,
                translation,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{}\n", rendered.to_terminal());
            let glossary = render::format_glossary(&result);
            if !glossary.is_empty() {
                println!("{}\n", glossary);
            }
            println!("{}", translation.to_text());
            if let Provenance::Lexicon { placeholder_segments } = result.provenance() {
                if *placeholder_segments > 0 {
                    println!("\n({} segment(s) use placeholder annotations)", placeholder_segments);
                }
            }
        }
    }

    if let Some(path) = &args.save {
        let payload = session.save_payload().map_err(AppError::from)?;
        let json = serde_json::to_string_pretty(&payload).context("Failed to serialize save payload")?;
        std::fs::write(path, json).context(format!("Failed to write save payload: {}", path.display()))?;
        info!("Text ({}) saved to {}", language.display_name(), path.display());
    }

    Ok(())
}

async fn run_lookup(config: Config, args: LookupArgs) -> Result<()> {
    let language = resolve_language(args.language.as_deref(), &config)?;
    let (_, result) = analyze_once(&config, &args.text, language).await?;

    let card = render::lookup_detail(&result, SegmentId(args.id))
        .ok_or_else(|| anyhow!("Segment {} does not exist or has no details", args.id))?;
    println!("{}", card.to_text());
    Ok(())
}

fn print_languages() {
    for language in LanguageTag::ALL {
        println!(
            "{:<12} {:<14} {:<10} iso={:<3} example: {}",
            language.as_str(),
            language.display_name(),
            language.native_name(),
            language.iso_code().unwrap_or("-"),
            language.example_text().lines().next().unwrap_or_default()
        );
    }
}
