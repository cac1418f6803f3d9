use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use quiz_trainer::{Quiz, QuizConfig, QuizError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Questions drawn from each category for an exam
    #[arg(short, long)]
    exam_size: Option<usize>,

    /// TOML file with quiz settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is used by the quiz)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error opening log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(questions = %config.questions.display(), exam_size = config.exam_questions_per_category, "starting quiz");

    if let Err(e) = Quiz::new(config).run() {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

fn resolve_config(args: &Args) -> Result<QuizConfig, QuizError> {
    let mut config = match &args.config {
        Some(path) => QuizConfig::from_file(path)?,
        None => QuizConfig::default(),
    };
    if let Some(questions) = &args.questions {
        config.questions = questions.clone();
    }
    if let Some(exam_size) = args.exam_size {
        config.exam_questions_per_category = exam_size;
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
