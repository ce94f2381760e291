use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::info;

use sentimento::{terminal, App, AppConfig, Locale, RenderOutcome, DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the serialized classifier
    #[arg(long, env = "SENTIMENTO_MODEL", default_value = DEFAULT_MODEL_FILE)]
    model: PathBuf,

    /// Path to the serialized vectorizer
    #[arg(long, env = "SENTIMENTO_VECTORIZER", default_value = DEFAULT_VECTORIZER_FILE)]
    vectorizer: PathBuf,

    /// Language of the user-facing text
    #[arg(long, env = "SENTIMENTO_LANG", value_enum, default_value_t = Locale::Pt)]
    lang: Locale,

    /// Reuse loaded artifacts between submissions while the files keep the same
    /// modification time and length (a same-length rewrite within one mtime
    /// tick goes unnoticed)
    #[arg(long)]
    cache: bool,

    /// Analyze this text once and exit instead of starting an interactive session
    #[arg(short, long)]
    text: Option<String>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            model_path: args.model,
            vectorizer_path: args.vectorizer,
            locale: args.lang,
            cache_artifacts: args.cache,
        }
    }
}

fn exit_code(outcome: &RenderOutcome) -> ExitCode {
    match outcome {
        RenderOutcome::Success(_) | RenderOutcome::Idle => ExitCode::SUCCESS,
        RenderOutcome::Warning => ExitCode::from(2),
        RenderOutcome::Unavailable | RenderOutcome::Fault(_) => ExitCode::FAILURE,
    }
}

fn main() -> anyhow::Result<ExitCode> {
    sentimento::init_logger();
    let mut args = Args::parse();
    let text = args.text.take();
    let config = AppConfig::from(args);

    info!("Model: {:?}, vectorizer: {:?}, language: {}", config.model_path, config.vectorizer_path, config.locale);
    let mut app = App::from_config(&config);

    let stdout = io::stdout();
    match text {
        Some(text) => {
            let outcome = terminal::run_once(&mut app, &text, stdout.lock())?;
            Ok(exit_code(&outcome))
        }
        None => {
            let stdin = io::stdin();
            terminal::run_interactive(&mut app, stdin.lock(), stdout.lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
