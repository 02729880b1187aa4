use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use ielts_core::model::QuestionType;
use log::{info, warn};
use services::{
    ContentProvider, GenerativeConfig, GenerativeContentProvider, SampleContentProvider,
    SessionConfig,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidQuestionType { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuestionType { raw } => {
                write!(f, "invalid --question-type value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    provider: Arc<dyn ContentProvider>,
    session: SessionConfig,
}

impl UiApp for DesktopApp {
    fn content_provider(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.provider)
    }

    fn session_config(&self) -> SessionConfig {
        self.session
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    model: Option<String>,
    base_url: Option<String>,
    question_type: Option<QuestionType>,
    sample: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--model <name>] [--base-url <url>] [--question-type <type>]");
    eprintln!("  cargo run -p app -- --sample");
    eprintln!();
    eprintln!("Question types:");
    for question_type in QuestionType::ALL {
        eprintln!("  {question_type}");
    }
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  IELTS_AI_API_KEY   required for generated exercises");
    eprintln!("  IELTS_AI_BASE_URL  default {}", GenerativeConfig::DEFAULT_BASE_URL);
    eprintln!("  IELTS_AI_MODEL     default {}", GenerativeConfig::DEFAULT_MODEL);
    eprintln!("  RUST_LOG           log filter, default info");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => parsed.model = Some(require_value(args, "--model")?),
                "--base-url" => parsed.base_url = Some(require_value(args, "--base-url")?),
                "--question-type" => {
                    let value = require_value(args, "--question-type")?;
                    let question_type = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuestionType { raw: value.clone() })?;
                    parsed.question_type = Some(question_type);
                }
                "--sample" => parsed.sample = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn content_provider(&self) -> Arc<dyn ContentProvider> {
        if self.sample {
            info!("serving the bundled sample exercise");
            return Arc::new(SampleContentProvider);
        }

        let config = GenerativeConfig::from_env().map(|mut config| {
            if let Some(model) = &self.model {
                config = config.with_model(model.clone());
            }
            if let Some(base_url) = &self.base_url {
                config = config.with_base_url(base_url.clone());
            }
            config
        });
        match &config {
            Some(config) => info!("generating exercises with {} at {}", config.model, config.base_url),
            None => warn!("IELTS_AI_API_KEY is not set; run with --sample to practise offline"),
        }
        Arc::new(GenerativeContentProvider::new(config))
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::default().with_question_type(self.question_type)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        print_usage();
        e
    })?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        provider: parsed.content_provider(),
        session: parsed.session_config(),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("IELTS Reading")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
