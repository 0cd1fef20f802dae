use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{FETCH_TIMEOUT_SECS_VAR, REFRESH_SECS_VAR, parse_seconds};
use services::{AppServices, Clock, QuizLoopService, SourceConfig, SourceLocator};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    Invalid(services::ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<services::ConfigError> for ArgsError {
    fn from(err: services::ConfigError) -> Self {
        ArgsError::Invalid(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--source <locator>] [--refresh-secs <n>] [--timeout-secs <n>]");
    eprintln!("  cargo run -p app -- check [--source <locator>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Locators:");
    eprintln!("  https://docs.google.com/spreadsheets/d/<id>/edit#gid=<n>   published sheet (CSV)");
    eprintln!("  sqlite://raga.sqlite3?mode=rwc                              local store (default)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RAGA_SOURCE, RAGA_REFRESH_SECS, RAGA_FETCH_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

/// Apply flags on top of the environment-derived config.
fn parse_flags(
    args: &mut impl Iterator<Item = String>,
    mut config: SourceConfig,
) -> Result<SourceConfig, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--source" => {
                let value = require_value(args, "--source")?;
                config.locator = SourceLocator::parse(&value)?;
            }
            "--refresh-secs" => {
                let value = require_value(args, "--refresh-secs")?;
                config.refresh_window = parse_seconds(REFRESH_SECS_VAR, &value)?;
            }
            "--timeout-secs" => {
                let value = require_value(args, "--timeout-secs")?;
                config.fetch_timeout = parse_seconds(FETCH_TIMEOUT_SECS_VAR, &value)?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(config)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // Keep an already installed subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            print_usage();
            ArgsError::UnknownCommand(first.to_owned())
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let config = SourceConfig::from_env().map_err(ArgsError::from)?;
    let config = parse_flags(&mut argv.into_iter(), config).inspect_err(|_| print_usage())?;

    init_tracing();
    let services = AppServices::from_config(&config, Clock::system()).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                quiz_loop: services.quiz_loop(),
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Raga AI Workshop")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Check => {
            let catalog = services.catalog();
            let questions = catalog.questions().await?;
            let ragas: std::collections::BTreeSet<&str> =
                questions.iter().map(|q| q.raga()).collect();
            info!(
                source = %catalog.describe_source(),
                questions = questions.len(),
                ragas = ragas.len(),
                "question source ok"
            );
            println!(
                "{} questions across {} ragas",
                questions.len(),
                ragas.len()
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Binary glue: report once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
