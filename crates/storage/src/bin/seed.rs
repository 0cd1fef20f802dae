use std::fmt;
use std::fs::File;
use std::io::BufReader;

use storage::sheet::parse_question_csv;
use storage::sqlite::SqliteRepository;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    csv_path: String,
    append: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingCsv,
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingCsv => write!(f, "--csv is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("RAGA_DB_URL")
            .unwrap_or_else(|_| "sqlite://raga.sqlite3?mode=rwc".into());
        let mut csv_path = None;
        let mut append = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--csv" => {
                    csv_path = Some(require_value(&mut args, "--csv")?);
                }
                "--append" => append = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            csv_path: csv_path.ok_or(ArgsError::MissingCsv)?,
            append,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- --csv <file> [--db <sqlite_url>] [--append]");
    eprintln!();
    eprintln!("The CSV needs `raga`, `notation` and `clues` columns; clues are ';'-separated.");
    eprintln!("Without --append the existing questions are replaced.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://raga.sqlite3?mode=rwc");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RAGA_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let file = File::open(&args.csv_path)?;
    let questions = parse_question_csv(&args.csv_path, BufReader::new(file))?;

    let repo = SqliteRepository::open(&args.db_url).await?;
    if args.append {
        repo.append_questions(&questions).await?;
    } else {
        repo.replace_questions(&questions).await?;
    }

    let total = repo.count_questions().await?;
    println!(
        "imported {} questions from {} into {} ({total} stored)",
        questions.len(),
        args.csv_path,
        args.db_url
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
