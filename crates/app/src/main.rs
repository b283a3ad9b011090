use std::fmt;

use chrono::Duration;
use clicker_core::Clock;
use clicker_core::leveling::{DEFAULT_COMBO_WINDOW_SECS, LevelingRules};
use services::AppServices;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod server;

use server::AppState;

const DEFAULT_DB_URL: &str = "sqlite://clicker.sqlite3";
const DEFAULT_ADDR: &str = "127.0.0.1:8081";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidAddr { raw: String },
    InvalidComboWindow { raw: String },
    InvalidEnv { var: &'static str, source: Box<ArgsError> },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidAddr { raw } => write!(f, "invalid --addr value: {raw}"),
            ArgsError::InvalidComboWindow { raw } => {
                write!(f, "invalid --combo-window-secs value: {raw}")
            }
            ArgsError::InvalidEnv { var, source } => write!(f, "{var}: {source}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- serve [--db <sqlite_url>] [--addr <host:port>] [--combo-window-secs <n>] [--no-combo]"
    );
    eprintln!();
    eprintln!("Defaults for serve:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --addr {DEFAULT_ADDR}");
    eprintln!("  --combo-window-secs {DEFAULT_COMBO_WINDOW_SECS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CLICKER_DB_URL, CLICKER_ADDR, CLICKER_COMBO_WINDOW_SECS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    addr: String,
    combo_window_secs: i64,
    combo: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            db_url: DEFAULT_DB_URL.into(),
            addr: DEFAULT_ADDR.into(),
            combo_window_secs: DEFAULT_COMBO_WINDOW_SECS,
            combo: true,
        }
    }
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ArgsError> {
        let defaults = Self::default();
        let db_url = var("CLICKER_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or(defaults.db_url, normalize_sqlite_url);
        let addr = var("CLICKER_ADDR")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.addr);
        let combo_window_secs = match var("CLICKER_COMBO_WINDOW_SECS") {
            Some(value) => parse_window(&value).map_err(|err| ArgsError::InvalidEnv {
                var: "CLICKER_COMBO_WINDOW_SECS",
                source: Box::new(err),
            })?,
            None => defaults.combo_window_secs,
        };

        Ok(Self {
            db_url,
            addr,
            combo_window_secs,
            combo: true,
        })
    }

    fn parse_serve(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        Self::from_env()?.apply_flags(args)
    }

    fn apply_flags(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    self.db_url = normalize_sqlite_url(value);
                }
                "--addr" => {
                    let value = require_value(args, "--addr")?;
                    if value.trim().is_empty() || !value.contains(':') {
                        return Err(ArgsError::InvalidAddr { raw: value });
                    }
                    self.addr = value.trim().to_string();
                }
                "--combo-window-secs" => {
                    let value = require_value(args, "--combo-window-secs")?;
                    self.combo_window_secs = parse_window(&value)?;
                }
                "--no-combo" => self.combo = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(self)
    }

    fn leveling_rules(&self) -> LevelingRules {
        if self.combo {
            LevelingRules::with_combo_window(Duration::seconds(self.combo_window_secs))
        } else {
            LevelingRules::basic()
        }
    }
}

fn parse_window(raw: &str) -> Result<i64, ArgsError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| *secs >= 0)
        .ok_or_else(|| ArgsError::InvalidComboWindow {
            raw: raw.to_string(),
        })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means serve.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Serve,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Serve,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = match cmd {
        Command::Serve => Args::parse_serve(&mut iter),
    }
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    prepare_sqlite_file(&parsed.db_url)?;
    let rules = parsed.leveling_rules();
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), rules).await?;
    info!(
        db = %parsed.db_url,
        combo = parsed.combo,
        created_player = services.created_player(),
        "storage ready"
    );

    server::run(AppState::new(services.progression()), &parsed.addr).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
