use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::router::SITE_TITLE;
use services::{AppServices, Clock, I18n, QuizRunner, Router};
use storage::StorageManager;
use storage::repository::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_CONTENT_ROOT: &str = "./docs";
const DEFAULT_DB_URL: &str = "sqlite://prep.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidContentRoot { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidContentRoot { raw } => write!(f, "invalid --content value: {raw}"),
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
    services: AppServices,
    start_route: Option<String>,
}

impl UiApp for DesktopApp {
    fn router(&self) -> Router {
        self.services.router()
    }

    fn storage(&self) -> StorageManager {
        self.services.storage()
    }

    fn quiz(&self) -> QuizRunner {
        self.services.quiz()
    }

    fn i18n(&self) -> I18n {
        self.services.i18n()
    }

    fn start_route(&self) -> Option<String> {
        self.start_route.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--content <dir|url>] [--db <sqlite_url>] [--route <hash>]");
    eprintln!("  cargo run -p app -- export [--db <sqlite_url>]            # JSON to stdout");
    eprintln!("  cargo run -p app -- import <file> [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- reset  [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --content {DEFAULT_CONTENT_ROOT}");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --route <catalog home>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_CONTENT_ROOT, PREP_DB_URL, PREP_START_ROUTE, PREP_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ui,
    Export,
    Import { file: String },
    Reset,
}

struct Args {
    content_root: String,
    db_url: String,
    start_route: Option<String>,
}

impl Args {
    fn from_env() -> Self {
        Self {
            content_root: env_value("PREP_CONTENT_ROOT")
                .unwrap_or_else(|| DEFAULT_CONTENT_ROOT.to_string()),
            db_url: env_value("PREP_DB_URL")
                .map_or_else(|| DEFAULT_DB_URL.to_string(), normalize_sqlite_url),
            start_route: env_value("PREP_START_ROUTE"),
        }
    }

    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidContentRoot { raw: value });
                    }
                    parsed.content_root = value;
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--route" => {
                    parsed.start_route = Some(require_value(args, "--route")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Split the subcommand off `argv`. Flags without a subcommand mean `ui`.
fn parse_command(argv: &mut Vec<String>) -> Result<Command, ArgsError> {
    let Some(first) = argv.first().cloned() else {
        return Ok(Command::Ui);
    };
    if first.starts_with("--") || first == "-h" {
        return Ok(Command::Ui);
    }
    argv.remove(0);
    match first.as_str() {
        "ui" => Ok(Command::Ui),
        "export" => Ok(Command::Export),
        "reset" => Ok(Command::Reset),
        "import" => {
            if argv.first().is_none_or(|arg| arg.starts_with("--")) {
                return Err(ArgsError::MissingValue { flag: "import" });
            }
            Ok(Command::Import {
                file: argv.remove(0),
            })
        }
        _ => Err(ArgsError::UnknownArg(first)),
    }
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

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PREP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&mut argv).inspect_err(|_| print_usage())?;
    let parsed = Args::parse(&mut argv.into_iter()).inspect_err(|_| print_usage())?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let clock = Clock::default_clock();

    match command {
        Command::Ui => {
            let locale = std::env::var("LANG").ok();
            let services =
                AppServices::new_sqlite(&parsed.content_root, &parsed.db_url, clock, locale.as_deref())
                    .await?;
            info!(
                content = %parsed.content_root,
                db = %parsed.db_url,
                "launching desktop window"
            );

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                start_route: parsed.start_route,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(SITE_TITLE)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Export => {
            let storage = open_storage(&parsed.db_url, clock).await?;
            println!("{}", storage.export_data().await?);
            Ok(())
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let storage = open_storage(&parsed.db_url, clock).await?;
            storage.import_data(&raw).await?;
            info!(%file, "data imported");
            Ok(())
        }
        Command::Reset => {
            let storage = open_storage(&parsed.db_url, clock).await?;
            storage.clear_all_data().await?;
            storage.init().await?;
            info!(db = %parsed.db_url, "all learner data cleared");
            Ok(())
        }
    }
}

async fn open_storage(
    db_url: &str,
    clock: Clock,
) -> Result<StorageManager, Box<dyn std::error::Error>> {
    let storage = Storage::sqlite(db_url).await?;
    let manager = StorageManager::new(storage.store, clock);
    manager.init().await?;
    Ok(manager)
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

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
