//! PassKeeper CLI - register and log in against the local credential store
//!
//! The database location comes from `--db` / `PASSKEEPER_DB`, otherwise from
//! the settings file in the user data directory.

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use passkeeper_cli::{adapter, config, Feedback};
use passkeeper_core::{CredentialStore, SettingsManager};

/// PassKeeper - local username/password store
#[derive(Parser, Debug)]
#[command(name = "passkeeper")]
#[command(version)]
#[command(about = "PassKeeper - register and log in against a local credential store")]
struct Args {
    /// Path to the user database (overrides the settings file)
    #[arg(long, global = true, env = "PASSKEEPER_DB")]
    db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Store(StoreCommand),
    /// Inspect or change the settings file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Commands that open the credential store
#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Create a new user
    Register(CredentialArgs),
    /// Check a username and password
    Login(CredentialArgs),
    /// Show where users are stored and how many there are
    Status,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the settings file and database locations
    Show,
    /// Store a database location in the settings (omit PATH for the default)
    SetDb { path: Option<PathBuf> },
    /// Delete the settings file
    Reset,
}

#[derive(ClapArgs, Debug)]
struct CredentialArgs {
    /// Username (prompted for if omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Password (prompted for without echo if omitted)
    #[arg(long, env = "PASSKEEPER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Run the selected command; `Ok(false)` means the action was refused
async fn run(args: Args) -> anyhow::Result<bool> {
    match args.command {
        Command::Store(command) => run_store(args.db, command).await,
        Command::Config { action } => run_config(action).await,
    }
}

async fn run_store(db: Option<PathBuf>, command: StoreCommand) -> anyhow::Result<bool> {
    let db_path = match db {
        Some(path) => path,
        None => SettingsManager::open_default()
            .context("Failed to load settings")?
            .database_path(),
    };

    let store = CredentialStore::open(&db_path)
        .await
        .with_context(|| format!("Failed to open credential store at {}", db_path.display()))?;

    let result = match command {
        StoreCommand::Register(creds) => {
            let (username, password) = collect(creds)?;
            let feedback = adapter::register(&store, &username, &password).await?;
            Ok(report(feedback))
        }
        StoreCommand::Login(creds) => {
            let (username, password) = collect(creds)?;
            let feedback = adapter::login(&store, &username, &password).await?;
            if feedback == Feedback::LoggedIn {
                info!("User logged in: {}", username.trim());
            }
            Ok(report(feedback))
        }
        StoreCommand::Status => {
            let users = store.user_count().await?;
            println!("Database: {}", db_path.display());
            println!("Backend:  {}", store.backend_name());
            println!("Users:    {}", users);
            Ok(true)
        }
    };

    store.close().await;
    result
}

/// Settings commands never touch the database
async fn run_config(action: ConfigCommand) -> anyhow::Result<bool> {
    let mut manager = SettingsManager::open_default().context("Failed to load settings")?;

    match action {
        ConfigCommand::Show => println!("{}", config::describe(&manager)),
        ConfigCommand::SetDb { path } => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            let resolved = config::set_database(&mut manager, path, &cwd)
                .await
                .context("Failed to save settings")?;
            println!("Database: {}", resolved.display());
        }
        ConfigCommand::Reset => {
            let resolved = config::reset(&mut manager)
                .await
                .context("Failed to reset settings")?;
            println!("Settings reset. Database: {}", resolved.display());
        }
    }

    Ok(true)
}

/// Gather username and password from flags or the terminal
fn collect(creds: CredentialArgs) -> anyhow::Result<(String, String)> {
    let username = match creds.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };

    let password = match creds.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    Ok((username, password))
}

fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read username")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn report(feedback: Feedback) -> bool {
    if feedback.is_success() {
        println!("{}", feedback.message());
    } else {
        eprintln!("{}", feedback.message());
    }
    feedback.is_success()
}
