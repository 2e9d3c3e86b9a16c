//! menucheck CLI
//!
//! Single-pass batch entry point, intended to be invoked on a schedule
//! (cron or similar) with at most one instance running at a time.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use menucheck::{
    error::Result,
    models::Config,
    notify::SmtpNotifier,
    pipeline::{CheckOutcome, CheckPipeline},
    storage::{ArtifactStore, FingerprintLedger},
    utils::http::HttpFetcher,
};

/// menucheck - Cafeteria Menu Watcher
#[derive(Parser, Debug)]
#[command(name = "menucheck", version, about = "Checks for a new cafeteria menu PDF and emails it")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the page once and email the menu if it changed
    Check,

    /// Show the persisted ledger state and current artifact
    Info,

    /// Validate configuration files
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Check => {
            config.validate()?;
            config.validate_email()?;

            let fetcher = HttpFetcher::new(&config.checker)?;
            let store = ArtifactStore::new(&config.checker.download_dir);
            let ledger = FingerprintLedger::new(&config.checker.state_file);
            let notifier = SmtpNotifier::new(config.email.clone());

            let pipeline = CheckPipeline::new(&config, &fetcher, &store, &ledger, &notifier);
            match pipeline.run()? {
                CheckOutcome::NoMenuFound => {
                    log::info!("No menu found for section '{}'", config.section.name);
                }
                CheckOutcome::Unchanged { url } => {
                    log::info!("Menu unchanged: {}", url);
                }
                CheckOutcome::Changed { url, path } => {
                    log::info!("New menu from {} stored at {}", url, path.display());
                }
            }
        }

        Command::Info => {
            let ledger = FingerprintLedger::new(&config.checker.state_file);
            let state = ledger.load()?;

            if let Some(hash) = &state.last_pdf_hash {
                log::info!("Last menu hash: {}", hash);
            } else {
                log::info!("No menu recorded yet.");
            }
            if let Some(url) = &state.last_pdf_url {
                log::info!("Last menu URL: {}", url);
            }
            if let Some(checked) = &state.last_check {
                log::info!("Last check: {}", checked);
            }

            let store = ArtifactStore::new(&config.checker.download_dir);
            match store.current()? {
                Some(path) => log::info!("Current artifact: {}", path.display()),
                None => log::info!("No artifact on disk."),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Checker and section config OK");
            config.validate_email()?;
            log::info!("✓ Email config OK");
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
