use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use employee_batch::config::{DEFAULT_DATABASE, DEFAULT_INPUT, DEFAULT_LOG_FILTER};
use employee_batch::{count_employees_by_kind, logging, run_import, setup_database, ImportConfig};

#[derive(Parser)]
#[command(name = "employee-batch", version, about = "Validate and import employee feeds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a feed, resolve managers and store the records
    Import {
        /// Employee feed, one employee per line [default: employees.csv]
        input: Option<PathBuf>,

        /// SQLite store [default: employees.db]
        #[arg(long)]
        database: Option<PathBuf>,

        /// Write rejected lines to this CSV file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Validate only; the database is never created or written
        #[arg(long)]
        dry_run: bool,

        /// Log filter used when RUST_LOG is not set [default: info]
        #[arg(long)]
        log_filter: Option<String>,

        /// Read all settings from a JSON file instead
        #[arg(
            long,
            conflicts_with_all = ["input", "database", "report", "dry_run", "log_filter"]
        )]
        config: Option<PathBuf>,
    },

    /// Show how many employees of each kind are stored
    Stats {
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Import {
            input,
            database,
            report,
            dry_run,
            log_filter,
            config,
        } => {
            let config = match config {
                Some(path) => ImportConfig::from_json_file(&path)?,
                None => import_config_from_args(input, database, report, dry_run, log_filter),
            };
            logging::init(&config.log_filter);
            run_import_command(&config)
        }
        Command::Stats { database } => {
            logging::init(DEFAULT_LOG_FILTER);
            run_stats(&database)
        }
    }
}

/// Flags left out on the command line take the ImportConfig defaults
fn import_config_from_args(
    input: Option<PathBuf>,
    database: Option<PathBuf>,
    report: Option<PathBuf>,
    dry_run: bool,
    log_filter: Option<String>,
) -> ImportConfig {
    let mut config = ImportConfig::new(input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)))
        .with_dry_run(dry_run);
    if let Some(database) = database {
        config = config.with_database(database);
    }
    if let Some(report) = report {
        config = config.with_report(report);
    }
    if let Some(filter) = log_filter {
        config = config.with_log_filter(filter);
    }
    config
}

fn run_import_command(config: &ImportConfig) -> Result<()> {
    println!("🗄️  Employee import: {}", config.input.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let outcome = run_import(config)?;
    let report = &outcome.report;

    println!("\n{}", report.summary());

    if let Some(reason) = &report.input_error {
        eprintln!("❌ Nothing imported: {}", reason);
        std::process::exit(1);
    }

    for diagnostic in &report.diagnostics {
        println!("  ✗ {}", diagnostic);
    }

    if let Some(path) = &config.report {
        println!("\n📝 Rejected lines written to {}", path.display());
    }

    match outcome.stored {
        Some(summary) => {
            println!("\n✓ Inserted: {} employees", summary.inserted);
            println!("✓ Skipped duplicates: {}", summary.duplicates);
        }
        None => println!("\n✓ Dry run: nothing stored"),
    }

    Ok(())
}

fn run_stats(database: &Path) -> Result<()> {
    let conn = Connection::open(database)
        .with_context(|| format!("Failed to open database: {}", database.display()))?;
    setup_database(&conn)?;

    println!("📊 Stored employees ({})", database.display());
    let counts = count_employees_by_kind(&conn)?;
    if counts.is_empty() {
        println!("  (none)");
    }
    for (kind, count) in counts {
        println!("  {:<12} {}", kind, count);
    }

    Ok(())
}
