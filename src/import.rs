// 🚚 Import Run - feed → batch → report → store
//
// 1. open (or create) the store
// 2. run the batch with the store as manager lookup
// 3. write the diagnostics report, if asked
// 4. insert the records, unless dry run
//
// A dry run never writes to the database: an existing one is opened
// read-only, a missing one is not created.

use crate::batch::{BatchOrchestrator, BatchReport};
use crate::config::ImportConfig;
use crate::db::{self, InsertSummary, SqliteManagerStore};
use crate::entities::ManagerRegistry;
use crate::report;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use tracing::info;

#[derive(Debug)]
pub struct ImportOutcome {
    pub report: BatchReport,
    /// None on dry runs and aborted batches
    pub stored: Option<InsertSummary>,
}

pub fn run_import(config: &ImportConfig) -> Result<ImportOutcome> {
    config.validate()?;

    if config.dry_run {
        return run_dry(config);
    }

    let conn = Connection::open(&config.database)
        .with_context(|| format!("Failed to open database: {}", config.database.display()))?;
    db::setup_database(&conn)?;

    info!(input = %config.input.display(), database = %config.database.display(), "import started");

    let batch_report = {
        let store = SqliteManagerStore::new(&conn);
        BatchOrchestrator::new(&store).process_file(&config.input)
    };
    write_report(config, &batch_report)?;

    let stored = if batch_report.input_error.is_some() {
        None
    } else {
        Some(db::insert_employees(&conn, &batch_report.records)?)
    };

    Ok(ImportOutcome {
        report: batch_report,
        stored,
    })
}

fn run_dry(config: &ImportConfig) -> Result<ImportOutcome> {
    info!(input = %config.input.display(), database = %config.database.display(), "dry run started");

    let batch_report = if config.database.exists() {
        let conn = Connection::open_with_flags(&config.database, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| {
                format!("Failed to open database read-only: {}", config.database.display())
            })?;
        let store = SqliteManagerStore::new(&conn);
        BatchOrchestrator::new(&store).process_file(&config.input)
    } else {
        info!("no database yet; managers resolve within the feed only");
        BatchOrchestrator::new(&ManagerRegistry::new()).process_file(&config.input)
    };
    write_report(config, &batch_report)?;

    Ok(ImportOutcome {
        report: batch_report,
        stored: None,
    })
}

fn write_report(config: &ImportConfig, batch_report: &BatchReport) -> Result<()> {
    if let Some(path) = &config.report {
        report::write_diagnostics_csv(path, &batch_report.diagnostics)?;
        info!(report = %path.display(), rejected = batch_report.diagnostics.len(), "diagnostics written");
    }
    Ok(())
}
