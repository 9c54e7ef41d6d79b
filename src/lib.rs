// Employee Batch Import - Core Library
// Validation, manager resolution and batch orchestration, plus the
// SQLite store and reporting shells used by the CLI.

pub mod error;
pub mod validators;
pub mod entities;
pub mod resolver;
pub mod builders;
pub mod classifier;
pub mod batch;
pub mod db;
pub mod report;
pub mod config;
pub mod logging;
pub mod import;

// Re-export commonly used types
pub use error::{Field, InputError, LineError};
pub use entities::{
    Employee, EmployeeCore, EmployeeKind,
    Manager, ManagerRef, ManagerRegistry, ManagerSource,
    Salesperson, Technician,
};
pub use resolver::{ManagerLookup, ManagerResolver};
pub use builders::{build_core, build_manager, build_salesperson, build_technician};
pub use classifier::{build_line, classify, split_fields};
pub use batch::{BatchOrchestrator, BatchReport, Diagnostic, KindCounts};
pub use db::{
    Event, InsertSummary, SqliteManagerStore,
    setup_database, insert_employees, find_manager_by_matricule,
    get_all_employees, count_employees, count_employees_by_kind,
    insert_event, get_events_for_entity,
};
pub use report::{write_diagnostics, write_diagnostics_csv};
pub use config::ImportConfig;
pub use import::{run_import, ImportOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
