// 🗄️ Employee Store - SQLite persistence around the batch engine
//
// The engine only READS from here (SqliteManagerStore) while a batch runs.
// Records are written once the batch is over (insert_employees).

use crate::entities::{
    Employee, EmployeeCore, EmployeeKind, Manager, ManagerRef, ManagerSource, Salesperson,
    Technician,
};
use crate::resolver::ManagerLookup;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

const EMPLOYEE_COLUMNS: &str = "matricule, kind, last_name, first_name, hire_date, salary,
     annual_revenue, performance, grade, manager_matricule";

/// Event for audit trail
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub data: serde_json::Value,
    pub actor: String,
}

impl Event {
    pub fn new(
        event_type: &str,
        entity_type: &str,
        entity_id: &str,
        data: serde_json::Value,
        actor: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            data,
            actor: actor.to_string(),
        }
    }
}

/// Outcome of `insert_employees`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertSummary {
    pub inserted: usize,
    /// Matricules already present in the store
    pub duplicates: usize,
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Employees Table (one row per employee, kind-specific columns nullable)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            matricule TEXT UNIQUE NOT NULL,
            kind TEXT NOT NULL,
            last_name TEXT NOT NULL,
            first_name TEXT NOT NULL,
            hire_date TEXT NOT NULL,
            salary TEXT NOT NULL,
            annual_revenue TEXT,
            performance INTEGER,
            grade INTEGER,
            manager_matricule TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Events Table (audit trail)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT UNIQUE NOT NULL,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            data TEXT NOT NULL,
            actor TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_employees_kind ON employees(kind)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_employees_manager ON employees(manager_matricule)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_type, entity_id)",
        [],
    )?;

    Ok(())
}

/// Insert a finished batch in one transaction.
///
/// A matricule that is already stored counts as a duplicate, not an error.
pub fn insert_employees(conn: &Connection, employees: &[Employee]) -> Result<InsertSummary> {
    let tx = conn
        .unchecked_transaction()
        .context("Failed to start insert transaction")?;
    let mut summary = InsertSummary::default();

    for employee in employees {
        let core = employee.core();
        let (annual_revenue, performance, grade, manager_matricule) = match employee {
            Employee::Manager(_) => (None, None, None, None),
            Employee::Salesperson(s) => (
                Some(s.annual_revenue.to_string()),
                Some(s.performance),
                None,
                None,
            ),
            Employee::Technician(t) => (None, None, Some(t.grade), Some(t.manager.matricule.clone())),
        };

        let result = tx.execute(
            "INSERT INTO employees (
                matricule, kind, last_name, first_name, hire_date, salary,
                annual_revenue, performance, grade, manager_matricule
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                core.matricule,
                employee.kind().as_str(),
                core.last_name,
                core.first_name,
                core.hire_date.format(STORED_DATE_FORMAT).to_string(),
                core.salary.to_string(),
                annual_revenue,
                performance,
                grade,
                manager_matricule,
            ],
        );

        match result {
            Ok(_) => {
                summary.inserted += 1;

                let event = Event::new(
                    "employee_added",
                    employee.kind().as_str(),
                    &core.matricule,
                    serde_json::to_value(employee)?,
                    "employee_batch",
                );
                insert_event(&tx, &event)?;
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                debug!(matricule = %core.matricule, "employee already stored");
                summary.duplicates += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to insert {}", core.matricule))
            }
        }
    }

    tx.commit().context("Failed to commit employees")?;

    info!(
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        "employees stored"
    );

    Ok(summary)
}

/// Insert event into audit trail
pub fn insert_event(conn: &Connection, event: &Event) -> Result<()> {
    let data_json = serde_json::to_string(&event.data)?;

    conn.execute(
        "INSERT INTO events (
            event_id, timestamp, event_type, entity_type, entity_id, data, actor
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.event_id,
            event.timestamp.to_rfc3339(),
            event.event_type,
            event.entity_type,
            event.entity_id,
            data_json,
            event.actor,
        ],
    )?;

    Ok(())
}

/// Get events for a specific entity
pub fn get_events_for_entity(
    conn: &Connection,
    entity_type: &str,
    entity_id: &str,
) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT event_id, timestamp, event_type, entity_type, entity_id, data, actor
         FROM events
         WHERE entity_type = ?1 AND entity_id = ?2
         ORDER BY id",
    )?;

    let events = stmt
        .query_map(params![entity_type, entity_id], |row| {
            let timestamp_str: String = row.get(1)?;
            let data_json: String = row.get(5)?;

            Ok(Event {
                event_id: row.get(0)?,
                timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                    .map_err(|e| conversion_error(1, e))?
                    .with_timezone(&Utc),
                event_type: row.get(2)?,
                entity_type: row.get(3)?,
                entity_id: row.get(4)?,
                data: serde_json::from_str(&data_json).map_err(|e| conversion_error(5, e))?,
                actor: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

/// Look up a persisted manager
pub fn find_manager_by_matricule(conn: &Connection, matricule: &str) -> Result<Option<Manager>> {
    let sql = format!(
        "SELECT {} FROM employees WHERE matricule = ?1 AND kind = ?2",
        EMPLOYEE_COLUMNS
    );

    let employee = conn
        .query_row(
            &sql,
            params![matricule, EmployeeKind::Manager.as_str()],
            employee_from_row,
        )
        .optional()
        .with_context(|| format!("Failed to look up manager {}", matricule))?;

    Ok(employee.and_then(|e| match e {
        Employee::Manager(m) => Some(m),
        _ => None,
    }))
}

/// All stored employees, in insertion order
pub fn get_all_employees(conn: &Connection) -> Result<Vec<Employee>> {
    let sql = format!("SELECT {} FROM employees ORDER BY id", EMPLOYEE_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;

    let employees = stmt
        .query_map([], employee_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(employees)
}

pub fn count_employees(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
    Ok(count)
}

/// Number of stored employees per kind, e.g. `[("manager", 3), ...]`
pub fn count_employees_by_kind(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt =
        conn.prepare("SELECT kind, COUNT(*) FROM employees GROUP BY kind ORDER BY kind")?;

    let counts = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(counts)
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn decimal_column(row: &Row, column: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(column)?;
    Decimal::from_str(&text).map_err(|e| conversion_error(column, e))
}

fn employee_from_row(row: &Row) -> rusqlite::Result<Employee> {
    let hire_date: String = row.get(4)?;
    let core = EmployeeCore {
        matricule: row.get(0)?,
        last_name: row.get(2)?,
        first_name: row.get(3)?,
        hire_date: NaiveDate::parse_from_str(&hire_date, STORED_DATE_FORMAT)
            .map_err(|e| conversion_error(4, e))?,
        salary: decimal_column(row, 5)?,
    };

    let kind: String = row.get(1)?;
    match kind.as_str() {
        "manager" => Ok(Employee::Manager(Manager::new(core))),
        "salesperson" => Ok(Employee::Salesperson(Salesperson::new(
            core,
            decimal_column(row, 6)?,
            row.get(7)?,
        ))),
        "technician" => {
            let grade: u8 = row.get(8)?;
            let manager: String = row.get(9)?;
            Ok(Employee::Technician(Technician {
                core,
                grade,
                manager: ManagerRef::new(manager, ManagerSource::Store),
            }))
        }
        other => Err(rusqlite::Error::InvalidColumnType(
            1,
            format!("unknown employee kind '{}'", other),
            Type::Text,
        )),
    }
}

// ============================================================================
// PERSISTED MANAGER LOOKUP
// ============================================================================

/// Read-only view of the store for the manager resolver
pub struct SqliteManagerStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteManagerStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteManagerStore { conn }
    }
}

impl ManagerLookup for SqliteManagerStore<'_> {
    fn find_manager_by_matricule(&self, matricule: &str) -> Result<Option<Manager>> {
        find_manager_by_matricule(self.conn, matricule)
    }
}
