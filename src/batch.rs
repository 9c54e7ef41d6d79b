// 📦 Batch Orchestrator - one run over an employee feed
//
// Start → (read line → classify & build → record | diagnostic)* → Done
//
// A bad line never stops the run: it becomes a Diagnostic and the next line
// is processed. Only an unreadable input aborts, and then nothing at all is
// produced (empty records, zero diagnostics).

use crate::classifier;
use crate::entities::{Employee, EmployeeKind};
use crate::error::{InputError, LineError};
use crate::resolver::{ManagerLookup, ManagerResolver};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{error, info, warn};

// ============================================================================
// DIAGNOSTIC
// ============================================================================

/// A rejected line: where it was, what it said, why it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based
    pub line_number: usize,
    pub raw_line: String,
    pub error: LineError,
}

impl Diagnostic {
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} => {}", self.line_number, self.error, self.raw_line)
    }
}

// ============================================================================
// BATCH REPORT
// ============================================================================

/// Output of a run: records and diagnostics, both in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub records: Vec<Employee>,
    pub diagnostics: Vec<Diagnostic>,
    pub lines_read: usize,
    /// Set when the input could not be read; records and diagnostics are empty
    pub input_error: Option<String>,
}

/// Per-kind counts of built records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub managers: usize,
    pub technicians: usize,
    pub salespeople: usize,
}

impl BatchReport {
    fn aborted(reason: String) -> Self {
        BatchReport {
            input_error: Some(reason),
            ..BatchReport::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.input_error.is_none()
    }

    pub fn counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for record in &self.records {
            match record.kind() {
                EmployeeKind::Manager => counts.managers += 1,
                EmployeeKind::Technician => counts.technicians += 1,
                EmployeeKind::Salesperson => counts.salespeople += 1,
            }
        }
        counts
    }

    pub fn summary(&self) -> String {
        if let Some(reason) = &self.input_error {
            return format!("Batch aborted: {}", reason);
        }

        let counts = self.counts();
        format!(
            "Lines: {}, Records: {} ({} managers, {} technicians, {} salespeople), Rejected: {}",
            self.lines_read,
            self.records.len(),
            counts.managers,
            counts.technicians,
            counts.salespeople,
            self.diagnostics.len()
        )
    }
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Runs batches against a read-only persisted manager store
pub struct BatchOrchestrator<'s, L: ManagerLookup + ?Sized> {
    resolver: ManagerResolver<'s, L>,
}

impl<'s, L: ManagerLookup + ?Sized> BatchOrchestrator<'s, L> {
    pub fn new(store: &'s L) -> Self {
        BatchOrchestrator {
            resolver: ManagerResolver::new(store),
        }
    }

    /// Process lines in order. Line numbers start at 1.
    pub fn process_lines<I, S>(&self, lines: I) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            report.lines_read += 1;

            // The accumulated records are the batch half of manager resolution
            match classifier::build_line(line, &self.resolver, &report.records) {
                Ok(employee) => report.records.push(employee),
                Err(error) => {
                    let diagnostic = Diagnostic {
                        line_number: index + 1,
                        raw_line: line.to_string(),
                        error,
                    };
                    warn!(
                        line = diagnostic.line_number,
                        kind = diagnostic.error.code(),
                        "{} => {}",
                        diagnostic.error,
                        diagnostic.raw_line
                    );
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        info!(
            lines = report.lines_read,
            records = report.records.len(),
            rejected = report.diagnostics.len(),
            "batch finished"
        );

        report
    }

    /// Read everything from `reader` and process it.
    ///
    /// `source` only names the input in logs and in the abort reason.
    pub fn process_reader<R: Read>(&self, source: &Path, mut reader: R) -> BatchReport {
        let mut content = String::new();
        if let Err(e) = reader.read_to_string(&mut content) {
            return abort(InputError {
                path: source.to_path_buf(),
                source: e,
            });
        }

        info!(input = %source.display(), lines = content.lines().count(), "reading employee feed");
        self.process_lines(content.lines())
    }

    /// Open `path` and process it. An unreadable file yields an empty report
    /// with `input_error` set; it is never an `Err`.
    pub fn process_file(&self, path: &Path) -> BatchReport {
        match File::open(path) {
            Ok(file) => self.process_reader(path, file),
            Err(e) => abort(InputError {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

fn abort(err: InputError) -> BatchReport {
    error!("{}", err);
    BatchReport::aborted(err.to_string())
}
