// 📝 Diagnostics Report - rejected lines as CSV for the people fixing the feed

use crate::batch::Diagnostic;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One CSV row per rejected line
#[derive(Debug, Serialize)]
struct DiagnosticRow<'a> {
    line_number: usize,
    kind: &'static str,
    field: &'static str,
    reason: String,
    raw_line: &'a str,
}

impl<'a> From<&'a Diagnostic> for DiagnosticRow<'a> {
    fn from(d: &'a Diagnostic) -> Self {
        DiagnosticRow {
            line_number: d.line_number,
            kind: d.error.code(),
            field: d.error.field().map(|f| f.name()).unwrap_or(""),
            reason: d.reason(),
            raw_line: &d.raw_line,
        }
    }
}

const HEADER: [&str; 5] = ["line_number", "kind", "field", "reason", "raw_line"];

/// Write diagnostics to any writer. The header row is always written.
pub fn write_diagnostics<W: Write>(writer: W, diagnostics: &[Diagnostic]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)
        .context("Failed to write diagnostics header")?;

    for diagnostic in diagnostics {
        wtr.serialize(DiagnosticRow::from(diagnostic))
            .with_context(|| format!("Failed to write diagnostic for line {}", diagnostic.line_number))?;
    }

    wtr.flush().context("Failed to flush diagnostics report")?;
    Ok(())
}

/// Write diagnostics to a CSV file, replacing it if it exists
pub fn write_diagnostics_csv(path: &Path, diagnostics: &[Diagnostic]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report: {}", path.display()))?;
    write_diagnostics(file, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchOrchestrator;
    use crate::entities::ManagerRegistry;

    fn diagnostics() -> Vec<Diagnostic> {
        let store = ManagerRegistry::new();
        BatchOrchestrator::new(&store)
            .process_lines([
                "M00002,Smith,Ann,01/01/2019,4000",
                "X00001,Doe,John,01/01/2020,2500.50",
                "T00001,Doe,John,01/01/2020,2500.50,9,M00002",
            ])
            .diagnostics
    }

    #[test]
    fn test_write_diagnostics() {
        let mut out = Vec::new();
        write_diagnostics(&mut out, &diagnostics()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "line_number,kind,field,reason,raw_line");
        assert!(lines[1].starts_with("2,UnrecognizedKind,,"));
        // Raw lines contain commas, so they come back quoted
        assert!(lines[1].ends_with("\"X00001,Doe,John,01/01/2020,2500.50\""));
        assert!(lines[2].starts_with("3,RangeError,grade,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_diagnostics_csv_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.csv");
        write_diagnostics_csv(&path, &diagnostics()).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2");
        assert_eq!(&rows[0][4], "X00001,Doe,John,01/01/2020,2500.50");
        assert_eq!(&rows[1][1], "RangeError");
    }

    #[test]
    fn test_no_diagnostics_writes_header_only() {
        let mut out = Vec::new();
        write_diagnostics(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "line_number,kind,field,reason,raw_line\n");
    }
}
