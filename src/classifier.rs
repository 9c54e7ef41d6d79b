// 🧭 Line Classifier - picks the builder from the first character
//
// Dispatch table:
//   'T' → technician
//   'M' → manager
//   'C' → salesperson
//   anything else (or nothing) → UnrecognizedKind

use crate::builders;
use crate::entities::{Employee, EmployeeKind};
use crate::error::LineError;
use crate::resolver::{ManagerLookup, ManagerResolver};

/// Kind named by the line's first character
pub fn classify(line: &str) -> Result<EmployeeKind, LineError> {
    let first = line.chars().next();
    first
        .and_then(EmployeeKind::from_letter)
        .ok_or(LineError::UnrecognizedKind { found: first })
}

/// Split a line into raw comma-delimited tokens.
///
/// No trimming and no quoting: `"a, b"` yields `["a", " b"]`. Trailing empty
/// tokens are dropped, so `"x,y,,"` has two fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Classify `line` and run the matching builder.
///
/// `batch` holds the records built from earlier lines; only technicians
/// read it, to find their manager.
pub fn build_line<L>(
    line: &str,
    resolver: &ManagerResolver<'_, L>,
    batch: &[Employee],
) -> Result<Employee, LineError>
where
    L: ManagerLookup + ?Sized,
{
    let kind = classify(line)?;
    let fields = split_fields(line);

    let employee = match kind {
        EmployeeKind::Technician => builders::build_technician(&fields, resolver, batch)?.into(),
        EmployeeKind::Manager => builders::build_manager(&fields)?.into(),
        EmployeeKind::Salesperson => builders::build_salesperson(&fields)?.into(),
    };

    Ok(employee)
}
