// 🏗️ Record Builders - one per employee kind
//
// Every builder:
// 1. checks the field count for its kind
// 2. validates the shared fields through `build_core`
// 3. validates its own extra fields
//
// Fail-fast: fields are checked in line order and the first failure wins.

use crate::entities::{
    Employee, EmployeeCore, EmployeeKind, Manager, Salesperson, Technician,
};
use crate::error::{Field, LineError};
use crate::resolver::{ManagerLookup, ManagerResolver};
use crate::validators;

// Field positions shared by every layout
const MATRICULE: usize = 0;
const LAST_NAME: usize = 1;
const FIRST_NAME: usize = 2;
const HIRE_DATE: usize = 3;
const SALARY: usize = 4;

// Kind-specific positions
const ANNUAL_REVENUE: usize = 5;
const PERFORMANCE: usize = 6;
const GRADE: usize = 5;
const MANAGER_MATRICULE: usize = 6;

// ============================================================================
// SHARED STEPS
// ============================================================================

fn check_field_count(kind: EmployeeKind, fields: &[&str]) -> Result<(), LineError> {
    let expected = kind.field_count();
    if fields.len() != expected {
        return Err(LineError::FieldCountMismatch {
            kind,
            expected,
            actual: fields.len(),
        });
    }
    Ok(())
}

/// Validate the five attributes every employee has.
///
/// `kind` is the variant being filled in; the matricule must carry its letter.
/// Extra fields after the salary are ignored here.
pub fn build_core(kind: EmployeeKind, fields: &[&str]) -> Result<EmployeeCore, LineError> {
    if fields.len() <= SALARY {
        return Err(LineError::FieldCountMismatch {
            kind,
            expected: kind.field_count(),
            actual: fields.len(),
        });
    }

    let matricule = validators::identifier(fields[MATRICULE])?;
    if !matricule.starts_with(kind.letter()) {
        return Err(LineError::KindMismatch {
            matricule,
            expected: kind,
        });
    }

    let last_name = validators::person_name(Field::LastName, fields[LAST_NAME])?;
    let first_name = validators::person_name(Field::FirstName, fields[FIRST_NAME])?;
    let hire_date = validators::date(Field::HireDate, fields[HIRE_DATE])?;
    let salary = validators::money(Field::Salary, fields[SALARY])?;

    Ok(EmployeeCore {
        matricule,
        last_name,
        first_name,
        hire_date,
        salary,
    })
}

// ============================================================================
// BUILDERS
// ============================================================================

/// `matricule,lastName,firstName,hireDate,salary`
pub fn build_manager(fields: &[&str]) -> Result<Manager, LineError> {
    check_field_count(EmployeeKind::Manager, fields)?;
    let core = build_core(EmployeeKind::Manager, fields)?;
    Ok(Manager::new(core))
}

/// `matricule,lastName,firstName,hireDate,salary,annualRevenue,performance`
pub fn build_salesperson(fields: &[&str]) -> Result<Salesperson, LineError> {
    check_field_count(EmployeeKind::Salesperson, fields)?;
    let core = build_core(EmployeeKind::Salesperson, fields)?;

    let annual_revenue = validators::money(Field::AnnualRevenue, fields[ANNUAL_REVENUE])?;
    let performance = validators::percentage(Field::Performance, fields[PERFORMANCE])?;

    Ok(Salesperson::new(core, annual_revenue, performance))
}

/// `matricule,lastName,firstName,hireDate,salary,grade,managerMatricule`
///
/// The manager is resolved against the store, then against `batch` (the
/// records accumulated so far). The grade range is checked last, when the
/// record itself is constructed.
pub fn build_technician<L>(
    fields: &[&str],
    resolver: &ManagerResolver<'_, L>,
    batch: &[Employee],
) -> Result<Technician, LineError>
where
    L: ManagerLookup + ?Sized,
{
    check_field_count(EmployeeKind::Technician, fields)?;
    let core = build_core(EmployeeKind::Technician, fields)?;

    let grade = validators::grade_value(fields[GRADE])?;
    let manager_matricule = validators::manager_matricule(fields[MANAGER_MATRICULE])?;
    let manager = resolver.resolve(&manager_matricule, batch)?;

    Technician::new(core, grade, manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ManagerRegistry, ManagerSource};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn split(line: &str) -> Vec<&str> {
        line.split(',').collect()
    }

    #[test]
    fn test_build_manager_round_trips_values() {
        let manager = build_manager(&split("M00002,Smith,Ann,01/01/2019,4000")).unwrap();

        assert_eq!(manager.core.matricule, "M00002");
        assert_eq!(manager.core.last_name, "Smith");
        assert_eq!(manager.core.first_name, "Ann");
        assert_eq!(
            manager.core.hire_date,
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
        );
        assert_eq!(manager.core.salary, Decimal::new(4000, 0));
    }

    #[test]
    fn test_build_salesperson_round_trips_values() {
        let salesperson =
            build_salesperson(&split("C00003,Martin,Léa,15/06/2021,2100.5,150000.25,87")).unwrap();

        assert_eq!(salesperson.core.matricule, "C00003");
        assert_eq!(salesperson.core.first_name, "Léa");
        assert_eq!(salesperson.core.salary, Decimal::new(21005, 1));
        assert_eq!(salesperson.annual_revenue, Decimal::new(15000025, 2));
        assert_eq!(salesperson.performance, 87);
    }

    #[test]
    fn test_build_salesperson_performance_bounds() {
        let zero = build_salesperson(&split("C00003,Martin,Léa,15/06/2021,2100,0,0")).unwrap();
        assert_eq!(zero.performance, 0);

        let full = build_salesperson(&split("C00003,Martin,Léa,15/06/2021,2100,0,100")).unwrap();
        assert_eq!(full.performance, 100);

        let err = build_salesperson(&split("C00003,Martin,Léa,15/06/2021,2100,0,101")).unwrap_err();
        assert_eq!(err.code(), "RangeError");
        assert_eq!(err.field(), Some(Field::Performance));
    }

    #[test]
    fn test_field_count_checked_first() {
        // Matricule is also wrong, but the count is reported
        let err = build_manager(&split("M0,Smith,Ann,01/01/2019")).unwrap_err();
        assert_eq!(
            err,
            LineError::FieldCountMismatch {
                kind: EmployeeKind::Manager,
                expected: 5,
                actual: 4,
            }
        );

        let err = build_salesperson(&split("C00003,Martin,Léa,15/06/2021,2100,0")).unwrap_err();
        assert_eq!(
            err,
            LineError::FieldCountMismatch {
                kind: EmployeeKind::Salesperson,
                expected: 7,
                actual: 6,
            }
        );
    }

    #[test]
    fn test_build_core_short_input() {
        let err = build_core(EmployeeKind::Technician, &split("T00001,Doe")).unwrap_err();
        assert_eq!(
            err,
            LineError::FieldCountMismatch {
                kind: EmployeeKind::Technician,
                expected: 7,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Both last name and salary are bad; last name comes first
        let err = build_manager(&split("M00002,Sm1th,Ann,01/01/2019,abc")).unwrap_err();
        assert_eq!(err.field(), Some(Field::LastName));

        let err = build_manager(&split("M00002,Smith,Ann,2019-01-01,abc")).unwrap_err();
        assert_eq!(err.code(), "DateFormatError");
    }

    #[test]
    fn test_kind_letter_must_match_builder() {
        let err = build_manager(&split("T00002,Smith,Ann,01/01/2019,4000")).unwrap_err();
        assert_eq!(
            err,
            LineError::KindMismatch {
                matricule: "T00002".to_string(),
                expected: EmployeeKind::Manager,
            }
        );
    }

    #[test]
    fn test_build_technician_with_batch_manager() {
        let store = ManagerRegistry::new();
        let resolver = ManagerResolver::new(&store);
        let batch = vec![Employee::from(
            build_manager(&split("M00002,Smith,Ann,01/01/2019,4000")).unwrap(),
        )];

        let technician = build_technician(
            &split("T00001,Doe,John,01/01/2020,2500.50,3,M00002"),
            &resolver,
            &batch,
        )
        .unwrap();

        assert_eq!(technician.core.matricule, "T00001");
        assert_eq!(technician.core.salary, Decimal::new(250050, 2));
        assert_eq!(technician.grade, 3);
        assert_eq!(technician.manager.matricule, "M00002");
        assert_eq!(technician.manager.source, ManagerSource::Batch);
        assert_eq!(batch[0].as_manager().unwrap().matricule(), technician.manager.matricule);
    }

    #[test]
    fn test_build_technician_grade_errors_are_distinct() {
        let store: ManagerRegistry = std::iter::once(
            build_manager(&split("M00002,Smith,Ann,01/01/2019,4000")).unwrap(),
        )
        .collect();
        let resolver = ManagerResolver::new(&store);

        let not_integer = build_technician(
            &split("T00001,Doe,John,01/01/2020,2500,three,M00002"),
            &resolver,
            &[],
        )
        .unwrap_err();
        assert_eq!(not_integer.code(), "NumberFormatError");

        let out_of_range = build_technician(
            &split("T00001,Doe,John,01/01/2020,2500,6,M00002"),
            &resolver,
            &[],
        )
        .unwrap_err();
        assert_eq!(out_of_range.code(), "RangeError");
        assert_ne!(not_integer.to_string(), out_of_range.to_string());
    }

    #[test]
    fn test_build_technician_bad_manager_format() {
        let store = ManagerRegistry::new();
        let resolver = ManagerResolver::new(&store);

        let err = build_technician(
            &split("T00001,Doe,John,01/01/2020,2500,3,T00002"),
            &resolver,
            &[],
        )
        .unwrap_err();
        assert_eq!(err.code(), "PatternMismatch");
        assert_eq!(err.field(), Some(Field::ManagerMatricule));
    }

    #[test]
    fn test_build_technician_unknown_manager() {
        let store = ManagerRegistry::new();
        let resolver = ManagerResolver::new(&store);

        let err = build_technician(
            &split("T00001,Doe,John,01/01/2020,2500,3,M00002"),
            &resolver,
            &[],
        )
        .unwrap_err();
        assert_eq!(err.code(), "ManagerNotFound");
    }
}
