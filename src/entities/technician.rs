// 🔧 Technician Entity

use super::{EmployeeCore, ManagerRef};
use crate::error::{Field, LineError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Valid technician grades
pub const GRADE_RANGE: RangeInclusive<i32> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub core: EmployeeCore,
    pub grade: u8,
    pub manager: ManagerRef,
}

impl Technician {
    /// Build a technician, rejecting grades outside 1..=5.
    ///
    /// The grade arrives already parsed as an integer; only the range is
    /// checked here, so "not an integer" and "out of range" stay distinct.
    pub fn new(core: EmployeeCore, grade: i32, manager: ManagerRef) -> Result<Self, LineError> {
        if !GRADE_RANGE.contains(&grade) {
            return Err(LineError::Range {
                field: Field::Grade,
                value: grade.to_string(),
                min: i64::from(*GRADE_RANGE.start()),
                max: i64::from(*GRADE_RANGE.end()),
            });
        }

        Ok(Technician {
            core,
            grade: grade as u8,
            manager,
        })
    }
}
