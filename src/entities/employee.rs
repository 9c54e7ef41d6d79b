// 👤 Employee Entity - Common attributes + kind-tagged variants
//
// Every employee shares the same five attributes. The kind is a tag,
// not a hierarchy: dispatch happens on the discriminator letter.

use super::{Manager, Salesperson, Technician};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// EMPLOYEE KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeKind {
    Manager,
    Technician,
    Salesperson,
}

impl EmployeeKind {
    /// Discriminator letter, also the first character of the matricule
    pub fn letter(&self) -> char {
        match self {
            EmployeeKind::Manager => 'M',
            EmployeeKind::Technician => 'T',
            EmployeeKind::Salesperson => 'C',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(EmployeeKind::Manager),
            'T' => Some(EmployeeKind::Technician),
            'C' => Some(EmployeeKind::Salesperson),
            _ => None,
        }
    }

    /// Number of comma-separated fields a line of this kind must have
    pub fn field_count(&self) -> usize {
        match self {
            EmployeeKind::Manager => 5,
            EmployeeKind::Technician => 7,
            EmployeeKind::Salesperson => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeKind::Manager => "manager",
            EmployeeKind::Technician => "technician",
            EmployeeKind::Salesperson => "salesperson",
        }
    }
}

impl std::fmt::Display for EmployeeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SHARED ATTRIBUTES
// ============================================================================

/// The attributes every employee carries, whatever the kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCore {
    /// `<KindLetter><5 digits>`, unique across employees
    pub matricule: String,
    pub last_name: String,
    pub first_name: String,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
}

impl EmployeeCore {
    /// Kind implied by the matricule prefix
    pub fn kind(&self) -> Option<EmployeeKind> {
        self.matricule.chars().next().and_then(EmployeeKind::from_letter)
    }
}

// ============================================================================
// EMPLOYEE
// ============================================================================

/// A fully validated employee record. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Employee {
    Manager(Manager),
    Technician(Technician),
    Salesperson(Salesperson),
}

impl Employee {
    pub fn kind(&self) -> EmployeeKind {
        match self {
            Employee::Manager(_) => EmployeeKind::Manager,
            Employee::Technician(_) => EmployeeKind::Technician,
            Employee::Salesperson(_) => EmployeeKind::Salesperson,
        }
    }

    pub fn core(&self) -> &EmployeeCore {
        match self {
            Employee::Manager(m) => &m.core,
            Employee::Technician(t) => &t.core,
            Employee::Salesperson(s) => &s.core,
        }
    }

    pub fn matricule(&self) -> &str {
        &self.core().matricule
    }

    pub fn as_manager(&self) -> Option<&Manager> {
        match self {
            Employee::Manager(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Manager> for Employee {
    fn from(manager: Manager) -> Self {
        Employee::Manager(manager)
    }
}

impl From<Technician> for Employee {
    fn from(technician: Technician) -> Self {
        Employee::Technician(technician)
    }
}

impl From<Salesperson> for Employee {
    fn from(salesperson: Salesperson) -> Self {
        Employee::Salesperson(salesperson)
    }
}
