// Entity Models
//
// Each employee kind is a variant of `Employee` over the same
// `EmployeeCore` attributes. Technicians reach their manager through a
// `ManagerRef` (matricule lookup), never by ownership.

pub mod employee;
pub mod manager;
pub mod salesperson;
pub mod technician;

pub use employee::{Employee, EmployeeCore, EmployeeKind};
pub use manager::{Manager, ManagerRef, ManagerRegistry, ManagerSource};
pub use salesperson::Salesperson;
pub use technician::{Technician, GRADE_RANGE};
