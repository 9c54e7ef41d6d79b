// 🧑‍💼 Manager Entity + in-memory registry
//
// Managers own nothing. Technicians point at them by matricule only
// (ManagerRef), so a manager can live in the store or in the current batch.

use super::EmployeeCore;
use crate::resolver::ManagerLookup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// MANAGER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub core: EmployeeCore,
}

impl Manager {
    pub fn new(core: EmployeeCore) -> Self {
        Manager { core }
    }

    pub fn matricule(&self) -> &str {
        &self.core.matricule
    }
}

// ============================================================================
// WEAK REFERENCE
// ============================================================================

/// Where a technician's manager was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerSource {
    /// Persisted before this run
    Store,
    /// Built from an earlier line of the same feed
    Batch,
}

/// Lookup-only link from a technician to its manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRef {
    pub matricule: String,
    pub source: ManagerSource,
}

impl ManagerRef {
    pub fn new(matricule: impl Into<String>, source: ManagerSource) -> Self {
        ManagerRef {
            matricule: matricule.into(),
            source,
        }
    }
}

// ============================================================================
// MANAGER REGISTRY
// ============================================================================

/// In-memory manager store keyed by matricule.
///
/// Used as the lookup when a dry run targets a database that does not
/// exist yet.
#[derive(Debug, Default, Clone)]
pub struct ManagerRegistry {
    managers: HashMap<String, Manager>,
}

impl ManagerRegistry {
    pub fn new() -> Self {
        ManagerRegistry {
            managers: HashMap::new(),
        }
    }

    /// Register a manager; a later registration with the same matricule wins
    pub fn register(&mut self, manager: Manager) {
        self.managers
            .insert(manager.matricule().to_string(), manager);
    }

    pub fn get(&self, matricule: &str) -> Option<&Manager> {
        self.managers.get(matricule)
    }

    pub fn count(&self) -> usize {
        self.managers.len()
    }
}

impl FromIterator<Manager> for ManagerRegistry {
    fn from_iter<I: IntoIterator<Item = Manager>>(iter: I) -> Self {
        let mut registry = ManagerRegistry::new();
        for manager in iter {
            registry.register(manager);
        }
        registry
    }
}

impl ManagerLookup for ManagerRegistry {
    fn find_manager_by_matricule(&self, matricule: &str) -> anyhow::Result<Option<Manager>> {
        Ok(self.get(matricule).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn manager(matricule: &str, last_name: &str) -> Manager {
        Manager::new(EmployeeCore {
            matricule: matricule.to_string(),
            last_name: last_name.to_string(),
            first_name: "Ann".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            salary: Decimal::new(4000, 0),
        })
    }

    #[test]
    fn test_registry_lookup() {
        let registry: ManagerRegistry =
            vec![manager("M00001", "Smith"), manager("M00002", "Jones")]
                .into_iter()
                .collect();

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get("M00002").unwrap().core.last_name, "Jones");
        assert!(registry.get("M99999").is_none());
    }

    #[test]
    fn test_registry_later_registration_wins() {
        let mut registry = ManagerRegistry::new();
        registry.register(manager("M00001", "Smith"));
        registry.register(manager("M00001", "Smith-Jones"));

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get("M00001").unwrap().core.last_name, "Smith-Jones");
    }

    #[test]
    fn test_registry_as_lookup() {
        let registry: ManagerRegistry = std::iter::once(manager("M00001", "Smith")).collect();

        let found = registry.find_manager_by_matricule("M00001").unwrap();
        assert_eq!(found, Some(manager("M00001", "Smith")));
        assert_eq!(registry.find_manager_by_matricule("M00002").unwrap(), None);
    }
}
