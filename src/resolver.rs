// 🔗 Manager Resolver - binds a technician to its manager
//
// Two sources, in this order:
// 1. the persisted store (anything implementing ManagerLookup)
// 2. the records already built in the current batch, in insertion order
//
// A manager that only appears LATER in the feed is not found: forward
// references are rejected on purpose.

use crate::entities::{Employee, Manager, ManagerRef, ManagerSource};
use crate::error::LineError;
use tracing::debug;

// ============================================================================
// PERSISTED STORE SEAM
// ============================================================================

/// Read-only lookup into managers persisted before the run
pub trait ManagerLookup {
    fn find_manager_by_matricule(&self, matricule: &str) -> anyhow::Result<Option<Manager>>;
}

// ============================================================================
// RESOLVER
// ============================================================================

pub struct ManagerResolver<'s, L: ManagerLookup + ?Sized> {
    store: &'s L,
}

impl<'s, L: ManagerLookup + ?Sized> ManagerResolver<'s, L> {
    pub fn new(store: &'s L) -> Self {
        ManagerResolver { store }
    }

    /// Resolve `matricule` (already checked against the manager format).
    ///
    /// Store hits win over batch hits. In the batch, the first Manager with a
    /// matching matricule is returned; every other record is skipped.
    pub fn resolve(&self, matricule: &str, batch: &[Employee]) -> Result<ManagerRef, LineError> {
        let persisted = self
            .store
            .find_manager_by_matricule(matricule)
            .map_err(|e| LineError::StoreLookup {
                matricule: matricule.to_string(),
                message: format!("{:#}", e),
            })?;

        if persisted.is_some() {
            debug!(matricule, "manager resolved from store");
            return Ok(ManagerRef::new(matricule, ManagerSource::Store));
        }

        let in_batch = batch
            .iter()
            .filter_map(Employee::as_manager)
            .find(|m| m.matricule() == matricule);

        match in_batch {
            Some(manager) => {
                debug!(matricule, "manager resolved from batch");
                Ok(ManagerRef::new(manager.matricule(), ManagerSource::Batch))
            }
            None => Err(LineError::ManagerNotFound {
                matricule: matricule.to_string(),
            }),
        }
    }
}
