use std::sync::{Arc, RwLock};

use shared::currency::CurrencyTable;
use tracing::{info, warn};

use crate::EconomyBackend;

/// Process-wide currency descriptor cache.
///
/// Readers take a complete snapshot; refresh builds a whole new table and
/// swaps the `Arc`, so a reader never observes a partially updated table.
/// A failed refresh keeps the prior snapshot.
#[derive(Default)]
pub struct CurrencyCache {
    table: RwLock<Arc<CurrencyTable>>,
}

impl CurrencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<CurrencyTable> {
        match self.table.read() {
            Ok(guard) => Arc::clone(&guard),
            // A poisoned lock still holds a complete snapshot.
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, table: CurrencyTable) {
        let table = Arc::new(table);
        match self.table.write() {
            Ok(mut guard) => *guard = table,
            Err(poisoned) => *poisoned.into_inner() = table,
        }
    }

    pub async fn refresh(&self, backend: &dyn EconomyBackend) {
        match backend.currencies().await {
            Ok(table) => {
                info!(currencies = table.len(), "currency cache updated");
                self.replace(table);
            }
            Err(error) => {
                warn!(%error, "currency refresh failed, keeping previous snapshot");
            }
        }
    }
}
