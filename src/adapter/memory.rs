//! In-memory record store.
//!
//! The reference [`RecordStore`] adapter: one lock-guarded table per record
//! kind. The write lock is held across the whole load-mutate-store sequence,
//! so an upsert is atomic and a failed mutation leaves the stored record
//! untouched.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{TenantId, TenantRecord};
use crate::error::Result;
use crate::port::RecordStore;

/// In-memory table of one record kind, keyed by tenant.
#[derive(Debug)]
pub struct MemoryRecordStore<R: TenantRecord> {
    records: RwLock<HashMap<TenantId, R>>,
}

impl<R: TenantRecord> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TenantRecord> MemoryRecordStore<R> {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of tenants with a record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether no tenant has a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<R: TenantRecord> RecordStore<R> for MemoryRecordStore<R> {
    async fn upsert<F>(&self, tenant: &TenantId, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut R) -> Result<()> + Send,
    {
        let mut records = self.records.write();
        // Mutate a working copy so an error keeps the stored record intact.
        let mut working = records
            .get(tenant)
            .cloned()
            .unwrap_or_else(|| R::fresh(tenant));
        mutate(&mut working)?;
        records.insert(tenant.clone(), working);
        Ok(())
    }

    async fn put(&self, record: R) -> Result<()> {
        self.records
            .write()
            .insert(record.tenant().clone(), record);
        Ok(())
    }

    async fn get(&self, tenant: &TenantId) -> Result<Option<R>> {
        Ok(self.records.read().get(tenant).cloned())
    }

    async fn erase(&self, tenant: &TenantId) -> Result<bool> {
        Ok(self.records.write().remove(tenant).is_some())
    }
}
