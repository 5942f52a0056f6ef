//! Record store port for persistence operations.
//!
//! One keyed table per record kind, each keyed by tenant. The store is an
//! external collaborator; the engine only relies on the upsert contract
//! below for its atomicity guarantee.

use std::future::Future;

use crate::domain::{TenantId, TenantRecord};
use crate::error::Result;

/// Storage operations for one record kind.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `upsert` loads the existing record or a freshly zeroed one
///   ([`TenantRecord::fresh`]), applies the mutation, and writes back as one
///   atomic step: a mutation error must leave the stored record untouched,
///   and no partial write may be observable.
pub trait RecordStore<R: TenantRecord>: Send + Sync {
    /// Load-or-default, mutate, write back. Atomic.
    fn upsert<F>(&self, tenant: &TenantId, mutate: F) -> impl Future<Output = Result<()>> + Send
    where
        F: FnOnce(&mut R) -> Result<()> + Send;

    /// Replace the tenant's record wholesale, creating it if absent.
    fn put(&self, record: R) -> impl Future<Output = Result<()>> + Send;

    /// Get a tenant's record, if one exists.
    fn get(&self, tenant: &TenantId) -> impl Future<Output = Result<Option<R>>> + Send;

    /// Remove a tenant's record. Returns true if one existed.
    ///
    /// Atomic per call: on error the record must still be present.
    fn erase(&self, tenant: &TenantId) -> impl Future<Output = Result<bool>> + Send;
}
