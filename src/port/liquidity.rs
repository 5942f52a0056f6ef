//! Liquidity venue port.
//!
//! Read-only view of a tenant's liquidity pools, queried by the spot-price
//! snapshotter. Lookups are synchronous with respect to event processing:
//! a refresh completes (or fails) before the triggering event finishes.

use std::collections::BTreeSet;
use std::future::Future;

use crate::domain::{Amount, SymbolCode, TenantId};
use crate::error::Result;

/// Read access to a tenant's liquidity state.
pub trait LiquidityVenue: Send + Sync {
    /// Every currency the tenant currently lists as tradable.
    fn tradable_symbols(
        &self,
        tenant: &TenantId,
    ) -> impl Future<Output = Result<BTreeSet<SymbolCode>>> + Send;

    /// Reserve pair for `(base, quote)`, in that order.
    ///
    /// `None` when the venue has no reserve entry for the pair; the caller
    /// degrades that currency's quote to 0 rather than failing the refresh.
    fn reserve_pair(
        &self,
        tenant: &TenantId,
        base: &SymbolCode,
        quote: &SymbolCode,
    ) -> impl Future<Output = Result<Option<(Amount, Amount)>>> + Send;
}
