//! Scripted [`LiquidityVenue`] implementation for tests.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use crate::domain::{Amount, SymbolCode, TenantId};
use crate::error::Result;
use crate::port::LiquidityVenue;

/// A venue with per-tenant scripted listings and reserve pairs.
///
/// Listings and reserves can be updated between events to simulate a venue
/// whose liquidity state moves under the engine.
#[derive(Debug, Default)]
pub struct ScriptedVenue {
    listings: RwLock<BTreeMap<TenantId, BTreeSet<SymbolCode>>>,
    reserves: RwLock<BTreeMap<(TenantId, SymbolCode, SymbolCode), (Amount, Amount)>>,
}

impl ScriptedVenue {
    pub fn new() -> Self {
        Self::default()
    }

    /// List `codes` as tradable for `tenant`, replacing any prior listing.
    pub fn list(&self, tenant: &TenantId, codes: impl IntoIterator<Item = SymbolCode>) {
        self.listings
            .write()
            .insert(tenant.clone(), codes.into_iter().collect());
    }

    /// Script the reserve pair returned for `(base, quote)` at `tenant`.
    pub fn set_reserves(
        &self,
        tenant: &TenantId,
        base: &SymbolCode,
        quote: &SymbolCode,
        reserve_base: Amount,
        reserve_quote: Amount,
    ) {
        self.reserves.write().insert(
            (tenant.clone(), base.clone(), quote.clone()),
            (reserve_base, reserve_quote),
        );
    }
}

impl LiquidityVenue for ScriptedVenue {
    async fn tradable_symbols(&self, tenant: &TenantId) -> Result<BTreeSet<SymbolCode>> {
        Ok(self
            .listings
            .read()
            .get(tenant)
            .cloned()
            .unwrap_or_default())
    }

    async fn reserve_pair(
        &self,
        tenant: &TenantId,
        base: &SymbolCode,
        quote: &SymbolCode,
    ) -> Result<Option<(Amount, Amount)>> {
        Ok(self
            .reserves
            .read()
            .get(&(tenant.clone(), base.clone(), quote.clone()))
            .cloned())
    }
}
