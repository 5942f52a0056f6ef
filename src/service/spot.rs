//! Spot-price snapshot computation.
//!
//! Derives relative prices from a tenant's live liquidity reserves and
//! persists them wholesale: `quote[q] = reserve_base / reserve_quote` for
//! every tradable currency `q`, relative to the configured base.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::domain::{SpotPriceSnapshot, SymbolCode, TenantId};
use crate::error::{Error, Result};
use crate::port::{LiquidityVenue, RecordStore};

/// Recomputes and persists a tenant's spot-price table.
pub struct SpotPriceSnapshotter<V, S> {
    venue: Arc<V>,
    store: Arc<S>,
}

impl<V, S> SpotPriceSnapshotter<V, S>
where
    V: LiquidityVenue,
    S: RecordStore<SpotPriceSnapshot>,
{
    /// Create a new snapshotter over a liquidity venue and snapshot store.
    pub fn new(venue: Arc<V>, store: Arc<S>) -> Self {
        Self { venue, store }
    }

    /// Recompute every quote for `tenant` relative to `base` and replace the
    /// stored snapshot.
    ///
    /// A currency whose tradability cannot be confirmed (base or quote leg
    /// unlisted, or no reserve entry for the pair) is recorded as quote `0`
    /// and the refresh continues. A listed pair with a zero quote-leg
    /// reserve fails the whole refresh with [`Error::ZeroReserve`]; nothing
    /// is persisted in that case.
    pub async fn refresh(
        &self,
        tenant: &TenantId,
        base: &SymbolCode,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let symbols = self.venue.tradable_symbols(tenant).await?;
        let base_listed = symbols.contains(base);

        let mut quotes = BTreeMap::new();
        for symbol in &symbols {
            let quote = if symbol == base {
                // The base is in the enumeration, so it is listed.
                1.0
            } else if !base_listed {
                0.0
            } else {
                self.spot_price(tenant, base, symbol).await?
            };
            quotes.insert(symbol.clone(), quote);
        }
        debug!(%tenant, %base, quotes = quotes.len(), "refreshed spot prices");

        self.store
            .put(SpotPriceSnapshot {
                tenant: tenant.clone(),
                last_modified: now,
                base: base.clone(),
                quotes,
            })
            .await
    }

    /// Ratio of the base reserve to the quote reserve for one pair.
    async fn spot_price(
        &self,
        tenant: &TenantId,
        base: &SymbolCode,
        quote: &SymbolCode,
    ) -> Result<f64> {
        let Some((reserve_base, reserve_quote)) =
            self.venue.reserve_pair(tenant, base, quote).await?
        else {
            return Ok(0.0);
        };

        if reserve_quote.is_zero() {
            return Err(Error::ZeroReserve {
                tenant: tenant.clone(),
                symbol: quote.clone(),
            });
        }

        let ratio = reserve_base
            .value()
            .checked_div(reserve_quote.value())
            .and_then(|d| d.to_f64());
        ratio.ok_or_else(|| Error::ZeroReserve {
            tenant: tenant.clone(),
            symbol: quote.clone(),
        })
    }
}
