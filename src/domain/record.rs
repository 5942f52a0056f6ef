//! Per-tenant aggregate records.
//!
//! One record of each kind exists per tenant, created lazily on the first
//! event and destroyed only by the administrative erase. Shapes mirror the
//! on-ledger tables read by external reporting tools.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::accumulator::{AmountAccumulator, CounterAccumulator, FlowAccumulator};
use crate::domain::id::{AccountId, RouteCode, TenantId};
use crate::domain::symbol::SymbolCode;

/// A per-tenant aggregate the record store can load-or-default.
pub trait TenantRecord: Clone + Send + Sync + 'static {
    /// A zeroed record for a tenant that has no stored state yet.
    ///
    /// Timestamps start at the Unix epoch so the first windowed event always
    /// opens a fresh window.
    fn fresh(tenant: &TenantId) -> Self;

    /// The owning tenant.
    fn tenant(&self) -> &TenantId;
}

/// Trading volume and fees, bucketed by UTC day in the windowed deployment
/// mode or accumulated forever in the rolling one.
///
/// `last_modified` doubles as the window start in windowed mode: it is set
/// to 00:00 UTC when a new day opens and left untouched within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub tenant: TenantId,
    pub last_modified: DateTime<Utc>,
    pub transactions: u64,
    pub volume: AmountAccumulator,
    pub fees: AmountAccumulator,
}

impl TenantRecord for VolumeRecord {
    fn fresh(tenant: &TenantId) -> Self {
        Self {
            tenant: tenant.clone(),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            transactions: 0,
            volume: AmountAccumulator::new(),
            fees: AmountAccumulator::new(),
        }
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}

/// Flash-loan borrow totals, fees, and current reserves.
///
/// `reserves` holds point-in-time figures: each update replaces the slot for
/// its currency instead of summing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashRecord {
    pub tenant: TenantId,
    pub last_modified: DateTime<Utc>,
    pub transactions: u64,
    pub borrow: AmountAccumulator,
    pub fees: AmountAccumulator,
    pub reserves: AmountAccumulator,
}

impl TenantRecord for FlashRecord {
    fn fresh(tenant: &TenantId) -> Self {
        Self {
            tenant: tenant.clone(),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            transactions: 0,
            borrow: AmountAccumulator::new(),
            fees: AmountAccumulator::new(),
            reserves: AmountAccumulator::new(),
        }
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}

/// Trade execution rollup: borrowed capital, traded quantities, profits,
/// and categorical usage counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub tenant: TenantId,
    pub last_modified: DateTime<Utc>,
    pub transactions: u64,
    pub borrow: AmountAccumulator,
    pub quantities: AmountAccumulator,
    pub profits: AmountAccumulator,
    pub route_codes: CounterAccumulator<RouteCode>,
    pub currency_usage: CounterAccumulator<SymbolCode>,
    pub executors: CounterAccumulator<AccountId>,
}

impl TenantRecord for TradeRecord {
    fn fresh(tenant: &TenantId) -> Self {
        Self {
            tenant: tenant.clone(),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            transactions: 0,
            borrow: AmountAccumulator::new(),
            quantities: AmountAccumulator::new(),
            profits: AmountAccumulator::new(),
            route_codes: CounterAccumulator::new(),
            currency_usage: CounterAccumulator::new(),
            executors: CounterAccumulator::new(),
        }
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}

/// Gateway swap rollup: per-currency inbound/outbound flows, route usage,
/// savings, and fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayRecord {
    pub tenant: TenantId,
    pub last_modified: DateTime<Utc>,
    pub transactions: u64,
    pub inbound: FlowAccumulator,
    pub outbound: FlowAccumulator,
    pub route_usage: CounterAccumulator<RouteCode>,
    pub savings: AmountAccumulator,
    pub fees: AmountAccumulator,
}

impl TenantRecord for GatewayRecord {
    fn fresh(tenant: &TenantId) -> Self {
        Self {
            tenant: tenant.clone(),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            transactions: 0,
            inbound: FlowAccumulator::new(),
            outbound: FlowAccumulator::new(),
            route_usage: CounterAccumulator::new(),
            savings: AmountAccumulator::new(),
            fees: AmountAccumulator::new(),
        }
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}

/// Relative spot prices derived from a venue's live reserves.
///
/// Replaced wholesale on every refresh; a quote of `0` marks a currency
/// whose tradability could not be confirmed at refresh time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotPriceSnapshot {
    pub tenant: TenantId,
    pub last_modified: DateTime<Utc>,
    pub base: SymbolCode,
    pub quotes: BTreeMap<SymbolCode, f64>,
}

impl SpotPriceSnapshot {
    /// Quote for a currency, 0 when absent.
    #[must_use]
    pub fn quote(&self, code: &SymbolCode) -> f64 {
        self.quotes.get(code).copied().unwrap_or(0.0)
    }
}

impl TenantRecord for SpotPriceSnapshot {
    fn fresh(tenant: &TenantId) -> Self {
        Self {
            tenant: tenant.clone(),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            // Placeholder until the first refresh overwrites the snapshot.
            base: SymbolCode::new("USD").expect("static code is valid"),
            quotes: BTreeMap::new(),
        }
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}
