//! Typed settlement events.
//!
//! The ledger substrate delivers each emitted event exactly once, already
//! authenticated. Routing is a typed enum rather than name-matched callback
//! dispatch, so an unknown event shape is unrepresentable.

use serde::{Deserialize, Serialize};

use crate::domain::amount::Amount;
use crate::domain::id::{AccountId, RouteCode, TenantId};

/// Authority under which an event is submitted.
///
/// Stats events arrive under the emitting tenant's own authority; the
/// administrative erase requires the operator's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caller {
    /// The tenant itself (the ledger substrate vouches for identity).
    Tenant(TenantId),
    /// The network operator.
    Operator,
}

/// One settled event emitted by an exchange instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// An arbitrage/trade execution settled on a venue.
    TradeSettled {
        tenant: TenantId,
        executor: AccountId,
        borrowed: Amount,
        quantities: Vec<Amount>,
        route_codes: Vec<RouteCode>,
        profit: Amount,
    },

    /// A flash loan was repaid.
    FlashLoanSettled {
        tenant: TenantId,
        receiver: AccountId,
        borrowed: Amount,
        fee: Amount,
        reserve: Amount,
    },

    /// A swap executed against a venue's liquidity.
    SwapSettled {
        tenant: TenantId,
        buyer: AccountId,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    },

    /// A cross-venue gateway swap completed.
    GatewaySwapSettled {
        tenant: TenantId,
        amount_in: Amount,
        amount_out: Amount,
        routes: Vec<RouteCode>,
        savings: Amount,
        fee: Amount,
    },

    /// Administrative removal of every record kept for a tenant.
    TenantErase { tenant: TenantId },
}

impl Event {
    /// The tenant whose records this event mutates.
    #[must_use]
    pub fn tenant(&self) -> &TenantId {
        match self {
            Event::TradeSettled { tenant, .. }
            | Event::FlashLoanSettled { tenant, .. }
            | Event::SwapSettled { tenant, .. }
            | Event::GatewaySwapSettled { tenant, .. }
            | Event::TenantErase { tenant } => tenant,
        }
    }
}
