//! Venue-agnostic domain logic: amounts, accumulators, records, events.

mod accumulator;
mod amount;
mod event;
mod id;
mod record;
mod symbol;

pub mod error;
pub mod window;

// Core domain types
pub use accumulator::{AmountAccumulator, CounterAccumulator, Flow, FlowAccumulator};
pub use amount::Amount;
pub use event::{Caller, Event};
pub use id::{AccountId, RouteCode, TenantId};
pub use record::{
    FlashRecord, GatewayRecord, SpotPriceSnapshot, TenantRecord, TradeRecord, VolumeRecord,
};
pub use symbol::{Symbol, SymbolCode};
