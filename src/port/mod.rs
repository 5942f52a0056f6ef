//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (the ledger-backed record tables and the liquidity pools).
//!
//! # Available Ports
//!
//! - [`RecordStore`] - Persistence for per-tenant aggregate records
//! - [`LiquidityVenue`] - Read access to a tenant's liquidity reserves

mod liquidity;
mod store;

pub use liquidity::LiquidityVenue;
pub use store::RecordStore;
