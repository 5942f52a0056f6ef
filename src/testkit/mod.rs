//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`venue`] — Scripted [`LiquidityVenue`](crate::port::LiquidityVenue)
//!   implementation with per-tenant listings and reserve pairs.
//! - [`domain`] — Builders for domain primitives: tenants, amounts, symbols.

pub mod domain;
pub mod venue;

/// Initialize a compact tracing subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
