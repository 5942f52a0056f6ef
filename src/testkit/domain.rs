//! Builders for domain primitives used across tests.
//!
//! Concise factory functions so tests focus on assertions rather than
//! construction boilerplate. All of them panic on invalid input, which is
//! the right failure mode inside a test.

use crate::domain::{Amount, RouteCode, SymbolCode, TenantId};

/// Parse a [`TenantId`] from a string.
pub fn tenant(id: &str) -> TenantId {
    TenantId::new(id).expect("test tenant id")
}

/// Parse a [`SymbolCode`] from a string.
pub fn code(s: &str) -> SymbolCode {
    s.parse().expect("test symbol code")
}

/// Parse an [`Amount`] from its canonical form, e.g. `"25.0000 EOS"`.
pub fn amount(s: &str) -> Amount {
    s.parse().expect("test amount")
}

/// Create a [`RouteCode`] from a string.
pub fn route(s: &str) -> RouteCode {
    RouteCode::new(s)
}
