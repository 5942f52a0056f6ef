//! Domain validation errors for core domain types.
//!
//! Returned by validating constructors and by the strict amount algebra when
//! an invariant is violated.

use thiserror::Error;

use crate::domain::symbol::Symbol;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Amounts are only summable between identical symbols.
    #[error("symbol mismatch: expected {expected}, got {got}")]
    SymbolMismatch {
        /// Symbol of the stored amount.
        expected: Symbol,
        /// Symbol of the incoming amount.
        got: Symbol,
    },

    /// Currency codes are 1-7 uppercase ASCII letters.
    #[error("invalid symbol code '{code}': {reason}")]
    InvalidSymbolCode { code: String, reason: String },

    /// Failed to parse the canonical `"<value> <CODE>"` amount form.
    #[error("failed to parse amount '{input}': {reason}")]
    ParseAmount { input: String, reason: String },

    /// Tenant identifiers cannot be empty.
    #[error("tenant identifier cannot be empty")]
    EmptyTenantId,
}
