//! Currency symbol types.
//!
//! A [`SymbolCode`] identifies a fungible asset ("EOS", "USDT"); a [`Symbol`]
//! pairs the code with the precision (fractional digits) of its denomination.
//! Amounts are only summable when both halves match, so the pair travels
//! together everywhere an amount does.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Maximum length of a currency code.
pub const MAX_CODE_LEN: usize = 7;

/// Currency code - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the validating constructor: 1 to 7 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolCode(String);

impl SymbolCode {
    /// Create a new `SymbolCode`, validating the code format.
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        if code.is_empty() || code.len() > MAX_CODE_LEN {
            return Err(DomainError::InvalidSymbolCode {
                code,
                reason: "length must be 1 to 7 characters".into(),
            });
        }
        if !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(DomainError::InvalidSymbolCode {
                code,
                reason: "only uppercase A-Z allowed".into(),
            });
        }
        Ok(Self(code))
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SymbolCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A currency code together with its precision.
///
/// Precision is the number of fractional digits in the asset's denomination
/// (4 for "1.0000 EOS"). Two symbols are equal only when both code and
/// precision agree; the merge algebra leans on this equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    code: SymbolCode,
    precision: u32,
}

impl Symbol {
    /// Create a new `Symbol` from a code and precision.
    #[must_use]
    pub fn new(code: SymbolCode, precision: u32) -> Self {
        Self { code, precision }
    }

    /// The currency code.
    #[must_use]
    pub fn code(&self) -> &SymbolCode {
        &self.code
    }

    /// Fractional digits of the denomination.
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}
