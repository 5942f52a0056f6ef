//! Tagged currency amounts with strict addition.
//!
//! An [`Amount`] is a decimal quantity tagged by a [`Symbol`]. Addition is
//! only defined between amounts whose symbols match exactly (code and
//! precision); anything else is a [`DomainError::SymbolMismatch`], never a
//! silent coercion.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::symbol::{Symbol, SymbolCode};

/// A decimal quantity of a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    value: Decimal,
    symbol: Symbol,
}

impl Amount {
    /// Create a new `Amount`.
    #[must_use]
    pub fn new(value: Decimal, symbol: Symbol) -> Self {
        Self { value, symbol }
    }

    /// The zero amount of a given symbol.
    #[must_use]
    pub fn zero(symbol: Symbol) -> Self {
        Self::new(Decimal::ZERO, symbol)
    }

    /// The numeric value.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// The tagging symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// The currency code of the tagging symbol.
    #[must_use]
    pub fn code(&self) -> &SymbolCode {
        self.symbol.code()
    }

    /// Whether the numeric value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Add another amount of the identical symbol.
    ///
    /// Fails with [`DomainError::SymbolMismatch`] when either the currency
    /// code or the precision differs.
    pub fn try_add(&self, other: &Amount) -> Result<Amount, DomainError> {
        if self.symbol != other.symbol {
            return Err(DomainError::SymbolMismatch {
                expected: self.symbol.clone(),
                got: other.symbol.clone(),
            });
        }
        Ok(Amount::new(self.value + other.value, self.symbol.clone()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision() as usize;
        write!(
            f,
            "{:.*} {}",
            precision,
            self.value.round_dp(self.symbol.precision()),
            self.symbol.code()
        )
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    /// Parse the canonical string form, e.g. `"25.0000 EOS"`.
    ///
    /// The precision is inferred from the number of fractional digits in the
    /// numeric part (`"25.0000 EOS"` is precision 4, `"3 EOS"` precision 0).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: &str| DomainError::ParseAmount {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (num, code) = s
            .split_once(' ')
            .ok_or_else(|| parse_err("expected '<value> <CODE>'"))?;
        let value = Decimal::from_str(num).map_err(|_| parse_err("invalid decimal value"))?;
        let precision = num
            .split_once('.')
            .map_or(0, |(_, frac)| frac.len() as u32);
        let code = SymbolCode::new(code)?;
        Ok(Amount::new(value, Symbol::new(code, precision)))
    }
}
