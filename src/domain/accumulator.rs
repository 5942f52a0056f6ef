//! Keyed accumulators - the merge algebra behind every record.
//!
//! Three shapes cover all record fields:
//!
//! - [`AmountAccumulator`] — currency code → running [`Amount`]
//! - [`CounterAccumulator`] — arbitrary key → running `u64` counter
//! - [`FlowAccumulator`] — currency code → event count + running total
//!
//! Absent keys read as zero and keys are never removed individually; a whole
//! record is either kept or erased.
//!
//! A merge between amounts of the same currency code but diverging precision
//! keeps the stored value and drops the incoming one. This mirrors the
//! behavior observed on the ledger; a stricter policy (failing the event, or
//! keying by code *and* precision) is a deliberate non-change. Absorbed
//! contributions are logged at `warn` so they are at least visible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::amount::Amount;
use crate::domain::symbol::SymbolCode;

/// Running amounts keyed by currency code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountAccumulator(BTreeMap<SymbolCode, Amount>);

impl AmountAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an amount into its own currency slot.
    ///
    /// Absent key inserts; matching symbol adds; mismatched precision keeps
    /// the stored value (see module docs).
    pub fn merge(&mut self, incoming: &Amount) {
        let key = incoming.code().clone();
        match self.0.get(&key) {
            None => {
                self.0.insert(key, incoming.clone());
            }
            Some(existing) => match existing.try_add(incoming) {
                Ok(sum) => {
                    self.0.insert(key, sum);
                }
                Err(err) => {
                    warn!(%key, %err, "absorbed mismatched contribution, keeping stored value");
                }
            },
        }
    }

    /// Replace the slot for the amount's currency wholesale.
    ///
    /// Used for point-in-time figures (flash reserves) that reflect current
    /// rather than cumulative state.
    pub fn replace(&mut self, incoming: &Amount) {
        self.0.insert(incoming.code().clone(), incoming.clone());
    }

    /// Look up the running amount for a currency, if any.
    #[must_use]
    pub fn get(&self, code: &SymbolCode) -> Option<&Amount> {
        self.0.get(code)
    }

    /// Whether any currency has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of currencies recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(code, amount)` entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolCode, &Amount)> {
        self.0.iter()
    }

    /// Reset to empty. Used by the daily-window rollover.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Running counters keyed by `K`.
///
/// Absent keys read as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterAccumulator<K: Ord>(BTreeMap<K, u64>);

impl<K: Ord> Default for CounterAccumulator<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord + Clone> CounterAccumulator<K> {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter for `key` by `by`.
    pub fn bump(&mut self, key: &K, by: u64) {
        *self.0.entry(key.clone()).or_insert(0) += by;
    }

    /// Current count for `key` (0 when absent).
    #[must_use]
    pub fn get(&self, key: &K) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Whether any key has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct keys counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(key, count)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &u64)> {
        self.0.iter()
    }
}

/// Event count plus running total for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub count: u64,
    pub total: Amount,
}

/// Per-currency flow accounting for gateway legs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowAccumulator(BTreeMap<SymbolCode, Flow>);

impl FlowAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event of `incoming`: count + 1, total merged.
    ///
    /// Mismatched-precision totals follow the same absorb policy as
    /// [`AmountAccumulator::merge`].
    pub fn record(&mut self, incoming: &Amount) {
        let key = incoming.code().clone();
        match self.0.get_mut(&key) {
            None => {
                self.0.insert(
                    key,
                    Flow {
                        count: 1,
                        total: incoming.clone(),
                    },
                );
            }
            Some(flow) => {
                flow.count += 1;
                match flow.total.try_add(incoming) {
                    Ok(sum) => flow.total = sum,
                    Err(err) => {
                        warn!(%key, %err, "absorbed mismatched contribution, keeping stored total");
                    }
                }
            }
        }
    }

    /// Look up the flow for a currency, if any.
    #[must_use]
    pub fn get(&self, code: &SymbolCode) -> Option<&Flow> {
        self.0.get(code)
    }

    /// Whether any currency has flowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(code, flow)` entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolCode, &Flow)> {
        self.0.iter()
    }
}
