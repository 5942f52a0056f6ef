//! Dexstats - Running-statistics aggregation for a multi-tenant DEX network.
//!
//! This crate ingests settled trade, flash-loan, and gateway-swap events
//! emitted by independent exchange instances ("tenants") and maintains
//! continuously-updated per-tenant rollups: volume, fees, profits, borrow
//! totals, transaction counts, and categorical usage counters, plus
//! periodically refreshed spot-price snapshots derived from each tenant's
//! live liquidity reserves.
//!
//! # Architecture
//!
//! Hexagonal: the engine consumes two ports and owns nothing external.
//!
//! - **`domain`** - Strict currency algebra and record shapes
//!   - `Amount` - decimal quantity tagged by symbol; mismatches never coerce
//!   - `AmountAccumulator` / `CounterAccumulator` / `FlowAccumulator` -
//!     the merge algebra behind every record
//!   - `window` - UTC daily-window rollover for windowed volume
//!
//! - **`port`** - External collaborators as traits
//!   - `RecordStore` - keyed per-tenant tables with an atomic upsert contract
//!   - `LiquidityVenue` - tradable listings and reserve pairs
//!
//! - **`service`** - `StatsEngine` (the five event handlers) and
//!   `SpotPriceSnapshotter`
//!
//! - **`adapter`** - `MemoryRecordStore`, the reference store implementation
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files with engine policy
//! - [`domain`] - Tenant-agnostic types: amounts, accumulators, records, events
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for stores and liquidity venues
//! - [`adapter`] - Port implementations
//! - [`service`] - Event handling and spot-price refresh
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dexstats::adapter::MemoryRecordStore;
//! use dexstats::config::EngineConfig;
//! use dexstats::service::StatsEngine;
//! # use dexstats::testkit::venue::ScriptedVenue;
//!
//! let engine = StatsEngine::new(
//!     EngineConfig::default(),
//!     Arc::new(ScriptedVenue::new()),
//!     Arc::new(MemoryRecordStore::new()),
//!     Arc::new(MemoryRecordStore::new()),
//!     Arc::new(MemoryRecordStore::new()),
//!     Arc::new(MemoryRecordStore::new()),
//!     Arc::new(MemoryRecordStore::new()),
//! );
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
