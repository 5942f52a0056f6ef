//! Shared harness for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use dexstats::adapter::MemoryRecordStore;
use dexstats::config::EngineConfig;
use dexstats::domain::{
    FlashRecord, GatewayRecord, SpotPriceSnapshot, TradeRecord, VolumeRecord,
};
use dexstats::service::StatsEngine;
use dexstats::testkit::venue::ScriptedVenue;

pub type TestEngine = StatsEngine<
    ScriptedVenue,
    MemoryRecordStore<VolumeRecord>,
    MemoryRecordStore<FlashRecord>,
    MemoryRecordStore<TradeRecord>,
    MemoryRecordStore<GatewayRecord>,
    MemoryRecordStore<SpotPriceSnapshot>,
>;

/// An engine wired to scripted collaborators, with handles kept for
/// scripting and assertions.
pub struct Harness {
    pub venue: Arc<ScriptedVenue>,
    pub volume: Arc<MemoryRecordStore<VolumeRecord>>,
    pub flash: Arc<MemoryRecordStore<FlashRecord>>,
    pub trade: Arc<MemoryRecordStore<TradeRecord>>,
    pub gateway: Arc<MemoryRecordStore<GatewayRecord>>,
    pub spot: Arc<MemoryRecordStore<SpotPriceSnapshot>>,
    pub engine: TestEngine,
}

pub fn harness() -> Harness {
    harness_with(EngineConfig::default())
}

pub fn harness_with(config: EngineConfig) -> Harness {
    dexstats::testkit::init_logging();

    let venue = Arc::new(ScriptedVenue::new());
    let volume = Arc::new(MemoryRecordStore::new());
    let flash = Arc::new(MemoryRecordStore::new());
    let trade = Arc::new(MemoryRecordStore::new());
    let gateway = Arc::new(MemoryRecordStore::new());
    let spot = Arc::new(MemoryRecordStore::new());

    let engine = StatsEngine::new(
        config,
        Arc::clone(&venue),
        Arc::clone(&volume),
        Arc::clone(&flash),
        Arc::clone(&trade),
        Arc::clone(&gateway),
        Arc::clone(&spot),
    );

    Harness {
        venue,
        volume,
        flash,
        trade,
        gateway,
        spot,
        engine,
    }
}
