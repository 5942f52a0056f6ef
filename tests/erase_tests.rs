//! Administrative tenant-erase behavior.

mod support;

use std::sync::Arc;

use dexstats::adapter::MemoryRecordStore;
use dexstats::config::EngineConfig;
use dexstats::domain::{Caller, Event, TenantId, TenantRecord};
use dexstats::error::{AuthError, Error, Result};
use dexstats::port::RecordStore;
use dexstats::service::StatsEngine;
use dexstats::testkit::domain::{amount, tenant};
use dexstats::testkit::venue::ScriptedVenue;

fn erase(t: &TenantId) -> Event {
    Event::TenantErase { tenant: t.clone() }
}

async fn settle_flash(h: &support::Harness, t: &TenantId) {
    let event = Event::FlashLoanSettled {
        tenant: t.clone(),
        receiver: "borrower".into(),
        borrowed: amount("10.0000 EOS"),
        fee: amount("0.0100 EOS"),
        reserve: amount("5.0000 EOS"),
    };
    h.engine
        .handle(&Caller::Tenant(t.clone()), event)
        .await
        .unwrap();
}

async fn settle_swap(h: &support::Harness, t: &TenantId) {
    let event = Event::SwapSettled {
        tenant: t.clone(),
        buyer: "buyer".into(),
        amount_in: amount("10.0000 EOS"),
        amount_out: amount("26.0000 USDT"),
        fee: amount("0.0250 EOS"),
    };
    h.engine
        .handle(&Caller::Tenant(t.clone()), event)
        .await
        .unwrap();
}

#[tokio::test]
async fn erase_requires_operator_authority() {
    let h = support::harness();
    let t = tenant("swap.sx");
    settle_swap(&h, &t).await;

    let result = h
        .engine
        .handle(&Caller::Tenant(t.clone()), erase(&t))
        .await;
    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::OperatorRequired { .. }))
    ));

    // Nothing was removed.
    assert!(h.volume.get(&t).await.unwrap().is_some());
}

#[tokio::test]
async fn erase_removes_all_erasable_kinds() {
    let h = support::harness();
    let t = tenant("swap.sx");
    settle_swap(&h, &t).await;

    assert!(h.volume.get(&t).await.unwrap().is_some());
    assert!(h.spot.get(&t).await.unwrap().is_some());

    h.engine.handle(&Caller::Operator, erase(&t)).await.unwrap();

    assert!(h.volume.get(&t).await.unwrap().is_none());
    assert!(h.spot.get(&t).await.unwrap().is_none());
    assert!(h.trade.get(&t).await.unwrap().is_none());
}

#[tokio::test]
async fn erase_succeeds_with_a_record_in_only_one_kind() {
    let h = support::harness();
    let t = tenant("swap.sx");

    // Plant only a spot-price snapshot.
    use dexstats::domain::SpotPriceSnapshot;
    h.spot
        .put(SpotPriceSnapshot::fresh(&t))
        .await
        .unwrap();

    h.engine.handle(&Caller::Operator, erase(&t)).await.unwrap();
    assert!(h.spot.get(&t).await.unwrap().is_none());
}

#[tokio::test]
async fn erase_with_no_records_is_a_precondition_fault() {
    let h = support::harness();
    let t = tenant("ghost.sx");

    let result = h.engine.handle(&Caller::Operator, erase(&t)).await;
    assert!(matches!(result, Err(Error::NothingToErase { .. })));
}

/// Store whose erase always fails, for the partial-erase recovery path.
struct StuckStore<R: TenantRecord> {
    inner: MemoryRecordStore<R>,
}

impl<R: TenantRecord> RecordStore<R> for StuckStore<R> {
    async fn upsert<F>(&self, tenant: &TenantId, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut R) -> Result<()> + Send,
    {
        self.inner.upsert(tenant, mutate).await
    }

    async fn put(&self, record: R) -> Result<()> {
        self.inner.put(record).await
    }

    async fn get(&self, tenant: &TenantId) -> Result<Option<R>> {
        self.inner.get(tenant).await
    }

    async fn erase(&self, _tenant: &TenantId) -> Result<bool> {
        Err(Error::Collaborator("store unavailable".into()))
    }
}

#[tokio::test]
async fn failed_erase_restores_already_erased_kinds() {
    dexstats::testkit::init_logging();

    let volume = Arc::new(MemoryRecordStore::new());
    let spot = Arc::new(MemoryRecordStore::new());
    let trade = Arc::new(StuckStore {
        inner: MemoryRecordStore::new(),
    });
    let engine = StatsEngine::new(
        EngineConfig::default(),
        Arc::new(ScriptedVenue::new()),
        Arc::clone(&volume),
        Arc::new(MemoryRecordStore::new()),
        Arc::clone(&trade),
        Arc::new(MemoryRecordStore::new()),
        Arc::clone(&spot),
    );

    let t = tenant("swap.sx");
    let swap = Event::SwapSettled {
        tenant: t.clone(),
        buyer: "buyer".into(),
        amount_in: amount("10.0000 EOS"),
        amount_out: amount("26.0000 USDT"),
        fee: amount("0.0250 EOS"),
    };
    engine.handle(&Caller::Tenant(t.clone()), swap).await.unwrap();
    let trade_event = Event::TradeSettled {
        tenant: t.clone(),
        executor: "executor1".into(),
        borrowed: amount("1.0000 EOS"),
        quantities: vec![],
        route_codes: vec![],
        profit: amount("0.1000 EOS"),
    };
    engine
        .handle(&Caller::Tenant(t.clone()), trade_event)
        .await
        .unwrap();

    let volume_before = volume.get(&t).await.unwrap().unwrap();

    // Volume and spot erase first; the trade erase fails.
    let result = engine.handle(&Caller::Operator, erase(&t)).await;
    assert!(matches!(result, Err(Error::Collaborator(_))));

    let volume_after = volume.get(&t).await.unwrap().unwrap();
    assert_eq!(volume_after.transactions, volume_before.transactions);
    assert!(spot.get(&t).await.unwrap().is_some());
    assert!(trade.get(&t).await.unwrap().is_some());
}

#[tokio::test]
async fn erase_leaves_flash_and_gateway_records_alone() {
    let h = support::harness();
    let t = tenant("flash.sx");
    settle_flash(&h, &t).await;
    settle_swap(&h, &t).await;

    h.engine.handle(&Caller::Operator, erase(&t)).await.unwrap();

    // Flash is not one of the three erasable kinds.
    assert!(h.flash.get(&t).await.unwrap().is_some());
    assert!(h.volume.get(&t).await.unwrap().is_none());
}
