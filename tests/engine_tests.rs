//! End-to-end tests for the event handlers.

mod support;

use dexstats::domain::{Caller, Event};
use dexstats::error::{AuthError, Error};
use dexstats::port::RecordStore;
use dexstats::testkit::domain::{amount, code, route, tenant};
use rust_decimal_macros::dec;

fn caller(id: &str) -> Caller {
    Caller::Tenant(tenant(id))
}

#[tokio::test]
async fn trade_settled_accumulates_quantities_by_currency() {
    let h = support::harness();
    let t = tenant("basic.sx");

    let event = Event::TradeSettled {
        tenant: t.clone(),
        executor: "executor1".into(),
        borrowed: amount("100.0000 EOS"),
        quantities: vec![
            amount("3.0000 EOS"),
            amount("2.0000 EOS"),
            amount("1.0000 USDT"),
        ],
        route_codes: vec![route("defibox"), route("dfs")],
        profit: amount("0.5000 EOS"),
    };
    h.engine.handle(&caller("basic.sx"), event).await.unwrap();

    let record = h.trade.get(&t).await.unwrap().unwrap();
    assert_eq!(record.transactions, 1);
    assert_eq!(record.quantities.get(&code("EOS")).unwrap().value(), dec!(5));
    assert_eq!(
        record.quantities.get(&code("USDT")).unwrap().value(),
        dec!(1)
    );
    assert_eq!(record.currency_usage.get(&code("EOS")), 2);
    assert_eq!(record.currency_usage.get(&code("USDT")), 1);
    assert_eq!(record.route_codes.get(&route("defibox")), 1);
    assert_eq!(record.executors.get(&"executor1".into()), 1);
    assert_eq!(record.borrow.get(&code("EOS")).unwrap().value(), dec!(100));
    assert_eq!(
        record.profits.get(&code("EOS")).unwrap().value(),
        dec!(0.5)
    );
}

#[tokio::test]
async fn trade_settled_rejects_tenant_outside_namespace() {
    let h = support::harness();

    let event = Event::TradeSettled {
        tenant: tenant("intruder"),
        executor: "executor1".into(),
        borrowed: amount("100.0000 EOS"),
        quantities: vec![],
        route_codes: vec![],
        profit: amount("0.5000 EOS"),
    };
    let result = h.engine.handle(&caller("intruder"), event).await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::NamespaceRequired { .. }))
    ));
    assert!(h.trade.get(&tenant("intruder")).await.unwrap().is_none());
}

#[tokio::test]
async fn flash_loan_sums_borrow_but_replaces_reserves() {
    let h = support::harness();
    let t = tenant("flash.sx");

    for (borrowed, reserve) in [
        ("2500.0000 EOS", "900.0000 EOS"),
        ("1000.0000 EOS", "850.0000 EOS"),
    ] {
        let event = Event::FlashLoanSettled {
            tenant: t.clone(),
            receiver: "borrower".into(),
            borrowed: amount(borrowed),
            fee: amount("0.1250 EOS"),
            reserve: amount(reserve),
        };
        h.engine.handle(&caller("flash.sx"), event).await.unwrap();
    }

    let record = h.flash.get(&t).await.unwrap().unwrap();
    assert_eq!(record.transactions, 2);
    assert_eq!(record.borrow.get(&code("EOS")).unwrap().value(), dec!(3500));
    assert_eq!(record.fees.get(&code("EOS")).unwrap().value(), dec!(0.25));
    // Reserves are point-in-time, not cumulative.
    assert_eq!(
        record.reserves.get(&code("EOS")).unwrap().value(),
        dec!(850)
    );
}

#[tokio::test]
async fn gateway_swap_counts_flows_and_routes() {
    let h = support::harness();
    let t = tenant("gateway");

    for _ in 0..2 {
        let event = Event::GatewaySwapSettled {
            tenant: t.clone(),
            amount_in: amount("10.0000 EOS"),
            amount_out: amount("26.0000 USDT"),
            routes: vec![route("defibox")],
            savings: amount("0.0100 USDT"),
            fee: amount("0.0500 USDT"),
        };
        h.engine.handle(&caller("gateway"), event).await.unwrap();
    }

    let record = h.gateway.get(&t).await.unwrap().unwrap();
    assert_eq!(record.transactions, 2);

    let inbound = record.inbound.get(&code("EOS")).unwrap();
    assert_eq!(inbound.count, 2);
    assert_eq!(inbound.total.value(), dec!(20));

    let outbound = record.outbound.get(&code("USDT")).unwrap();
    assert_eq!(outbound.count, 2);
    assert_eq!(outbound.total.value(), dec!(52));

    assert_eq!(record.route_usage.get(&route("defibox")), 2);
    assert_eq!(record.fees.get(&code("USDT")).unwrap().value(), dec!(0.1));
}

#[tokio::test]
async fn gateway_zero_fee_creates_no_fee_key() {
    let h = support::harness();
    let t = tenant("gateway");

    let event = Event::GatewaySwapSettled {
        tenant: t.clone(),
        amount_in: amount("10.0000 EOS"),
        amount_out: amount("26.0000 USDT"),
        routes: vec![],
        savings: amount("0.0100 USDT"),
        fee: amount("0.0000 FOO"),
    };
    h.engine.handle(&caller("gateway"), event).await.unwrap();

    let record = h.gateway.get(&t).await.unwrap().unwrap();
    assert!(record.fees.get(&code("FOO")).is_none());
}

#[tokio::test]
async fn gateway_rejects_tenant_inside_namespace() {
    let h = support::harness();

    let event = Event::GatewaySwapSettled {
        tenant: tenant("swap.sx"),
        amount_in: amount("10.0000 EOS"),
        amount_out: amount("26.0000 USDT"),
        routes: vec![],
        savings: amount("0.0100 USDT"),
        fee: amount("0.0500 USDT"),
    };
    let result = h.engine.handle(&caller("swap.sx"), event).await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::NamespaceForbidden { .. }))
    ));
    assert!(h.gateway.get(&tenant("swap.sx")).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_events_keep_per_tenant_totals_exact() {
    let h = support::harness();
    let engine = std::sync::Arc::new(h.engine);

    // 16 in-flight flash loans per tenant, two tenants racing each other.
    let mut tasks = tokio::task::JoinSet::new();
    for id in ["one.sx", "two.sx"] {
        for _ in 0..16 {
            let engine = std::sync::Arc::clone(&engine);
            let t = tenant(id);
            tasks.spawn(async move {
                let event = Event::FlashLoanSettled {
                    tenant: t.clone(),
                    receiver: "borrower".into(),
                    borrowed: amount("1.0000 EOS"),
                    fee: amount("0.0100 EOS"),
                    reserve: amount("5.0000 EOS"),
                };
                engine.handle(&Caller::Tenant(t), event).await
            });
        }
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }

    for id in ["one.sx", "two.sx"] {
        let record = h.flash.get(&tenant(id)).await.unwrap().unwrap();
        assert_eq!(record.transactions, 16);
        assert_eq!(record.borrow.get(&code("EOS")).unwrap().value(), dec!(16));
        assert_eq!(record.fees.get(&code("EOS")).unwrap().value(), dec!(0.16));
    }
}

#[tokio::test]
async fn tenants_accumulate_independently() {
    let h = support::harness();

    for id in ["one.sx", "two.sx"] {
        let event = Event::FlashLoanSettled {
            tenant: tenant(id),
            receiver: "borrower".into(),
            borrowed: amount("10.0000 EOS"),
            fee: amount("0.0100 EOS"),
            reserve: amount("5.0000 EOS"),
        };
        h.engine.handle(&caller(id), event).await.unwrap();
    }

    let one = h.flash.get(&tenant("one.sx")).await.unwrap().unwrap();
    let two = h.flash.get(&tenant("two.sx")).await.unwrap().unwrap();
    assert_eq!(one.transactions, 1);
    assert_eq!(two.transactions, 1);
    assert_eq!(one.borrow.get(&code("EOS")).unwrap().value(), dec!(10));
}
