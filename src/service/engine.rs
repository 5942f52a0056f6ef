//! Event-driven aggregation engine.
//!
//! One [`StatsEngine`] instance serves the whole network. Each inbound event
//! mutates exactly one tenant's records; events for the same tenant are
//! serialized behind a per-tenant lock while distinct tenants proceed in
//! parallel. The engine holds no background tasks of its own; all work is
//! reactive to inbound events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::{EngineConfig, VolumeMode};
use crate::domain::window;
use crate::domain::{
    AccountId, Amount, Caller, Event, FlashRecord, GatewayRecord, RouteCode, SpotPriceSnapshot,
    TenantId, TradeRecord, VolumeRecord,
};
use crate::error::{AuthError, Error, Result};
use crate::port::{LiquidityVenue, RecordStore};
use crate::service::SpotPriceSnapshotter;

/// The aggregation engine: five event entry points over the record stores.
///
/// Authentication of event sources is the ledger substrate's concern; the
/// engine only enforces the namespace convention on tenant identifiers and
/// operator authority on the administrative erase.
pub struct StatsEngine<V, VS, FS, TS, GS, PS> {
    config: EngineConfig,
    volume: Arc<VS>,
    flash: Arc<FS>,
    trade: Arc<TS>,
    gateway: Arc<GS>,
    spot_store: Arc<PS>,
    snapshotter: SpotPriceSnapshotter<V, PS>,
    locks: DashMap<TenantId, Arc<Mutex<()>>>,
}

impl<V, VS, FS, TS, GS, PS> StatsEngine<V, VS, FS, TS, GS, PS>
where
    V: LiquidityVenue,
    VS: RecordStore<VolumeRecord>,
    FS: RecordStore<FlashRecord>,
    TS: RecordStore<TradeRecord>,
    GS: RecordStore<GatewayRecord>,
    PS: RecordStore<SpotPriceSnapshot>,
{
    /// Create an engine over a liquidity venue and one store per record kind.
    pub fn new(
        config: EngineConfig,
        venue: Arc<V>,
        volume: Arc<VS>,
        flash: Arc<FS>,
        trade: Arc<TS>,
        gateway: Arc<GS>,
        spot_store: Arc<PS>,
    ) -> Self {
        let snapshotter = SpotPriceSnapshotter::new(venue, Arc::clone(&spot_store));
        Self {
            config,
            volume,
            flash,
            trade,
            gateway,
            spot_store,
            snapshotter,
            locks: DashMap::new(),
        }
    }

    /// Handle one authenticated event at the current time.
    pub async fn handle(&self, caller: &Caller, event: Event) -> Result<()> {
        self.handle_at(caller, event, Utc::now()).await
    }

    /// Handle one authenticated event with an explicit timestamp.
    ///
    /// `now` is the ledger time of the emitted event; the daily-window
    /// policy and every `last_modified` field derive from it.
    pub async fn handle_at(&self, caller: &Caller, event: Event, now: DateTime<Utc>) -> Result<()> {
        let tenant = event.tenant().clone();
        let lock = self.tenant_lock(&tenant);
        let _serialized = lock.lock().await;

        let erased = matches!(event, Event::TenantErase { .. });
        let outcome = match event {
            Event::TradeSettled {
                tenant,
                executor,
                borrowed,
                quantities,
                route_codes,
                profit,
            } => {
                self.trade_settled(tenant, executor, borrowed, quantities, route_codes, profit, now)
                    .await
            }
            Event::FlashLoanSettled {
                tenant,
                receiver,
                borrowed,
                fee,
                reserve,
            } => {
                self.flash_loan_settled(tenant, receiver, borrowed, fee, reserve, now)
                    .await
            }
            Event::SwapSettled {
                tenant,
                buyer,
                amount_in,
                amount_out,
                fee,
            } => {
                self.swap_settled(tenant, buyer, amount_in, amount_out, fee, now)
                    .await
            }
            Event::GatewaySwapSettled {
                tenant,
                amount_in,
                amount_out,
                routes,
                savings,
                fee,
            } => {
                self.gateway_swap_settled(tenant, amount_in, amount_out, routes, savings, fee, now)
                    .await
            }
            Event::TenantErase { tenant } => self.erase_tenant(caller, tenant).await,
        };

        if erased && outcome.is_ok() {
            // The tenant's records are gone; drop its lock entry too, unless
            // another event for it is already waiting on the lock (a waiter
            // holds a third Arc clone).
            self.locks
                .remove_if(&tenant, |_, entry| Arc::strong_count(entry) == 2);
        }
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    async fn trade_settled(
        &self,
        tenant: TenantId,
        executor: AccountId,
        borrowed: Amount,
        quantities: Vec<Amount>,
        route_codes: Vec<RouteCode>,
        profit: Amount,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.require_reserved(&tenant)?;
        debug!(%tenant, %executor, %profit, "trade settled");

        self.trade
            .upsert(&tenant, |record| {
                record.transactions += 1;
                record.last_modified = now;
                record.borrow.merge(&borrowed);
                record.profits.merge(&profit);
                for quantity in &quantities {
                    record.quantities.merge(quantity);
                    record.currency_usage.bump(quantity.code(), 1);
                }
                for route in &route_codes {
                    record.route_codes.bump(route, 1);
                }
                record.executors.bump(&executor, 1);
                Ok(())
            })
            .await
    }

    async fn flash_loan_settled(
        &self,
        tenant: TenantId,
        receiver: AccountId,
        borrowed: Amount,
        fee: Amount,
        reserve: Amount,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.require_reserved(&tenant)?;
        debug!(%tenant, %receiver, %borrowed, "flash loan settled");

        self.flash
            .upsert(&tenant, |record| {
                record.transactions += 1;
                record.last_modified = now;
                record.borrow.merge(&borrowed);
                record.fees.merge(&fee);
                // Reserves reflect current liquidity, not a running total.
                record.reserves.replace(&reserve);
                Ok(())
            })
            .await
    }

    async fn swap_settled(
        &self,
        tenant: TenantId,
        buyer: AccountId,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.require_reserved(&tenant)?;
        debug!(%tenant, %buyer, %amount_in, %amount_out, "swap settled");

        let mode = self.config.volume_mode;
        self.volume
            .upsert(&tenant, |record| {
                match mode {
                    VolumeMode::Daily => {
                        // last_modified doubles as the window start; it only
                        // moves when a new UTC day opens.
                        if window::opens_new_window(record.last_modified, now) {
                            record.volume.clear();
                            record.fees.clear();
                            record.last_modified = window::window_start(now);
                        }
                    }
                    VolumeMode::Rolling => record.last_modified = now,
                }
                record.transactions += 1;
                record.volume.merge(&amount_in);
                record.volume.merge(&amount_out);
                record.fees.merge(&fee);
                Ok(())
            })
            .await?;

        // The volume mutation above stands even if the refresh fails; only
        // authorization and precondition faults abort an event wholesale.
        let base = self.config.base_for(&tenant).clone();
        self.snapshotter.refresh(&tenant, &base, now).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn gateway_swap_settled(
        &self,
        tenant: TenantId,
        amount_in: Amount,
        amount_out: Amount,
        routes: Vec<RouteCode>,
        savings: Amount,
        fee: Amount,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.require_unreserved(&tenant)?;
        debug!(%tenant, %amount_in, %amount_out, "gateway swap settled");

        self.gateway
            .upsert(&tenant, |record| {
                record.transactions += 1;
                record.last_modified = now;
                record.inbound.record(&amount_in);
                record.outbound.record(&amount_out);
                for route in &routes {
                    record.route_usage.bump(route, 1);
                }
                record.savings.merge(&savings);
                // Zero-fee events are not fee activity.
                if !fee.is_zero() {
                    record.fees.merge(&fee);
                }
                Ok(())
            })
            .await
    }

    /// Remove every erasable record for a tenant: volume, spot-price, trade.
    ///
    /// Requires operator authority. Fails with [`Error::NothingToErase`]
    /// when the tenant has a record in none of the three kinds; missing from
    /// just one is not an error. When a later erase fails, the kinds erased
    /// before it are written back so no partial erase is observable.
    async fn erase_tenant(&self, caller: &Caller, tenant: TenantId) -> Result<()> {
        if *caller != Caller::Operator {
            return Err(AuthError::OperatorRequired {
                action: "erase tenant records",
            }
            .into());
        }

        let volume = self.volume.get(&tenant).await?;
        let spot = self.spot_store.get(&tenant).await?;
        let trade = self.trade.get(&tenant).await?;
        if volume.is_none() && spot.is_none() && trade.is_none() {
            return Err(Error::NothingToErase { tenant });
        }

        // The per-tenant lock in handle_at keeps this all-or-nothing with
        // respect to concurrent mutations for the same tenant.
        if volume.is_some() {
            self.volume.erase(&tenant).await?;
        }
        if spot.is_some() {
            if let Err(err) = self.spot_store.erase(&tenant).await {
                self.restore_after_aborted_erase(volume, None).await;
                return Err(err);
            }
        }
        if trade.is_some() {
            if let Err(err) = self.trade.erase(&tenant).await {
                self.restore_after_aborted_erase(volume, spot).await;
                return Err(err);
            }
        }
        debug!(%tenant, "erased tenant records");
        Ok(())
    }

    /// Write back records erased before a later erase failed. Best effort:
    /// a failed restore is logged, not propagated, so the original fault
    /// reaches the caller.
    async fn restore_after_aborted_erase(
        &self,
        volume: Option<VolumeRecord>,
        spot: Option<SpotPriceSnapshot>,
    ) {
        if let Some(record) = volume {
            let tenant = record.tenant.clone();
            if let Err(err) = self.volume.put(record).await {
                warn!(%tenant, %err, "volume record lost in aborted erase");
            }
        }
        if let Some(record) = spot {
            let tenant = record.tenant.clone();
            if let Err(err) = self.spot_store.put(record).await {
                warn!(%tenant, %err, "spot snapshot lost in aborted erase");
            }
        }
    }

    fn require_reserved(&self, tenant: &TenantId) -> Result<()> {
        if !tenant.in_namespace(&self.config.reserved_suffix) {
            return Err(AuthError::NamespaceRequired {
                tenant: tenant.clone(),
                suffix: self.config.reserved_suffix.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn require_unreserved(&self, tenant: &TenantId) -> Result<()> {
        if tenant.in_namespace(&self.config.reserved_suffix) {
            return Err(AuthError::NamespaceForbidden {
                tenant: tenant.clone(),
                suffix: self.config.reserved_suffix.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn tenant_lock(&self, tenant: &TenantId) -> Arc<Mutex<()>> {
        self.locks
            .entry(tenant.clone())
            .or_default()
            .clone()
    }
}
