//! Day orchestration
//!
//! Drives a full simulated day: precondition checks, per-period order
//! generation in chronological order, the refund pass, and the summary.
//! Per-order failures never abort a batch; only fatal preconditions and
//! structural errors propagate.

use rand::rngs::StdRng;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use shared::gateway::{AuditSink, CatalogProvider};

use crate::assembler::{AssemblyOutcome, OrderAssembler};
use crate::catalog::{CatalogSnapshot, DefinitionStore};
use crate::core::SimResult;
use crate::discounts::DiscountResolver;
use crate::periods::MealPeriodScheduler;
use crate::refunds::{RefundProcessor, RefundTarget};
use crate::stats::DailyStatistics;

/// Result of one orchestrated run
#[derive(Debug)]
pub struct RunSummary {
    pub business_date: String,
    pub stats: DailyStatistics,
}

/// Drives the simulation for whole days or on-demand batches
pub struct DayOrchestrator {
    catalog: Arc<dyn CatalogProvider>,
    definitions: DefinitionStore,
    assembler: OrderAssembler,
    refunds: RefundProcessor,
    audit: Arc<dyn AuditSink>,
    scheduler: MealPeriodScheduler,
    refund_percentage: u32,
}

impl DayOrchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        definitions: DefinitionStore,
        assembler: OrderAssembler,
        refunds: RefundProcessor,
        audit: Arc<dyn AuditSink>,
        scheduler: MealPeriodScheduler,
        refund_percentage: u32,
    ) -> Self {
        Self {
            catalog,
            definitions,
            assembler,
            refunds,
            audit,
            scheduler,
            refund_percentage,
        }
    }

    /// Simulate one realistic day of orders
    pub async fn run_day(&self, rng: &mut StdRng, date: NaiveDate) -> SimResult<RunSummary> {
        let business_date = date.format("%Y-%m-%d").to_string();

        let snapshot = CatalogSnapshot::load(self.catalog.as_ref()).await?;
        snapshot.ensure_preconditions()?;

        let resolver = DiscountResolver::new(self.definitions.definition_set().await);

        let total = self.scheduler.order_count_for_date(rng, date);
        let allocation = self.scheduler.distribute_orders_by_period(total);
        tracing::info!(date = %business_date, total, "starting simulated day");
        for (period, count) in &allocation {
            tracing::info!(period = period.label(), count, "period allocation");
        }

        let mut stats = DailyStatistics::default();
        let mut refund_targets: Vec<RefundTarget> = Vec::new();

        for (period, count) in allocation {
            let profile = self.scheduler.profile(period);
            let mut times: Vec<_> = (0..count)
                .map(|_| self.scheduler.generate_order_time(rng, date, period))
                .collect();
            times.sort();

            for placed_at in times {
                let outcome = self
                    .assembler
                    .assemble(rng, &snapshot, &resolver, profile, placed_at, &business_date)
                    .await;
                self.record(outcome, &mut stats, &mut refund_targets);
            }
        }

        self.refunds
            .process_batch(rng, &refund_targets, self.refund_percentage, &mut stats)
            .await;

        self.finish(&business_date, stats).await
    }

    /// Generate a fixed number of orders right now, periods drawn by
    /// weight instead of a realistic-day schedule
    pub async fn run_on_demand(&self, rng: &mut StdRng, count: u32) -> SimResult<RunSummary> {
        let now = chrono::Utc::now();
        let business_date = now.format("%Y-%m-%d").to_string();

        let snapshot = CatalogSnapshot::load(self.catalog.as_ref()).await?;
        snapshot.ensure_preconditions()?;

        let resolver = DiscountResolver::new(self.definitions.definition_set().await);
        tracing::info!(count, "starting on-demand generation");

        let mut stats = DailyStatistics::default();
        let mut refund_targets: Vec<RefundTarget> = Vec::new();

        for _ in 0..count {
            let period = self.scheduler.weighted_random_period(rng);
            let profile = self.scheduler.profile(period);
            let outcome = self
                .assembler
                .assemble(rng, &snapshot, &resolver, profile, now, &business_date)
                .await;
            self.record(outcome, &mut stats, &mut refund_targets);
        }

        self.refunds
            .process_batch(rng, &refund_targets, self.refund_percentage, &mut stats)
            .await;

        self.finish(&business_date, stats).await
    }

    fn record(
        &self,
        outcome: AssemblyOutcome,
        stats: &mut DailyStatistics,
        refund_targets: &mut Vec<RefundTarget>,
    ) {
        match outcome {
            AssemblyOutcome::Paid { order, payment } => {
                if let Some(first) = payment.records.first() {
                    refund_targets.push(RefundTarget {
                        order_id: order.id.clone(),
                        payment: first.clone(),
                    });
                }
                stats.record_order(&order, &payment);
            }
            AssemblyOutcome::Abandoned => stats.record_abandoned(),
            AssemblyOutcome::Failed => stats.record_failed(),
        }
    }

    async fn finish(&self, business_date: &str, stats: DailyStatistics) -> SimResult<RunSummary> {
        stats.emit_summary(business_date);
        if let Err(err) = self
            .audit
            .generate_daily_summary(business_date, json!(&stats))
            .await
        {
            tracing::debug!(%err, "daily summary mirror failed");
        }
        Ok(RunSummary {
            business_date: business_date.to_string(),
            stats,
        })
    }
}
