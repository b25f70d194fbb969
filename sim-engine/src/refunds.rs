//! Refund processing
//!
//! After a batch of orders, a configured percentage is refunded in full
//! or in part. Every refund attempt is independent; failures are logged
//! and never abort the batch.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use shared::gateway::{AuditSink, RefundGateway};
use shared::models::{PaymentRecord, RefundCreate, RefundReason};

use crate::stats::DailyStatistics;
use crate::util::random::{chance, choose_distinct};

/// Probability a selected order is refunded in full (vs. partially)
pub const FULL_REFUND_GATE: u32 = 60;
/// Partial refunds take this percentage range of the first payment
pub const PARTIAL_REFUND_RANGE: (i64, i64) = (25, 75);

/// A refundable order: its id and first payment
#[derive(Debug, Clone)]
pub struct RefundTarget {
    pub order_id: String,
    pub payment: PaymentRecord,
}

/// Selects and executes refunds over a completed batch
pub struct RefundProcessor {
    refunds: Arc<dyn RefundGateway>,
    audit: Arc<dyn AuditSink>,
}

impl RefundProcessor {
    pub fn new(refunds: Arc<dyn RefundGateway>, audit: Arc<dyn AuditSink>) -> Self {
        Self { refunds, audit }
    }

    /// How many of `order_count` orders get refunded
    pub fn refund_count(order_count: usize, refund_percentage: u32) -> usize {
        let count = (order_count * refund_percentage as usize).div_ceil(100);
        count.min(order_count)
    }

    /// Refund a random selection from the batch
    pub async fn process_batch(
        &self,
        rng: &mut StdRng,
        targets: &[RefundTarget],
        refund_percentage: u32,
        stats: &mut DailyStatistics,
    ) {
        let count = Self::refund_count(targets.len(), refund_percentage);
        if count == 0 {
            return;
        }
        let selected: Vec<RefundTarget> = choose_distinct(rng, targets, count)
            .into_iter()
            .cloned()
            .collect();
        tracing::info!(selected = selected.len(), total = targets.len(), "refund pass");

        for target in selected {
            let reason = *RefundReason::ALL.choose(rng).unwrap_or(&RefundReason::Other);
            let full = chance(rng, FULL_REFUND_GATE);

            let result = if full {
                self.refunds
                    .create_full_refund(RefundCreate {
                        order_id: target.order_id.clone(),
                        payment_id: target.payment.id.clone(),
                        amount: None,
                        reason,
                    })
                    .await
            } else {
                let percent =
                    rng.gen_range(PARTIAL_REFUND_RANGE.0..=PARTIAL_REFUND_RANGE.1);
                let amount = target.payment.amount * percent / 100;
                self.refunds
                    .create_partial_refund(RefundCreate {
                        order_id: target.order_id.clone(),
                        payment_id: target.payment.id.clone(),
                        amount: Some(amount),
                        reason,
                    })
                    .await
            };

            match result {
                Ok(record) => {
                    stats.record_refund(record.amount);
                    if let Err(err) = self.audit.mark_refunded(&target.order_id).await {
                        tracing::debug!(order_id = %target.order_id, %err,
                            "audit refund mark failed");
                    }
                }
                Err(err) => {
                    tracing::warn!(order_id = %target.order_id, %err, "refund failed");
                }
            }
        }
    }
}
