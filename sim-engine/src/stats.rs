//! Daily statistics accumulator
//!
//! One value per run, threaded through the orchestrator by reference and
//! returned with the summary. Never global state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::order::SimulatedOrder;
use crate::payments::{PaymentKind, PaymentOutcome};

/// Per-period rollup
#[derive(Debug, Clone, Default, Serialize)]
pub struct PeriodStats {
    pub orders: u32,
    /// Revenue in minor units (subtotal + tax + tip + service charge)
    pub revenue: i64,
}

/// Accumulated statistics for one simulation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct DailyStatistics {
    pub orders_generated: u32,
    pub orders_abandoned: u32,
    pub orders_failed: u32,

    /// Totals in minor units
    pub revenue_total: i64,
    pub subtotal_total: i64,
    pub tax_total: i64,
    pub tip_total: i64,
    pub service_charge_total: i64,
    pub discount_total: i64,
    pub modifier_total: i64,

    pub by_period: BTreeMap<String, PeriodStats>,
    pub by_dining_option: BTreeMap<String, u32>,
    pub by_discount_kind: BTreeMap<String, u32>,
    pub by_order_type: BTreeMap<String, u32>,

    pub split_payments: u32,
    pub cash_payments: u32,
    pub gift_card_payments: u32,
    /// Gift-card value redeemed, in minor units
    pub gift_card_redeemed: i64,

    pub refunds: u32,
    /// Refunded value, in minor units
    pub refund_total: i64,
}

impl DailyStatistics {
    /// Record one completed order and its payment outcome
    pub fn record_order(&mut self, order: &SimulatedOrder, payment: &PaymentOutcome) {
        self.orders_generated += 1;

        let revenue = order.subtotal + order.tax + order.tip + order.service_charge;
        self.revenue_total += revenue;
        self.subtotal_total += order.subtotal;
        self.tax_total += order.tax;
        self.tip_total += order.tip;
        self.service_charge_total += order.service_charge;
        self.modifier_total += order.modifier_amount();

        let period = self.by_period.entry(order.period.label().to_string()).or_default();
        period.orders += 1;
        period.revenue += revenue;

        *self
            .by_dining_option
            .entry(order.dining_option.as_str().to_string())
            .or_default() += 1;

        if let Some(discount) = &order.discount {
            self.discount_total += discount.payload.reduction();
            *self
                .by_discount_kind
                .entry(discount.kind.label().to_string())
                .or_default() += 1;
        }

        if let Some(order_type) = &order.order_type_label {
            *self.by_order_type.entry(order_type.clone()).or_default() += 1;
        }

        match payment.kind {
            PaymentKind::Split => self.split_payments += 1,
            PaymentKind::GiftCard | PaymentKind::GiftCardSplit => {
                self.gift_card_payments += 1;
            }
            PaymentKind::Single => {}
        }
        if payment.used_cash {
            self.cash_payments += 1;
        }
        self.gift_card_redeemed += payment.gift_card_amount;
    }

    pub fn record_abandoned(&mut self) {
        self.orders_abandoned += 1;
    }

    pub fn record_failed(&mut self) {
        self.orders_failed += 1;
    }

    pub fn record_refund(&mut self, amount: i64) {
        self.refunds += 1;
        self.refund_total += amount;
    }

    /// Log the end-of-run summary
    pub fn emit_summary(&self, business_date: &str) {
        tracing::info!(
            date = business_date,
            orders = self.orders_generated,
            abandoned = self.orders_abandoned,
            failed = self.orders_failed,
            revenue = self.revenue_total,
            discounts = self.discount_total,
            tips = self.tip_total,
            refunds = self.refunds,
            refunded = self.refund_total,
            "simulation run complete"
        );
        for (period, stats) in &self.by_period {
            tracing::info!(period, orders = stats.orders, revenue = stats.revenue, "period totals");
        }
        for (kind, count) in &self.by_discount_kind {
            tracing::info!(kind, count, "discounts applied");
        }
    }
}
