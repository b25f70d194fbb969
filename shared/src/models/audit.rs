//! Audit Mirror Models
//!
//! Read-only local mirrors of simulated activity. The canonical records
//! live on the external platform; these exist for diagnostics only.

use serde::{Deserialize, Serialize};

use super::order::{DiningOption, RefundReason};

/// Mirror of one simulated order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedOrderAudit {
    pub order_id: String,
    /// Business date (YYYY-MM-DD)
    pub business_date: String,
    /// Meal period label (e.g. "DINNER")
    pub period: String,
    pub dining_option: DiningOption,
    pub order_type_id: Option<String>,
    pub employee_id: String,
    pub customer_id: Option<String>,
    pub party_size: u32,
    pub subtotal: i64,
    pub tax: i64,
    pub tip: i64,
    pub service_charge: i64,
    /// Discount waterfall step label when one applied (e.g. "COMBO")
    pub discount_kind: Option<String>,
    pub discount_amount: i64,
    pub modifier_count: u32,
    pub modifier_amount: i64,
    #[serde(default)]
    pub refunded: bool,
}

/// Mirror of one simulated payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedPaymentAudit {
    pub order_id: String,
    pub payment_id: String,
    pub tender_id: String,
    pub tender_label: String,
    pub amount: i64,
    pub tip_amount: i64,
    /// Share of a split payment; None for single-tender payments
    pub split_percentage: Option<i64>,
    #[serde(default)]
    pub gift_card: bool,
    pub refund_reason: Option<RefundReason>,
}
