//! In-memory simulated order aggregate
//!
//! Transient state owned by one assembly pass. Once the order is paid the
//! canonical record belongs to the platform; this mirror only feeds
//! statistics and the audit sink.

use shared::models::{Customer, DiningOption, PaymentRecord, SimulatedOrderAudit};

use crate::discounts::AppliedDiscount;
use crate::periods::MealPeriod;

/// Customer as sampled for one simulation, with ephemeral loyalty inputs
#[derive(Debug, Clone)]
pub struct SimCustomer {
    pub customer: Customer,
    /// Randomized per-simulation visit count (0-60)
    pub visit_count: u32,
    /// Randomized per-simulation VIP flag (5%)
    pub vip: bool,
}

/// One line item as tracked locally
#[derive(Debug, Clone)]
pub struct SimLineItem {
    /// Platform line-item id
    pub line_item_id: String,
    pub item_id: String,
    pub name: String,
    pub category: Option<String>,
    /// Unit price in minor units
    pub unit_price: i64,
    pub quantity: i64,
    pub note: Option<String>,
    /// Total of successfully attached modifiers, in minor units
    pub modifier_amount: i64,
    pub modifier_count: u32,
    /// Tax rates assigned to the underlying item
    pub tax_rate_ids: Vec<String>,
}

impl SimLineItem {
    /// price × quantity plus attached modifiers
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity + self.modifier_amount
    }
}

/// Transient order aggregate built during simulation
#[derive(Debug, Clone)]
pub struct SimulatedOrder {
    /// Identifier assigned by the platform
    pub id: String,
    pub employee_id: String,
    pub customer: Option<SimCustomer>,
    pub dining_option: DiningOption,
    pub order_type_id: Option<String>,
    pub order_type_label: Option<String>,
    pub period: MealPeriod,
    pub party_size: u32,
    pub placed_at: chrono::DateTime<chrono::Utc>,
    pub items: Vec<SimLineItem>,
    /// At most one discount, resolved by the waterfall
    pub discount: Option<AppliedDiscount>,
    /// Item total minus discount, in minor units
    pub subtotal: i64,
    pub tax: i64,
    pub tip: i64,
    /// Auto-gratuity amount; non-zero only for large parties
    pub service_charge: i64,
    pub payments: Vec<PaymentRecord>,
}

impl SimulatedOrder {
    pub fn new(
        id: String,
        employee_id: String,
        customer: Option<SimCustomer>,
        period: MealPeriod,
    ) -> Self {
        Self {
            id,
            employee_id,
            customer,
            dining_option: DiningOption::default(),
            order_type_id: None,
            order_type_label: None,
            period,
            party_size: 1,
            placed_at: chrono::Utc::now(),
            items: Vec::new(),
            discount: None,
            subtotal: 0,
            tax: 0,
            tip: 0,
            service_charge: 0,
            payments: Vec::new(),
        }
    }

    /// Sum of line totals before any discount
    pub fn item_total(&self) -> i64 {
        self.items.iter().map(SimLineItem::line_total).sum()
    }

    /// Total of all attached modifiers
    pub fn modifier_amount(&self) -> i64 {
        self.items.iter().map(|i| i.modifier_amount).sum()
    }

    pub fn modifier_count(&self) -> u32 {
        self.items.iter().map(|i| i.modifier_count).sum()
    }

    /// Amount the payment must settle: subtotal + tax (tip rides on the
    /// payment record, service charge is collected by the platform)
    pub fn amount_due(&self) -> i64 {
        self.subtotal + self.tax
    }

    /// Audit mirror of this order
    pub fn audit_record(&self, business_date: &str) -> SimulatedOrderAudit {
        SimulatedOrderAudit {
            order_id: self.id.clone(),
            business_date: business_date.to_string(),
            period: self.period.label().to_string(),
            dining_option: self.dining_option,
            order_type_id: self.order_type_id.clone(),
            employee_id: self.employee_id.clone(),
            customer_id: self.customer.as_ref().map(|c| c.customer.id.clone()),
            party_size: self.party_size,
            subtotal: self.subtotal,
            tax: self.tax,
            tip: self.tip,
            service_charge: self.service_charge,
            discount_kind: self.discount.as_ref().map(|d| d.kind.label().to_string()),
            discount_amount: self
                .discount
                .as_ref()
                .map(|d| d.payload.reduction())
                .unwrap_or(0),
            modifier_count: self.modifier_count(),
            modifier_amount: self.modifier_amount(),
            refunded: false,
        }
    }
}
