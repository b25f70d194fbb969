//! Order Model
//!
//! Payload and response shapes for the platform's order, payment, and
//! refund endpoints. These are wire types; the engine's in-memory order
//! aggregate lives in `sim-engine`.

use serde::{Deserialize, Serialize};

use super::discount::percentage_of;

/// Dining option on an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiningOption {
    #[default]
    Here,
    ToGo,
    Delivery,
}

impl DiningOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiningOption::Here => "HERE",
            DiningOption::ToGo => "TO_GO",
            DiningOption::Delivery => "DELIVERY",
        }
    }

    /// Order-type label conventionally paired with this option
    pub fn order_type_label(&self) -> &'static str {
        match self {
            DiningOption::Here => "Dine In",
            DiningOption::ToGo => "Take Out",
            DiningOption::Delivery => "Delivery",
        }
    }
}

/// Order lifecycle state as the platform tracks it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    #[default]
    Open,
    Paid,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub employee_id: String,
    pub customer_id: Option<String>,
    pub note: Option<String>,
}

/// Order as the platform reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub state: OrderState,
    /// Total in minor units as the platform computed it
    #[serde(default)]
    pub total: i64,
    pub employee_id: Option<String>,
    pub customer_id: Option<String>,
    pub dining_option: Option<DiningOption>,
    pub order_type_id: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// Add line item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemCreate {
    pub item_id: String,
    pub quantity: i32,
    pub note: Option<String>,
}

/// Line item as the platform reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub item_id: String,
    pub name: String,
    /// Unit price in minor units
    pub price: i64,
    pub quantity: i32,
    pub note: Option<String>,
}

/// Attach a modifier to a line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModificationCreate {
    pub line_item_id: String,
    pub modifier_id: String,
    pub name: String,
    /// Price delta in minor units
    pub amount: i64,
}

/// Discount application payload
///
/// The platform reports a zero amount for percentage-only discounts when
/// read back, so every payload carries a pre-computed absolute amount
/// (negative, in minor units). Construct via [`DiscountPayload::from_percentage`]
/// or [`DiscountPayload::from_amount`]; both guarantee the amount is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscountPayload {
    /// Platform discount definition this application references, if any
    pub discount_id: Option<String>,
    pub name: String,
    /// Signed amount in minor units; always negative for a reduction
    pub amount: i64,
    /// Original percentage, carried for reporting only
    pub percentage: Option<i64>,
    /// Line item the discount attaches to (None = order level)
    pub line_item_id: Option<String>,
}

impl DiscountPayload {
    /// Build a payload from a percentage, computing the absolute amount
    /// against `base` locally
    pub fn from_percentage(name: impl Into<String>, percentage: i64, base: i64) -> Self {
        let computed = percentage_of(base.max(0), percentage);
        Self {
            discount_id: None,
            name: name.into(),
            amount: -computed,
            percentage: Some(percentage),
            line_item_id: None,
        }
    }

    /// Build a payload from a flat amount (positive magnitude)
    pub fn from_amount(name: impl Into<String>, amount: i64) -> Self {
        Self {
            discount_id: None,
            name: name.into(),
            amount: -amount.abs(),
            percentage: None,
            line_item_id: None,
        }
    }

    pub fn with_discount_id(mut self, id: impl Into<String>) -> Self {
        self.discount_id = Some(id.into());
        self
    }

    pub fn on_line_item(mut self, line_item_id: impl Into<String>) -> Self {
        self.line_item_id = Some(line_item_id.into());
        self
    }

    /// Magnitude of the reduction in minor units
    pub fn reduction(&self) -> i64 {
        -self.amount
    }

    /// Structural check: a payload must carry a non-zero amount unless it
    /// genuinely discounts nothing, and must never be percentage-only
    pub fn is_structurally_valid(&self) -> bool {
        self.amount != 0 || self.percentage.is_none()
    }
}

/// Service charge application payload (auto-gratuity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceChargePayload {
    pub name: String,
    /// Whole percentage of the subtotal
    pub percentage: i64,
    /// Pre-computed amount in minor units (positive)
    pub amount: i64,
}

impl ServiceChargePayload {
    pub fn from_percentage(name: impl Into<String>, percentage: i64, base: i64) -> Self {
        Self {
            name: name.into(),
            percentage,
            amount: percentage_of(base.max(0), percentage),
        }
    }
}

/// Process payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub tender_id: String,
    /// Amount in minor units, excluding tip and tax
    pub amount: i64,
    pub tip_amount: i64,
    pub tax_amount: i64,
}

/// Payment as the platform reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub order_id: String,
    pub tender_id: String,
    pub amount: i64,
    pub tip_amount: i64,
    pub tax_amount: i64,
}

/// One share of a split payment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SplitShare {
    pub tender_id: String,
    /// Positive whole percentage; shares of one split sum to exactly 100
    pub percentage: i64,
}

/// Refund reason codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundReason {
    CustomerComplaint,
    WrongItem,
    FoodQuality,
    LongWait,
    Other,
}

impl RefundReason {
    pub const ALL: [RefundReason; 5] = [
        RefundReason::CustomerComplaint,
        RefundReason::WrongItem,
        RefundReason::FoodQuality,
        RefundReason::LongWait,
        RefundReason::Other,
    ];
}

/// Create refund payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundCreate {
    pub order_id: String,
    pub payment_id: String,
    /// Amount in minor units; None refunds the payment in full
    pub amount: Option<i64>,
    pub reason: RefundReason,
}

/// Refund as the platform reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRecord {
    pub id: String,
    pub order_id: String,
    pub payment_id: String,
    pub amount: i64,
    pub reason: RefundReason,
}

/// Cash-drawer event recorded alongside cash payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashEvent {
    pub employee_id: Option<String>,
    /// Amount in minor units
    pub amount: i64,
    pub note: Option<String>,
}
