//! Discount Model

use serde::{Deserialize, Serialize};

/// Discount classification used by the resolver waterfall
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Valid only inside a time window (happy hour specials)
    TimeBased,
    /// Tied to a loyalty tier
    Loyalty,
    /// Applies to a single eligible line item
    LineItem,
    /// Unlocked by a minimum order amount
    Threshold,
    /// Plain catalog discount with no structured eligibility
    #[default]
    Standard,
}

/// What a discount reduces when applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountScope {
    /// Reduce the whole order total
    #[default]
    Order,
    /// Reduce matching line items only
    Item,
}

/// Discount definition as stored on the platform
///
/// Exactly one of `percentage` / `amount` is normally set. The platform is
/// known to report a zero amount for percentage-only discounts on read-back,
/// so application payloads always carry a locally computed amount; see
/// [`crate::models::order::DiscountPayload`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub id: String,
    pub name: String,
    /// Whole percentage (e.g. 15 = 15% off)
    pub percentage: Option<i64>,
    /// Flat amount in minor units (positive magnitude)
    pub amount: Option<i64>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub scope: DiscountScope,
    /// Minimum order amount in minor units (threshold discounts)
    pub min_order_amount: Option<i64>,
    /// Category names the discount applies to (empty = all)
    #[serde(default)]
    pub categories: Vec<String>,
    /// Loyalty tier name this discount is reserved for (loyalty discounts)
    pub loyalty_tier: Option<String>,
    /// Active days of week (0=Sunday..6=Saturday, None = every day)
    pub active_days: Option<Vec<u8>>,
    /// Window start hour, inclusive (time-based discounts)
    pub start_hour: Option<u32>,
    /// Window end hour, exclusive (time-based discounts)
    pub end_hour: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Discount {
    /// Compute this discount's value against a base amount, in minor units.
    ///
    /// Flat amounts win over percentages when both are present. Percentage
    /// amounts round half-up. The result is clamped to the base so a
    /// discount can never exceed what it reduces.
    pub fn value_against(&self, base: i64) -> i64 {
        let raw = match (self.amount, self.percentage) {
            (Some(amount), _) => amount,
            (None, Some(pct)) => percentage_of(base, pct),
            (None, None) => 0,
        };
        raw.clamp(0, base.max(0))
    }
}

/// Round-half-up percentage of an amount in minor units
pub fn percentage_of(base: i64, percentage: i64) -> i64 {
    (base * percentage + 50) / 100
}

/// Create discount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCreate {
    pub name: String,
    pub percentage: Option<i64>,
    pub amount: Option<i64>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub scope: DiscountScope,
    pub min_order_amount: Option<i64>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub loyalty_tier: Option<String>,
    pub active_days: Option<Vec<u8>>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
}
