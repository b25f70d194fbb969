//! Coupon Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Promo-code coupon definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponDefinition {
    pub id: String,
    /// Code the customer presents (e.g. "WELCOME10")
    pub code: String,
    pub name: String,
    /// Whole percentage off
    pub percentage: Option<i64>,
    /// Flat amount off in minor units
    pub amount: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    /// Total redemptions allowed (None = unlimited)
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub times_used: u32,
    /// Minimum order amount in minor units
    pub min_order_amount: Option<i64>,
    /// Restricted to VIP customers
    #[serde(default)]
    pub vip_only: bool,
    /// Active days of week (0=Sunday..6=Saturday, None = every day)
    pub active_days: Option<Vec<u8>>,
    /// Valid hour window start, inclusive
    pub start_hour: Option<u32>,
    /// Valid hour window end, exclusive
    pub end_hour: Option<u32>,
    /// Category names the coupon applies to (empty = all)
    #[serde(default)]
    pub categories: Vec<String>,
}

fn default_active() -> bool {
    true
}
