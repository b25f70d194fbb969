//! Gift Card Model

use serde::{Deserialize, Serialize};

/// Gift card as tracked by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: String,
    #[serde(default)]
    pub active: bool,
    /// Remaining balance in minor units
    pub balance: i64,
}

/// Result of a redemption attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GiftCardRedemption {
    pub success: bool,
    /// Amount actually taken off the card, in minor units
    pub amount_redeemed: i64,
    /// Balance left on the card after redemption
    pub remaining_balance: i64,
    /// Requested amount not covered by the card (0 when fully covered)
    pub shortfall: i64,
}
