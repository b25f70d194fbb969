//! Tax Rate Model

use serde::{Deserialize, Serialize};

/// Tax rate as stored on the platform
///
/// `rate` is in basis-point units where 1% = 10,000 (so 8.25% = 82,500).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: String,
    pub name: String,
    /// Rate where 1% = 10,000 units
    pub rate: i64,
    #[serde(default)]
    pub is_default: bool,
}

impl TaxRate {
    /// Tax on an amount in minor units, rounded half-up
    pub fn tax_on(&self, amount: i64) -> i64 {
        (amount * self.rate + 500_000) / 1_000_000
    }
}

/// Create tax rate payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRateCreate {
    pub name: String,
    pub rate: i64,
    #[serde(default)]
    pub is_default: bool,
}
