//! Combo Model

use serde::{Deserialize, Serialize};

/// What part of the order a combo discount reduces
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComboAppliesTo {
    /// Sum of all matched items' price × quantity
    MatchingItems,
    /// The N cheapest matched items (N = `cheapest_count`, default all)
    CheapestItems,
    /// The full order item total
    #[default]
    Total,
}

/// One required slot of a combo (a category or an explicit item list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboComponent {
    /// Category name match (e.g. "Entrees")
    pub category: Option<String>,
    /// Explicit item id match, checked when `category` is None or misses
    #[serde(default)]
    pub item_ids: Vec<String>,
    /// How many qualifying line items this slot needs
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Combo bundle definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboDefinition {
    pub id: String,
    pub name: String,
    pub components: Vec<ComboComponent>,
    /// Whole percentage off (e.g. 15 = 15%)
    pub percentage: Option<i64>,
    /// Flat amount off in minor units
    pub amount: Option<i64>,
    #[serde(default)]
    pub applies_to: ComboAppliesTo,
    /// Cap on how many cheapest items participate (CheapestItems only)
    pub cheapest_count: Option<u32>,
    /// Ceiling on the computed discount, in minor units
    pub max_discount_amount: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
