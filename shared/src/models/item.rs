//! Item Model

use serde::{Deserialize, Serialize};

/// Menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Price in minor units
    pub price: i64,
    /// Category the item is filed under (platform reference)
    pub category_id: Option<String>,
    /// Category name snapshot (resolved by the catalog read)
    pub category_name: Option<String>,
    /// Modifier groups attached to this item
    #[serde(default)]
    pub modifier_group_ids: Vec<String>,
    /// Tax rates assigned to this item
    #[serde(default)]
    pub tax_rate_ids: Vec<String>,
    /// Hidden items never show on the register and are skipped by selection
    #[serde(default)]
    pub hidden: bool,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    /// Price in minor units
    pub price: i64,
    pub category_id: Option<String>,
    #[serde(default)]
    pub modifier_group_ids: Vec<String>,
    #[serde(default)]
    pub tax_rate_ids: Vec<String>,
}
