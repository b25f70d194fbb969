//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category (e.g. "Entrees", "Drinks")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Sort position on the merchant's menu
    #[serde(default)]
    pub sort_order: i32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
}
