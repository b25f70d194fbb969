//! Modifier Model

use serde::{Deserialize, Serialize};

/// A single modifier option (e.g. "Extra Cheese")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    pub id: String,
    pub name: String,
    /// Price delta in minor units (0 for free modifiers)
    #[serde(default)]
    pub price: i64,
}

/// Modifier group attached to items (e.g. "Toppings", "Size")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroup {
    pub id: String,
    pub name: String,
    /// Minimum number of selections the register enforces (0 = optional)
    #[serde(default)]
    pub min_required: u32,
    /// Maximum number of selections (None = unlimited)
    pub max_allowed: Option<u32>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

/// Create modifier group payload (modifiers created inline)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroupCreate {
    pub name: String,
    #[serde(default)]
    pub min_required: u32,
    pub max_allowed: Option<u32>,
    pub modifiers: Vec<ModifierCreate>,
}

/// Create modifier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierCreate {
    pub name: String,
    #[serde(default)]
    pub price: i64,
}
