//! Order Type Model

use serde::{Deserialize, Serialize};

/// Merchant order type (e.g. "Dine In", "Take Out", "Delivery")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderType {
    pub id: String,
    pub label: String,
}

/// Create order type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTypeCreate {
    pub label: String,
}
