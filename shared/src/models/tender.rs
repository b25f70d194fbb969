//! Tender Model

use serde::{Deserialize, Serialize};

/// A named payment method configured on the merchant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tender {
    pub id: String,
    /// Display label (e.g. "Cash", "Credit Card")
    pub label: String,
    /// Platform label key (e.g. "com.pos.tender.cash")
    pub label_key: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

impl Tender {
    /// Literal cash tender, by label or label key
    pub fn is_cash(&self) -> bool {
        self.label.eq_ignore_ascii_case("cash")
            || self
                .label_key
                .as_deref()
                .is_some_and(|k| k.ends_with(".cash"))
    }

    /// Gift-card tender, by label or label key
    pub fn is_gift_card(&self) -> bool {
        self.label.to_lowercase().contains("gift")
            || self
                .label_key
                .as_deref()
                .is_some_and(|k| k.ends_with(".gift_card"))
    }

    /// Card-like tender eligible for ecommerce routing
    pub fn is_card(&self) -> bool {
        let label = self.label.to_lowercase();
        (label.contains("credit") || label.contains("debit") || label.contains("card"))
            && !self.is_gift_card()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tender(label: &str, key: Option<&str>) -> Tender {
        Tender {
            id: "t1".to_string(),
            label: label.to_string(),
            label_key: key.map(str::to_string),
            enabled: true,
        }
    }

    #[test]
    fn test_cash_by_label() {
        assert!(tender("Cash", None).is_cash());
        assert!(tender("cash", None).is_cash());
        assert!(!tender("Credit Card", None).is_cash());
    }

    #[test]
    fn test_cash_by_label_key() {
        assert!(tender("Efectivo", Some("com.pos.tender.cash")).is_cash());
    }

    #[test]
    fn test_gift_card_detection() {
        assert!(tender("Gift Card", None).is_gift_card());
        assert!(!tender("Credit Card", None).is_gift_card());
    }

    #[test]
    fn test_card_excludes_gift_card() {
        assert!(tender("Credit Card", None).is_card());
        assert!(tender("Debit", None).is_card());
        assert!(!tender("Gift Card", None).is_card());
    }
}
