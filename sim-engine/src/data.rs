//! Seed catalog loading
//!
//! Dual-source read: a `SEED_DATA_DIR` file wins when present, otherwise
//! the bundled copy compiled into the binary is used. Each family falls
//! back independently so a data directory can override just one file.

use serde::Deserialize;
use shared::models::{
    ComboDefinition, CouponDefinition, CustomerCreate, Discount, EmployeeCreate,
    ModifierGroupCreate, OrderTypeCreate, TaxRateCreate,
};

use crate::core::SimResult;
use crate::discounts::DefinitionSet;

const BUNDLED_CATEGORIES: &str = include_str!("../data/categories.json");
const BUNDLED_TAX_RATES: &str = include_str!("../data/tax_rates.json");
const BUNDLED_MODIFIER_GROUPS: &str = include_str!("../data/modifier_groups.json");
const BUNDLED_ITEMS: &str = include_str!("../data/items.json");
const BUNDLED_EMPLOYEES: &str = include_str!("../data/employees.json");
const BUNDLED_CUSTOMERS: &str = include_str!("../data/customers.json");
const BUNDLED_ORDER_TYPES: &str = include_str!("../data/order_types.json");
const BUNDLED_DISCOUNTS: &str = include_str!("../data/discounts.json");
const BUNDLED_COMBOS: &str = include_str!("../data/combos.json");
const BUNDLED_COUPONS: &str = include_str!("../data/coupons.json");

/// Category seed entry
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// Item seed entry; references other families by name
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSeed {
    pub name: String,
    /// Price in minor units
    pub price: i64,
    pub category: Option<String>,
    #[serde(default)]
    pub modifier_groups: Vec<String>,
    #[serde(default)]
    pub tax_rates: Vec<String>,
}

/// The full seed catalog
#[derive(Debug, Clone)]
pub struct SeedData {
    pub categories: Vec<CategorySeed>,
    pub tax_rates: Vec<TaxRateCreate>,
    pub modifier_groups: Vec<ModifierGroupCreate>,
    pub items: Vec<ItemSeed>,
    pub employees: Vec<EmployeeCreate>,
    pub customers: Vec<CustomerCreate>,
    pub order_types: Vec<OrderTypeCreate>,
    pub discounts: Vec<Discount>,
    pub combos: Vec<ComboDefinition>,
    pub coupons: Vec<CouponDefinition>,
}

fn load_family<T: serde::de::DeserializeOwned>(
    dir: Option<&str>,
    file: &str,
    bundled: &str,
) -> SimResult<Vec<T>> {
    if let Some(dir) = dir {
        let path = std::path::Path::new(dir).join(file);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            return Ok(serde_json::from_str(&content)?);
        }
    }
    Ok(serde_json::from_str(bundled)?)
}

impl SeedData {
    /// Load the seed catalog, preferring files in `dir` over the bundled
    /// copies
    pub fn load(dir: Option<&str>) -> SimResult<Self> {
        Ok(Self {
            categories: load_family(dir, "categories.json", BUNDLED_CATEGORIES)?,
            tax_rates: load_family(dir, "tax_rates.json", BUNDLED_TAX_RATES)?,
            modifier_groups: load_family(dir, "modifier_groups.json", BUNDLED_MODIFIER_GROUPS)?,
            items: load_family(dir, "items.json", BUNDLED_ITEMS)?,
            employees: load_family(dir, "employees.json", BUNDLED_EMPLOYEES)?,
            customers: load_family(dir, "customers.json", BUNDLED_CUSTOMERS)?,
            order_types: load_family(dir, "order_types.json", BUNDLED_ORDER_TYPES)?,
            discounts: load_family(dir, "discounts.json", BUNDLED_DISCOUNTS)?,
            combos: load_family(dir, "combos.json", BUNDLED_COMBOS)?,
            coupons: load_family(dir, "coupons.json", BUNDLED_COUPONS)?,
        })
    }

    /// Bundled catalog only
    pub fn bundled() -> SimResult<Self> {
        Self::load(None)
    }

    /// Definitions the resolver falls back to when the platform has none
    pub fn fallback_definitions(&self) -> DefinitionSet {
        DefinitionSet {
            discounts: self.discounts.clone(),
            combos: self.combos.clone(),
            coupons: self.coupons.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_catalog_parses() {
        let seed = SeedData::bundled().expect("bundled seed data must parse");
        assert!(!seed.categories.is_empty());
        assert!(!seed.items.is_empty());
        assert!(!seed.employees.is_empty());
        assert!(!seed.discounts.is_empty());
        assert!(!seed.combos.is_empty());
        assert!(!seed.coupons.is_empty());
    }

    #[test]
    fn test_item_references_resolve() {
        let seed = SeedData::bundled().unwrap();
        let categories: Vec<&str> = seed.categories.iter().map(|c| c.name.as_str()).collect();
        let groups: Vec<&str> = seed.modifier_groups.iter().map(|g| g.name.as_str()).collect();
        let rates: Vec<&str> = seed.tax_rates.iter().map(|t| t.name.as_str()).collect();

        for item in &seed.items {
            if let Some(category) = &item.category {
                assert!(categories.contains(&category.as_str()), "item {}", item.name);
            }
            for group in &item.modifier_groups {
                assert!(groups.contains(&group.as_str()), "item {}", item.name);
            }
            for rate in &item.tax_rates {
                assert!(rates.contains(&rate.as_str()), "item {}", item.name);
            }
        }
    }

    #[test]
    fn test_dir_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"[{{ "name": "Override Only" }}]"#).unwrap();

        let seed = SeedData::load(dir.path().to_str()).unwrap();
        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.categories[0].name, "Override Only");
        // Families without an override still come from the bundle
        assert!(!seed.items.is_empty());
    }

    #[test]
    fn test_fallback_definitions_nonempty() {
        let seed = SeedData::bundled().unwrap();
        let defs = seed.fallback_definitions();
        assert!(!defs.discounts.is_empty());
        assert!(!defs.combos.is_empty());
        assert!(!defs.coupons.is_empty());
    }
}
