//! Combo detection and valuation
//!
//! A combo is satisfiable when every component finds enough qualifying
//! line-item units; a line-item unit never counts toward two components.
//! Among satisfiable combos the highest computed discount wins.

use shared::models::{percentage_of, ComboAppliesTo, ComboComponent, ComboDefinition};

use crate::order::SimLineItem;

/// A satisfiable combo with its computed discount
#[derive(Debug)]
pub struct ComboMatch<'a> {
    pub combo: &'a ComboDefinition,
    /// Indices of the matched line items
    pub matched: Vec<usize>,
    /// Computed discount amount in minor units
    pub amount: i64,
}

/// Detect all satisfiable combos and return the highest-value one
pub fn detect_best_combo<'a>(
    combos: &'a [ComboDefinition],
    items: &[SimLineItem],
    item_total: i64,
) -> Option<ComboMatch<'a>> {
    combos
        .iter()
        .filter(|c| c.active)
        .filter_map(|combo| {
            let matched = match_components(combo, items)?;
            let amount = combo_amount(combo, &matched, items, item_total);
            (amount > 0).then_some(ComboMatch {
                combo,
                matched,
                amount,
            })
        })
        .max_by_key(|m| m.amount)
}

fn component_matches(component: &ComboComponent, item: &SimLineItem) -> bool {
    if let Some(category) = &component.category {
        if item
            .category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(category))
        {
            return true;
        }
    }
    component.item_ids.iter().any(|id| *id == item.item_id)
}

/// Greedy allocation of line-item units to components.
///
/// Returns the matched line-item indices, or None when any component
/// cannot fill its quantity.
fn match_components(combo: &ComboDefinition, items: &[SimLineItem]) -> Option<Vec<usize>> {
    let mut remaining: Vec<i64> = items.iter().map(|i| i.quantity).collect();
    let mut matched = Vec::new();

    for component in &combo.components {
        let mut need = i64::from(component.quantity);
        for (idx, item) in items.iter().enumerate() {
            if need == 0 {
                break;
            }
            if remaining[idx] == 0 || !component_matches(component, item) {
                continue;
            }
            let take = need.min(remaining[idx]);
            remaining[idx] -= take;
            need -= take;
            if !matched.contains(&idx) {
                matched.push(idx);
            }
        }
        if need > 0 {
            return None;
        }
    }

    Some(matched)
}

/// Compute a combo's discount amount against its `applies_to` basis,
/// respecting the optional cap
fn combo_amount(
    combo: &ComboDefinition,
    matched: &[usize],
    items: &[SimLineItem],
    item_total: i64,
) -> i64 {
    let basis = match combo.applies_to {
        ComboAppliesTo::MatchingItems => matched
            .iter()
            .map(|idx| items[*idx].unit_price * items[*idx].quantity)
            .sum(),
        ComboAppliesTo::CheapestItems => {
            let mut prices: Vec<i64> = matched
                .iter()
                .map(|idx| items[*idx].unit_price * items[*idx].quantity)
                .collect();
            prices.sort_unstable();
            let take = combo
                .cheapest_count
                .map(|n| n as usize)
                .unwrap_or(prices.len());
            prices.into_iter().take(take).sum()
        }
        ComboAppliesTo::Total => item_total,
    };

    let raw = match (combo.percentage, combo.amount) {
        (Some(pct), _) => percentage_of(basis, pct),
        (None, Some(amount)) => amount,
        (None, None) => 0,
    };

    let capped = match combo.max_discount_amount {
        Some(cap) => raw.min(cap),
        None => raw,
    };
    capped.clamp(0, basis.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, category: &str, price: i64, quantity: i64) -> SimLineItem {
        SimLineItem {
            line_item_id: format!("l-{}", id),
            item_id: id.to_string(),
            name: id.to_string(),
            category: Some(category.to_string()),
            unit_price: price,
            quantity,
            note: None,
            modifier_amount: 0,
            modifier_count: 0,
            tax_rate_ids: vec![],
        }
    }

    fn category_component(category: &str, quantity: u32) -> ComboComponent {
        ComboComponent {
            category: Some(category.to_string()),
            item_ids: vec![],
            quantity,
        }
    }

    fn combo(
        components: Vec<ComboComponent>,
        percentage: Option<i64>,
        amount: Option<i64>,
        applies_to: ComboAppliesTo,
    ) -> ComboDefinition {
        ComboDefinition {
            id: "c1".to_string(),
            name: "Test Combo".to_string(),
            components,
            percentage,
            amount,
            applies_to,
            cheapest_count: None,
            max_discount_amount: None,
            active: true,
        }
    }

    fn meal_items() -> Vec<SimLineItem> {
        vec![
            line("entree", "Entrees", 1499, 1),
            line("side", "Sides", 499, 1),
            line("drink", "Drinks", 299, 1),
        ]
    }

    fn meal_components() -> Vec<ComboComponent> {
        vec![
            category_component("Entrees", 1),
            category_component("Sides", 1),
            category_component("Drinks", 1),
        ]
    }

    #[test]
    fn test_total_basis_percentage() {
        let items = meal_items();
        let combos = [combo(meal_components(), Some(15), None, ComboAppliesTo::Total)];
        let best = detect_best_combo(&combos, &items, 2297).expect("match expected");
        assert_eq!(best.amount, 345);
        assert_eq!(best.matched.len(), 3);
    }

    #[test]
    fn test_matching_items_basis() {
        let mut items = meal_items();
        // Non-combo item inflates the order but not the matched basis
        items.push(line("dessert", "Desserts", 699, 1));
        let combos = [combo(
            meal_components(),
            Some(20),
            None,
            ComboAppliesTo::MatchingItems,
        )];
        let best = detect_best_combo(&combos, &items, 2996).expect("match expected");
        // 20% of 2297, not of 2996
        assert_eq!(best.amount, 459);
    }

    #[test]
    fn test_cheapest_items_basis_with_cap_count() {
        let items = meal_items();
        let mut c = combo(
            meal_components(),
            Some(50),
            None,
            ComboAppliesTo::CheapestItems,
        );
        c.cheapest_count = Some(1);
        let combos = [c];
        let best = detect_best_combo(&combos, &items, 2297).expect("match expected");
        // 50% of the single cheapest matched item (299) = 150 (half-up)
        assert_eq!(best.amount, 150);
    }

    #[test]
    fn test_max_discount_amount_cap() {
        let items = meal_items();
        let mut c = combo(meal_components(), Some(50), None, ComboAppliesTo::Total);
        c.max_discount_amount = Some(400);
        let combos = [c];
        let best = detect_best_combo(&combos, &items, 2297).expect("match expected");
        assert_eq!(best.amount, 400);
    }

    #[test]
    fn test_unsatisfiable_component_rejects_combo() {
        let items = vec![line("entree", "Entrees", 1499, 1), line("side", "Sides", 499, 1)];
        let combos = [combo(meal_components(), Some(15), None, ComboAppliesTo::Total)];
        assert!(detect_best_combo(&combos, &items, 1998).is_none());
    }

    #[test]
    fn test_quantity_satisfies_multi_unit_component() {
        // One line item with quantity 2 fills a 2-unit component
        let items = vec![
            line("wings", "Appetizers", 899, 2),
            line("beer", "Alcohol", 599, 1),
        ];
        let combos = [combo(
            vec![
                category_component("Appetizers", 2),
                category_component("Alcohol", 1),
            ],
            None,
            Some(500),
            ComboAppliesTo::Total,
        )];
        let best = detect_best_combo(&combos, &items, 2397).expect("match expected");
        assert_eq!(best.amount, 500);
    }

    #[test]
    fn test_line_item_unit_never_counts_twice() {
        // Two components both wanting Appetizers: a single 1-quantity item
        // cannot satisfy both
        let items = vec![line("wings", "Appetizers", 899, 1), line("x", "Drinks", 299, 1)];
        let combos = [combo(
            vec![
                category_component("Appetizers", 1),
                category_component("Appetizers", 1),
            ],
            None,
            Some(300),
            ComboAppliesTo::Total,
        )];
        assert!(detect_best_combo(&combos, &items, 1198).is_none());
    }

    #[test]
    fn test_highest_value_combo_wins() {
        let items = meal_items();
        let small = combo(meal_components(), None, Some(200), ComboAppliesTo::Total);
        let mut big = combo(meal_components(), None, Some(450), ComboAppliesTo::Total);
        big.id = "c2".to_string();
        let combos = [small, big];
        let best = detect_best_combo(&combos, &items, 2297).expect("match expected");
        assert_eq!(best.combo.id, "c2");
        assert_eq!(best.amount, 450);
    }

    #[test]
    fn test_explicit_item_id_match() {
        let items = vec![
            line("special-burger", "Entrees", 1299, 1),
            line("side", "Sides", 499, 1),
            line("drink", "Drinks", 299, 1),
        ];
        let combos = [combo(
            vec![
                ComboComponent {
                    category: None,
                    item_ids: vec!["special-burger".to_string()],
                    quantity: 1,
                },
                category_component("Drinks", 1),
            ],
            None,
            Some(250),
            ComboAppliesTo::Total,
        )];
        assert!(detect_best_combo(&combos, &items, 2097).is_some());
    }

    #[test]
    fn test_inactive_combo_ignored() {
        let items = meal_items();
        let mut c = combo(meal_components(), Some(15), None, ComboAppliesTo::Total);
        c.active = false;
        let combos = [c];
        assert!(detect_best_combo(&combos, &items, 2297).is_none());
    }
}
