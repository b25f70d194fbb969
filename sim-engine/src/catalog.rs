//! Catalog snapshot and definition store
//!
//! The orchestrator prefetches the merchant catalog once per run; the
//! definition store layers the TTL cache and the JSON fallback over the
//! discount/combo/coupon reads.

use std::collections::HashMap;
use std::sync::Arc;

use shared::gateway::{CatalogProvider, GatewayResult};
use shared::models::{
    Category, Customer, Employee, GiftCard, Item, ModifierGroup, OrderType, TaxRate, Tender,
};

use crate::cache::DefinitionCache;
use crate::core::{SimError, SimResult};
use crate::discounts::DefinitionSet;

/// Immutable catalog view for one simulation run
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub items: Vec<Item>,
    pub categories: Vec<Category>,
    pub modifier_groups: HashMap<String, ModifierGroup>,
    pub tax_rates: HashMap<String, TaxRate>,
    pub tenders: Vec<Tender>,
    pub employees: Vec<Employee>,
    pub customers: Vec<Customer>,
    pub order_types: Vec<OrderType>,
    pub gift_cards: Vec<GiftCard>,
}

impl CatalogSnapshot {
    /// Prefetch everything the assembler samples from
    pub async fn load(provider: &dyn CatalogProvider) -> GatewayResult<Self> {
        let items = provider
            .items()
            .await?
            .into_iter()
            .filter(|i| !i.hidden)
            .collect();
        let modifier_groups = provider
            .modifier_groups()
            .await?
            .into_iter()
            .map(|g| (g.id.clone(), g))
            .collect();
        let tax_rates = provider
            .tax_rates()
            .await?
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();
        let tenders = provider
            .tenders()
            .await?
            .into_iter()
            .filter(|t| t.enabled)
            .collect();

        Ok(Self {
            items,
            categories: provider.categories().await?,
            modifier_groups,
            tax_rates,
            tenders,
            employees: provider.employees().await?,
            customers: provider.customers().await?,
            order_types: provider.order_types().await?,
            gift_cards: provider.gift_cards().await?,
        })
    }

    /// Fatal preconditions: a run cannot start without items, employees,
    /// and tenders
    pub fn ensure_preconditions(&self) -> SimResult<()> {
        if self.items.is_empty() {
            return Err(SimError::Precondition(
                "no items available; seed the catalog before simulating".to_string(),
            ));
        }
        if self.employees.is_empty() {
            return Err(SimError::Precondition(
                "no employees available; seed the catalog before simulating".to_string(),
            ));
        }
        if self.tenders.is_empty() {
            return Err(SimError::Precondition(
                "no tenders configured on the merchant".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cached, fallback-backed reads of discount/combo/coupon definitions
///
/// Prefers the live platform; any family the platform cannot serve (error
/// or empty) falls back to the local seed definitions.
pub struct DefinitionStore {
    provider: Arc<dyn CatalogProvider>,
    fallback: DefinitionSet,
    cache: DefinitionCache<DefinitionSet>,
}

impl DefinitionStore {
    pub fn new(provider: Arc<dyn CatalogProvider>, fallback: DefinitionSet) -> Self {
        Self {
            provider,
            fallback,
            cache: DefinitionCache::default(),
        }
    }

    /// The definition set the resolver runs against
    pub async fn definition_set(&self) -> DefinitionSet {
        let provider = Arc::clone(&self.provider);
        let fallback = self.fallback.clone();
        let loaded = self
            .cache
            .get_or_load("definitions", || async move {
                let discounts = match provider.discount_definitions().await {
                    Ok(list) if !list.is_empty() => list,
                    Ok(_) => fallback.discounts.clone(),
                    Err(err) => {
                        tracing::warn!(%err, "discount definitions unavailable, using seed data");
                        fallback.discounts.clone()
                    }
                };
                let combos = match provider.combo_definitions().await {
                    Ok(list) if !list.is_empty() => list,
                    Ok(_) => fallback.combos.clone(),
                    Err(err) => {
                        tracing::warn!(%err, "combo definitions unavailable, using seed data");
                        fallback.combos.clone()
                    }
                };
                let coupons = match provider.coupon_definitions().await {
                    Ok(list) if !list.is_empty() => list,
                    Ok(_) => fallback.coupons.clone(),
                    Err(err) => {
                        tracing::warn!(%err, "coupon definitions unavailable, using seed data");
                        fallback.coupons.clone()
                    }
                };
                Ok(DefinitionSet {
                    discounts,
                    combos,
                    coupons,
                })
            })
            .await;

        // The loader never errors; the match above converts every failure
        // into a fallback read.
        loaded.unwrap_or_else(|_| self.fallback.clone())
    }

    /// Force the next read to hit the platform again
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}
