//! Entity seeding
//!
//! Idempotent upsert of the seed catalog into the sandbox merchant:
//! existing records are matched by name and left alone, missing ones are
//! created. Never deletes, never updates. Safe to run repeatedly.

use std::collections::HashMap;
use std::sync::Arc;

use shared::gateway::{CatalogAdmin, CatalogProvider};
use shared::models::{
    CategoryCreate, CustomerCreate, DiscountCreate, EmployeeCreate, ItemCreate, OrderTypeCreate,
    TaxRateCreate,
};

use crate::core::SimResult;
use crate::data::SeedData;

/// Counts from one seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: u32,
    pub existing: u32,
    pub failed: u32,
}

impl SeedReport {
    fn merge(&mut self, other: SeedReport) {
        self.created += other.created;
        self.existing += other.existing;
        self.failed += other.failed;
    }
}

/// Seeds the sandbox merchant from the local catalog
pub struct EntityGenerator {
    catalog: Arc<dyn CatalogProvider>,
    admin: Arc<dyn CatalogAdmin>,
}

impl EntityGenerator {
    pub fn new(catalog: Arc<dyn CatalogProvider>, admin: Arc<dyn CatalogAdmin>) -> Self {
        Self { catalog, admin }
    }

    /// Run the full upsert. Per-record failures are logged and counted;
    /// only a wholly unreachable platform errors out.
    pub async fn seed(&self, seed: &SeedData) -> SimResult<SeedReport> {
        let mut report = SeedReport::default();

        // Categories first; items reference them by name.
        let mut category_ids: HashMap<String, String> = HashMap::new();
        {
            let existing = self.catalog.categories().await?;
            for c in &existing {
                category_ids.insert(c.name.clone(), c.id.clone());
            }
            let mut sub = SeedReport::default();
            for entry in &seed.categories {
                if category_ids.contains_key(&entry.name) {
                    sub.existing += 1;
                    continue;
                }
                match self
                    .admin
                    .create_category(CategoryCreate {
                        name: entry.name.clone(),
                        sort_order: entry.sort_order,
                    })
                    .await
                {
                    Ok(created) => {
                        category_ids.insert(created.name.clone(), created.id);
                        sub.created += 1;
                    }
                    Err(err) => {
                        tracing::warn!(category = %entry.name, %err, "category create failed");
                        sub.failed += 1;
                    }
                }
            }
            tracing::info!(created = sub.created, existing = sub.existing, "categories seeded");
            report.merge(sub);
        }

        // Tax rates; items reference them by name.
        let mut tax_rate_ids: HashMap<String, String> = HashMap::new();
        {
            let existing = self.catalog.tax_rates().await?;
            for t in &existing {
                tax_rate_ids.insert(t.name.clone(), t.id.clone());
            }
            let mut sub = SeedReport::default();
            for entry in &seed.tax_rates {
                if tax_rate_ids.contains_key(&entry.name) {
                    sub.existing += 1;
                    continue;
                }
                match self
                    .admin
                    .create_tax_rate(TaxRateCreate {
                        name: entry.name.clone(),
                        rate: entry.rate,
                        is_default: entry.is_default,
                    })
                    .await
                {
                    Ok(created) => {
                        tax_rate_ids.insert(created.name.clone(), created.id);
                        sub.created += 1;
                    }
                    Err(err) => {
                        tracing::warn!(tax_rate = %entry.name, %err, "tax rate create failed");
                        sub.failed += 1;
                    }
                }
            }
            tracing::info!(created = sub.created, existing = sub.existing, "tax rates seeded");
            report.merge(sub);
        }

        // Modifier groups; items reference them by name.
        let mut group_ids: HashMap<String, String> = HashMap::new();
        {
            let existing = self.catalog.modifier_groups().await?;
            for g in &existing {
                group_ids.insert(g.name.clone(), g.id.clone());
            }
            let mut sub = SeedReport::default();
            for entry in &seed.modifier_groups {
                if group_ids.contains_key(&entry.name) {
                    sub.existing += 1;
                    continue;
                }
                match self.admin.create_modifier_group(entry.clone()).await {
                    Ok(created) => {
                        group_ids.insert(created.name.clone(), created.id);
                        sub.created += 1;
                    }
                    Err(err) => {
                        tracing::warn!(group = %entry.name, %err, "modifier group create failed");
                        sub.failed += 1;
                    }
                }
            }
            tracing::info!(created = sub.created, existing = sub.existing, "modifier groups seeded");
            report.merge(sub);
        }

        // Items, with name references resolved to platform ids.
        {
            let existing = self.catalog.items().await?;
            let existing_names: Vec<&str> = existing.iter().map(|i| i.name.as_str()).collect();
            let mut sub = SeedReport::default();
            for entry in &seed.items {
                if existing_names.contains(&entry.name.as_str()) {
                    sub.existing += 1;
                    continue;
                }
                let payload = ItemCreate {
                    name: entry.name.clone(),
                    price: entry.price,
                    category_id: entry
                        .category
                        .as_ref()
                        .and_then(|c| category_ids.get(c).cloned()),
                    modifier_group_ids: entry
                        .modifier_groups
                        .iter()
                        .filter_map(|g| group_ids.get(g).cloned())
                        .collect(),
                    tax_rate_ids: entry
                        .tax_rates
                        .iter()
                        .filter_map(|t| tax_rate_ids.get(t).cloned())
                        .collect(),
                };
                match self.admin.create_item(payload).await {
                    Ok(_) => sub.created += 1,
                    Err(err) => {
                        tracing::warn!(item = %entry.name, %err, "item create failed");
                        sub.failed += 1;
                    }
                }
            }
            tracing::info!(created = sub.created, existing = sub.existing, "items seeded");
            report.merge(sub);
        }

        report.merge(self.seed_employees(&seed.employees).await?);
        report.merge(self.seed_customers(&seed.customers).await?);
        report.merge(self.seed_order_types(&seed.order_types).await?);
        report.merge(self.seed_discounts(seed).await?);

        tracing::info!(
            created = report.created,
            existing = report.existing,
            failed = report.failed,
            "seeding complete"
        );
        Ok(report)
    }

    async fn seed_employees(&self, entries: &[EmployeeCreate]) -> SimResult<SeedReport> {
        let existing = self.catalog.employees().await?;
        let names: Vec<&str> = existing.iter().map(|e| e.name.as_str()).collect();
        let mut sub = SeedReport::default();
        for entry in entries {
            if names.contains(&entry.name.as_str()) {
                sub.existing += 1;
                continue;
            }
            match self.admin.create_employee(entry.clone()).await {
                Ok(_) => sub.created += 1,
                Err(err) => {
                    tracing::warn!(employee = %entry.name, %err, "employee create failed");
                    sub.failed += 1;
                }
            }
        }
        tracing::info!(created = sub.created, existing = sub.existing, "employees seeded");
        Ok(sub)
    }

    async fn seed_customers(&self, entries: &[CustomerCreate]) -> SimResult<SeedReport> {
        let existing = self.catalog.customers().await?;
        let names: Vec<String> = existing.iter().map(|c| c.full_name()).collect();
        let mut sub = SeedReport::default();
        for entry in entries {
            let full_name = format!("{} {}", entry.first_name, entry.last_name);
            if names.contains(&full_name) {
                sub.existing += 1;
                continue;
            }
            match self.admin.create_customer(entry.clone()).await {
                Ok(_) => sub.created += 1,
                Err(err) => {
                    tracing::warn!(customer = %full_name, %err, "customer create failed");
                    sub.failed += 1;
                }
            }
        }
        tracing::info!(created = sub.created, existing = sub.existing, "customers seeded");
        Ok(sub)
    }

    async fn seed_order_types(&self, entries: &[OrderTypeCreate]) -> SimResult<SeedReport> {
        let existing = self.catalog.order_types().await?;
        let labels: Vec<&str> = existing.iter().map(|t| t.label.as_str()).collect();
        let mut sub = SeedReport::default();
        for entry in entries {
            if labels.contains(&entry.label.as_str()) {
                sub.existing += 1;
                continue;
            }
            match self.admin.create_order_type(entry.clone()).await {
                Ok(_) => sub.created += 1,
                Err(err) => {
                    tracing::warn!(order_type = %entry.label, %err, "order type create failed");
                    sub.failed += 1;
                }
            }
        }
        tracing::info!(created = sub.created, existing = sub.existing, "order types seeded");
        Ok(sub)
    }

    async fn seed_discounts(&self, seed: &SeedData) -> SimResult<SeedReport> {
        let existing = self.catalog.discount_definitions().await?;
        let names: Vec<&str> = existing.iter().map(|d| d.name.as_str()).collect();
        let mut sub = SeedReport::default();
        for entry in &seed.discounts {
            if names.contains(&entry.name.as_str()) {
                sub.existing += 1;
                continue;
            }
            let payload = DiscountCreate {
                name: entry.name.clone(),
                percentage: entry.percentage,
                amount: entry.amount,
                discount_type: entry.discount_type,
                scope: entry.scope,
                min_order_amount: entry.min_order_amount,
                categories: entry.categories.clone(),
                loyalty_tier: entry.loyalty_tier.clone(),
                active_days: entry.active_days.clone(),
                start_hour: entry.start_hour,
                end_hour: entry.end_hour,
            };
            match self.admin.create_discount(payload).await {
                Ok(_) => sub.created += 1,
                Err(err) => {
                    tracing::warn!(discount = %entry.name, %err, "discount create failed");
                    sub.failed += 1;
                }
            }
        }
        tracing::info!(created = sub.created, existing = sub.existing, "discounts seeded");
        Ok(sub)
    }
}
