//! Catalog endpoints

use async_trait::async_trait;
use shared::gateway::{CatalogAdmin, CatalogProvider, GatewayResult};
use shared::models::{
    Category, CategoryCreate, ComboDefinition, CouponDefinition, Customer, CustomerCreate,
    Discount, DiscountCreate, Employee, EmployeeCreate, GiftCard, Item, ItemCreate, ModifierGroup,
    ModifierGroupCreate, OrderType, OrderTypeCreate, TaxRate, TaxRateCreate,
};

use crate::PlatformClient;

#[async_trait]
impl CatalogProvider for PlatformClient {
    async fn items(&self) -> GatewayResult<Vec<Item>> {
        Ok(self.http.get_list(&self.path("items")).await?)
    }

    async fn categories(&self) -> GatewayResult<Vec<Category>> {
        Ok(self.http.get_list(&self.path("categories")).await?)
    }

    async fn modifier_groups(&self) -> GatewayResult<Vec<ModifierGroup>> {
        Ok(self.http.get_list(&self.path("modifier_groups")).await?)
    }

    async fn discount_definitions(&self) -> GatewayResult<Vec<Discount>> {
        Ok(self.http.get_list(&self.path("discounts")).await?)
    }

    async fn combo_definitions(&self) -> GatewayResult<Vec<ComboDefinition>> {
        Ok(self.http.get_list(&self.path("combos")).await?)
    }

    async fn coupon_definitions(&self) -> GatewayResult<Vec<CouponDefinition>> {
        Ok(self.http.get_list(&self.path("coupons")).await?)
    }

    async fn tax_rates(&self) -> GatewayResult<Vec<TaxRate>> {
        Ok(self.http.get_list(&self.path("tax_rates")).await?)
    }

    async fn tenders(&self) -> GatewayResult<Vec<shared::models::Tender>> {
        Ok(self.http.get_list(&self.path("tenders")).await?)
    }

    async fn employees(&self) -> GatewayResult<Vec<Employee>> {
        Ok(self.http.get_list(&self.path("employees")).await?)
    }

    async fn customers(&self) -> GatewayResult<Vec<Customer>> {
        Ok(self.http.get_list(&self.path("customers")).await?)
    }

    async fn order_types(&self) -> GatewayResult<Vec<OrderType>> {
        Ok(self.http.get_list(&self.path("order_types")).await?)
    }

    async fn gift_cards(&self) -> GatewayResult<Vec<GiftCard>> {
        Ok(self.http.get_list(&self.path("gift_cards")).await?)
    }
}

#[async_trait]
impl CatalogAdmin for PlatformClient {
    async fn create_category(&self, payload: CategoryCreate) -> GatewayResult<Category> {
        Ok(self.http.post(&self.path("categories"), &payload).await?)
    }

    async fn create_item(&self, payload: ItemCreate) -> GatewayResult<Item> {
        Ok(self.http.post(&self.path("items"), &payload).await?)
    }

    async fn create_modifier_group(
        &self,
        payload: ModifierGroupCreate,
    ) -> GatewayResult<ModifierGroup> {
        Ok(self
            .http
            .post(&self.path("modifier_groups"), &payload)
            .await?)
    }

    async fn create_discount(&self, payload: DiscountCreate) -> GatewayResult<Discount> {
        Ok(self.http.post(&self.path("discounts"), &payload).await?)
    }

    async fn create_tax_rate(&self, payload: TaxRateCreate) -> GatewayResult<TaxRate> {
        Ok(self.http.post(&self.path("tax_rates"), &payload).await?)
    }

    async fn create_employee(&self, payload: EmployeeCreate) -> GatewayResult<Employee> {
        Ok(self.http.post(&self.path("employees"), &payload).await?)
    }

    async fn create_customer(&self, payload: CustomerCreate) -> GatewayResult<Customer> {
        Ok(self.http.post(&self.path("customers"), &payload).await?)
    }

    async fn create_order_type(&self, payload: OrderTypeCreate) -> GatewayResult<OrderType> {
        Ok(self.http.post(&self.path("order_types"), &payload).await?)
    }
}
