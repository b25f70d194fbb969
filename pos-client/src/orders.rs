//! Order endpoints

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared::gateway::{GatewayError, GatewayResult, OrderGateway};
use shared::models::{
    DiningOption, DiscountPayload, LineItem, LineItemCreate, ModificationCreate, Order,
    OrderCreate, OrderState, ServiceChargePayload,
};

use crate::PlatformClient;

#[derive(Debug, Deserialize)]
struct TotalResponse {
    total: i64,
}

#[async_trait]
impl OrderGateway for PlatformClient {
    async fn create_order(&self, payload: OrderCreate) -> GatewayResult<Order> {
        Ok(self.http.post(&self.path("orders"), &payload).await?)
    }

    async fn add_line_item(
        &self,
        order_id: &str,
        payload: LineItemCreate,
    ) -> GatewayResult<LineItem> {
        let path = self.path(&format!("orders/{}/line_items", order_id));
        Ok(self.http.post(&path, &payload).await?)
    }

    async fn set_dining_option(
        &self,
        order_id: &str,
        dining_option: DiningOption,
    ) -> GatewayResult<()> {
        let path = self.path(&format!("orders/{}", order_id));
        Ok(self
            .http
            .post_unit(&path, &json!({ "dining_option": dining_option }))
            .await?)
    }

    async fn set_order_type(&self, order_id: &str, order_type_id: &str) -> GatewayResult<()> {
        let path = self.path(&format!("orders/{}", order_id));
        Ok(self
            .http
            .post_unit(&path, &json!({ "order_type_id": order_type_id }))
            .await?)
    }

    async fn add_modification(
        &self,
        order_id: &str,
        payload: ModificationCreate,
    ) -> GatewayResult<()> {
        let path = self.path(&format!(
            "orders/{}/line_items/{}/modifications",
            order_id, payload.line_item_id
        ));
        Ok(self.http.post_unit(&path, &payload).await?)
    }

    async fn apply_discount(&self, order_id: &str, payload: DiscountPayload) -> GatewayResult<()> {
        // The platform drops bare percentages on read-back; refuse to send one.
        if !payload.is_structurally_valid() {
            return Err(GatewayError::InvalidPayload(format!(
                "discount '{}' has a percentage but no computed amount",
                payload.name
            )));
        }
        let path = match &payload.line_item_id {
            Some(line_item_id) => self.path(&format!(
                "orders/{}/line_items/{}/discounts",
                order_id, line_item_id
            )),
            None => self.path(&format!("orders/{}/discounts", order_id)),
        };
        Ok(self.http.post_unit(&path, &payload).await?)
    }

    async fn apply_service_charge(
        &self,
        order_id: &str,
        payload: ServiceChargePayload,
    ) -> GatewayResult<()> {
        let path = self.path(&format!("orders/{}/service_charges", order_id));
        Ok(self.http.post_unit(&path, &payload).await?)
    }

    async fn update_total(&self, order_id: &str, total: i64) -> GatewayResult<()> {
        let path = self.path(&format!("orders/{}", order_id));
        Ok(self.http.post_unit(&path, &json!({ "total": total })).await?)
    }

    async fn update_state(&self, order_id: &str, state: OrderState) -> GatewayResult<()> {
        let path = self.path(&format!("orders/{}", order_id));
        Ok(self.http.post_unit(&path, &json!({ "state": state })).await?)
    }

    async fn get_order(&self, order_id: &str) -> GatewayResult<Order> {
        let path = self.path(&format!("orders/{}", order_id));
        Ok(self.http.get(&path).await?)
    }

    async fn calculate_total(&self, order_id: &str) -> GatewayResult<i64> {
        let path = self.path(&format!("orders/{}/total", order_id));
        let response: TotalResponse = self.http.get(&path).await?;
        Ok(response.total)
    }
}
