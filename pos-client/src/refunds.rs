//! Refund endpoints

use async_trait::async_trait;
use shared::gateway::{GatewayError, GatewayResult, RefundGateway};
use shared::models::{RefundCreate, RefundRecord};

use crate::PlatformClient;

#[async_trait]
impl RefundGateway for PlatformClient {
    async fn create_full_refund(&self, payload: RefundCreate) -> GatewayResult<RefundRecord> {
        let path = self.path(&format!(
            "orders/{}/payments/{}/refunds",
            payload.order_id, payload.payment_id
        ));
        Ok(self.http.post(&path, &payload).await?)
    }

    async fn create_partial_refund(&self, payload: RefundCreate) -> GatewayResult<RefundRecord> {
        if payload.amount.is_none() {
            return Err(GatewayError::InvalidPayload(
                "partial refund requires an amount".to_string(),
            ));
        }
        let path = self.path(&format!(
            "orders/{}/payments/{}/refunds",
            payload.order_id, payload.payment_id
        ));
        Ok(self.http.post(&path, &payload).await?)
    }
}
