//! Gift card endpoints

use async_trait::async_trait;
use serde_json::json;
use shared::gateway::{GatewayResult, GiftCardGateway};
use shared::models::{GiftCard, GiftCardRedemption};

use crate::PlatformClient;

#[async_trait]
impl GiftCardGateway for PlatformClient {
    async fn fetch_gift_cards(&self) -> GatewayResult<Vec<GiftCard>> {
        Ok(self.http.get_list(&self.path("gift_cards")).await?)
    }

    async fn redeem_gift_card(
        &self,
        card_id: &str,
        amount: i64,
    ) -> GatewayResult<GiftCardRedemption> {
        let path = self.path(&format!("gift_cards/{}/redeem", card_id));
        Ok(self.http.post(&path, &json!({ "amount": amount })).await?)
    }
}
