//! Cash drawer endpoints

use async_trait::async_trait;
use shared::gateway::{CashDrawerGateway, GatewayResult};
use shared::models::CashEvent;

use crate::PlatformClient;

#[async_trait]
impl CashDrawerGateway for PlatformClient {
    async fn record_cash_payment(&self, event: CashEvent) -> GatewayResult<()> {
        Ok(self.http.post_unit(&self.path("cash_events"), &event).await?)
    }
}
