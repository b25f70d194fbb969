//! Payment endpoints

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared::gateway::{GatewayError, GatewayResult, PaymentGateway};
use shared::models::{PaymentCreate, PaymentRecord, SplitShare};
use uuid::Uuid;

use crate::PlatformClient;

#[derive(Debug, Deserialize)]
struct ChargeResponse {
    id: String,
}

/// Allocate `total` across shares by percentage, in minor units.
///
/// Every share gets `total * pct / 100` rounded down; the final share
/// absorbs the remainder so the allocations always sum to `total`.
fn allocate(total: i64, shares: &[SplitShare]) -> Vec<i64> {
    let mut amounts = Vec::with_capacity(shares.len());
    let mut allocated = 0;
    for (idx, share) in shares.iter().enumerate() {
        let amount = if idx == shares.len() - 1 {
            total - allocated
        } else {
            total * share.percentage / 100
        };
        allocated += amount;
        amounts.push(amount);
    }
    amounts
}

#[async_trait]
impl PaymentGateway for PlatformClient {
    async fn process_payment(
        &self,
        order_id: &str,
        payload: PaymentCreate,
    ) -> GatewayResult<PaymentRecord> {
        let path = self.path(&format!("orders/{}/payments", order_id));
        Ok(self.http.post(&path, &payload).await?)
    }

    async fn process_split_payment(
        &self,
        order_id: &str,
        total: i64,
        tip_amount: i64,
        tax_amount: i64,
        shares: Vec<SplitShare>,
    ) -> GatewayResult<Vec<PaymentRecord>> {
        if shares.is_empty() {
            return Err(GatewayError::InvalidPayload(
                "split payment requires at least one share".to_string(),
            ));
        }

        let amounts = allocate(total, &shares);
        let tips = allocate(tip_amount, &shares);
        let taxes = allocate(tax_amount, &shares);

        let mut records = Vec::with_capacity(shares.len());
        for (idx, share) in shares.iter().enumerate() {
            let payload = PaymentCreate {
                tender_id: share.tender_id.clone(),
                amount: amounts[idx],
                tip_amount: tips[idx],
                tax_amount: taxes[idx],
            };
            let record = self.process_payment(order_id, payload).await?;
            records.push(record);
        }
        Ok(records)
    }

    async fn process_card_payment_via_ecommerce(
        &self,
        order_id: &str,
        payload: PaymentCreate,
    ) -> GatewayResult<PaymentRecord> {
        let (base_url, api_key) = match (&self.ecommerce_base_url, &self.ecommerce_api_key) {
            (Some(url), Some(key)) => (url.clone(), key.clone()),
            _ => {
                return Err(GatewayError::InvalidPayload(
                    "ecommerce integration is not configured".to_string(),
                ))
            }
        };

        // Tokenize a sandbox test card, then charge the token.
        let ecommerce = crate::ClientConfig::new(base_url, self.merchant_id.clone())
            .with_token(api_key)
            .build_client();
        let token: ChargeResponse = ecommerce
            .http
            .post(
                "v1/tokens",
                &json!({
                    "card": {
                        "number": "4242424242424242",
                        "exp_month": 12,
                        "exp_year": 2030,
                        "cvv": "123",
                    }
                }),
            )
            .await?;
        let charge: ChargeResponse = ecommerce
            .http
            .post(
                "v1/charges",
                &json!({
                    "source": token.id,
                    "amount": payload.amount + payload.tip_amount + payload.tax_amount,
                    "currency": "usd",
                    "idempotency_key": Uuid::new_v4().to_string(),
                }),
            )
            .await?;

        Ok(PaymentRecord {
            id: charge.id,
            order_id: order_id.to_string(),
            tender_id: payload.tender_id,
            amount: payload.amount,
            tip_amount: payload.tip_amount,
            tax_amount: payload.tax_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(percentages: &[i64]) -> Vec<SplitShare> {
        percentages
            .iter()
            .enumerate()
            .map(|(i, p)| SplitShare {
                tender_id: format!("t{}", i),
                percentage: *p,
            })
            .collect()
    }

    #[test]
    fn test_allocate_sums_to_total() {
        let amounts = allocate(1001, &shares(&[33, 33, 34]));
        assert_eq!(amounts.iter().sum::<i64>(), 1001);
    }

    #[test]
    fn test_allocate_even_split() {
        let amounts = allocate(5000, &shares(&[50, 50]));
        assert_eq!(amounts, vec![2500, 2500]);
    }

    #[test]
    fn test_allocate_remainder_on_last() {
        let amounts = allocate(100, &shares(&[33, 33, 34]));
        assert_eq!(amounts, vec![33, 33, 34]);
    }
}
