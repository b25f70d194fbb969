//! Payment routing
//!
//! Decides how an order settles: gift-card redemption (full or partial),
//! split tender, or single tender with a cash bias for small totals. All
//! random decisions flow through the injected RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use shared::gateway::{CashDrawerGateway, GatewayResult, GiftCardGateway, PaymentGateway};
use shared::models::{
    CashEvent, DiningOption, GiftCard, PaymentCreate, PaymentRecord, SplitShare, Tender,
};

use crate::order::SimulatedOrder;
use crate::util::random::{chance, choose_distinct, split_percentages};

/// Gate for attempting gift-card payment
pub const GIFT_CARD_GATE: u32 = 10;
/// Split-payment gate for dine-in parties of 2+
pub const SPLIT_GATE_DINE_IN: u32 = 25;
/// Split-payment gate for everything else
pub const SPLIT_GATE_DEFAULT: u32 = 5;
/// Cash-bias gate for small orders
pub const CASH_BIAS_GATE: u32 = 40;
/// Subtotal ceiling (minor units) under which the cash bias applies
pub const CASH_BIAS_CEILING: i64 = 2000;
/// Most tenders a split will ever involve
pub const MAX_SPLIT_TENDERS: usize = 4;

/// How an order was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Single,
    Split,
    GiftCard,
    GiftCardSplit,
}

/// Result of routing one order's payment
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub kind: PaymentKind,
    pub records: Vec<PaymentRecord>,
    /// Gift-card value redeemed, in minor units
    pub gift_card_amount: i64,
    pub used_cash: bool,
}

/// Routes order settlement across the payment gateways
pub struct PaymentRouter {
    payments: Arc<dyn PaymentGateway>,
    gift_cards: Arc<dyn GiftCardGateway>,
    cash_drawer: Arc<dyn CashDrawerGateway>,
    ecommerce_enabled: bool,
}

impl PaymentRouter {
    pub fn new(
        payments: Arc<dyn PaymentGateway>,
        gift_cards: Arc<dyn GiftCardGateway>,
        cash_drawer: Arc<dyn CashDrawerGateway>,
        ecommerce_enabled: bool,
    ) -> Self {
        Self {
            payments,
            gift_cards,
            cash_drawer,
            ecommerce_enabled,
        }
    }

    /// Settle an order. A returned error means no payment landed and the
    /// order should be abandoned; partial gift-card failures fall back to
    /// ordinary routing instead of erroring.
    pub async fn settle(
        &self,
        rng: &mut StdRng,
        order: &SimulatedOrder,
        tenders: &[Tender],
        gift_cards: &[GiftCard],
    ) -> GatewayResult<PaymentOutcome> {
        let due = order.amount_due();

        if chance(rng, GIFT_CARD_GATE) {
            if let Some(outcome) = self
                .try_gift_card(rng, order, tenders, gift_cards, due)
                .await
            {
                return Ok(outcome);
            }
        }

        if should_split(rng, order, tenders.len()) {
            return self.split_payment(rng, order, tenders, None, due).await;
        }

        self.single_payment(rng, order, tenders).await
    }

    /// Attempt gift-card settlement; None falls back to ordinary routing
    async fn try_gift_card(
        &self,
        rng: &mut StdRng,
        order: &SimulatedOrder,
        tenders: &[Tender],
        gift_cards: &[GiftCard],
        due: i64,
    ) -> Option<PaymentOutcome> {
        let gift_tender = tenders.iter().find(|t| t.is_gift_card())?;
        let funded: Vec<&GiftCard> = gift_cards
            .iter()
            .filter(|c| c.active && c.balance > 0)
            .collect();
        let card = funded.choose(rng)?;

        let redemption = match self.gift_cards.redeem_gift_card(&card.id, due).await {
            Ok(redemption) if redemption.success && redemption.amount_redeemed > 0 => redemption,
            Ok(_) => return None,
            Err(err) => {
                tracing::warn!(order_id = %order.id, card_id = %card.id, %err,
                    "gift card redemption failed, falling back to ordinary payment");
                return None;
            }
        };

        if redemption.amount_redeemed >= due {
            // Full cover: pay in full via the gift-card tender
            let payload = PaymentCreate {
                tender_id: gift_tender.id.clone(),
                amount: order.subtotal,
                tip_amount: order.tip,
                tax_amount: order.tax,
            };
            match self.payments.process_payment(&order.id, payload).await {
                Ok(record) => Some(PaymentOutcome {
                    kind: PaymentKind::GiftCard,
                    records: vec![record],
                    gift_card_amount: redemption.amount_redeemed,
                    used_cash: false,
                }),
                Err(err) => {
                    tracing::warn!(order_id = %order.id, %err, "gift card payment failed");
                    None
                }
            }
        } else {
            // Partial cover: split between the gift-card tender and one
            // other tender, proportional to the redeemed amount
            let percentage = (redemption.amount_redeemed * 100 / due).clamp(1, 99);
            let other = tenders
                .iter()
                .filter(|t| !t.is_gift_card())
                .collect::<Vec<_>>()
                .choose(rng)
                .map(|t| (*t).clone())?;
            let shares = vec![
                SplitShare {
                    tender_id: gift_tender.id.clone(),
                    percentage,
                },
                SplitShare {
                    tender_id: other.id.clone(),
                    percentage: 100 - percentage,
                },
            ];
            match self
                .split_payment(rng, order, tenders, Some(shares), due)
                .await
            {
                Ok(mut outcome) => {
                    outcome.kind = PaymentKind::GiftCardSplit;
                    outcome.gift_card_amount = redemption.amount_redeemed;
                    Some(outcome)
                }
                Err(err) => {
                    tracing::warn!(order_id = %order.id, %err, "gift card split failed");
                    None
                }
            }
        }
    }

    /// Split settlement; `forced_shares` carries the gift-card split,
    /// otherwise tenders and percentages are generated here
    async fn split_payment(
        &self,
        rng: &mut StdRng,
        order: &SimulatedOrder,
        tenders: &[Tender],
        forced_shares: Option<Vec<SplitShare>>,
        _due: i64,
    ) -> GatewayResult<PaymentOutcome> {
        let shares = match forced_shares {
            Some(shares) => shares,
            None => {
                let count = (order.party_size as usize)
                    .min(MAX_SPLIT_TENDERS)
                    .min(tenders.len())
                    .max(2);
                let chosen = choose_distinct(rng, tenders, count);
                let percentages = split_percentages(rng, chosen.len());
                chosen
                    .iter()
                    .zip(percentages)
                    .map(|(tender, percentage)| SplitShare {
                        tender_id: tender.id.clone(),
                        percentage,
                    })
                    .collect()
            }
        };

        let used_cash = shares.iter().any(|s| {
            tenders
                .iter()
                .any(|t| t.id == s.tender_id && t.is_cash())
        });

        let records = self
            .payments
            .process_split_payment(&order.id, order.subtotal, order.tip, order.tax, shares)
            .await?;

        Ok(PaymentOutcome {
            kind: PaymentKind::Split,
            records,
            gift_card_amount: 0,
            used_cash,
        })
    }

    /// Single-tender settlement with the small-order cash bias
    async fn single_payment(
        &self,
        rng: &mut StdRng,
        order: &SimulatedOrder,
        tenders: &[Tender],
    ) -> GatewayResult<PaymentOutcome> {
        let pool: Vec<&Tender> = tenders.iter().filter(|t| !t.is_gift_card()).collect();
        let pool = if pool.is_empty() {
            tenders.iter().collect()
        } else {
            pool
        };

        let tender = if order.subtotal < CASH_BIAS_CEILING && chance(rng, CASH_BIAS_GATE) {
            pool.iter()
                .find(|t| t.is_cash())
                .copied()
                .or_else(|| pool.choose(rng).copied())
        } else {
            pool.choose(rng).copied()
        };
        let tender = tender.ok_or_else(|| {
            shared::gateway::GatewayError::InvalidPayload("no tenders available".to_string())
        })?;

        let payload = PaymentCreate {
            tender_id: tender.id.clone(),
            amount: order.subtotal,
            tip_amount: order.tip,
            tax_amount: order.tax,
        };

        let record = if tender.is_card() && self.ecommerce_enabled {
            self.payments
                .process_card_payment_via_ecommerce(&order.id, payload)
                .await?
        } else {
            self.payments.process_payment(&order.id, payload).await?
        };

        let used_cash = tender.is_cash();
        if used_cash {
            let event = CashEvent {
                employee_id: Some(order.employee_id.clone()),
                amount: order.subtotal + order.tax + order.tip,
                note: Some(format!("order {}", order.id)),
            };
            if let Err(err) = self.cash_drawer.record_cash_payment(event).await {
                tracing::warn!(order_id = %order.id, %err, "cash drawer event failed");
            }
        }

        Ok(PaymentOutcome {
            kind: PaymentKind::Single,
            records: vec![record],
            gift_card_amount: 0,
            used_cash,
        })
    }
}

/// Split-payment gate: 25% for dine-in parties of 2+, else 5%, and only
/// when more than one tender exists
fn should_split(rng: &mut impl Rng, order: &SimulatedOrder, tender_count: usize) -> bool {
    if tender_count < 2 {
        return false;
    }
    let gate = if order.dining_option == DiningOption::Here && order.party_size >= 2 {
        SPLIT_GATE_DINE_IN
    } else {
        SPLIT_GATE_DEFAULT
    };
    chance(rng, gate)
}
