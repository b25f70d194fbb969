//! Order assembly
//!
//! Builds one simulated order end to end: sampling people, selecting
//! items, attaching modifiers, resolving the discount, computing totals,
//! and routing payment. Every external call is a point of partial
//! failure; a failed sub-operation is logged and the build continues
//! with whatever succeeded.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::gateway::{AuditSink, OrderGateway};
use shared::models::{
    percentage_of, DiningOption, Item, LineItemCreate, ModificationCreate, ModifierGroup,
    OrderCreate, OrderState, ServiceChargePayload, SimulatedPaymentAudit,
};

use crate::catalog::CatalogSnapshot;
use crate::discounts::{DiscountContext, DiscountResolver};
use crate::order::{SimCustomer, SimLineItem, SimulatedOrder};
use crate::payments::{PaymentOutcome, PaymentRouter};
use crate::periods::PeriodProfile;
use crate::util::random::{chance, range_u32, weighted_index};

/// Probability a customer is attached to the order
pub const CUSTOMER_GATE: u32 = 60;
/// Probability a sampled customer is flagged VIP
pub const VIP_GATE: u32 = 5;
/// Probability a line item carries a note
pub const NOTE_GATE: u32 = 15;
/// Probability a line item for a larger party gets quantity 2-3
pub const MULTI_QUANTITY_GATE: u32 = 30;
/// Probability modifiers are attached to an eligible line item
pub const MODIFIER_GATE: u32 = 30;
/// Probability an optional modifier group contributes selections
pub const OPTIONAL_GROUP_GATE: u32 = 50;
/// Probability a takeout order tips nothing
pub const ZERO_TIP_GATE: u32 = 30;
/// Party size at which auto-gratuity replaces the tip
pub const AUTO_GRATUITY_PARTY: u32 = 6;
/// Auto-gratuity percentage
pub const AUTO_GRATUITY_PERCENT: i64 = 18;
/// Sampling weight multiplier for preferred-category items
const PREFERRED_CATEGORY_WEIGHT: u32 = 3;

/// Free-text notes sprinkled onto line items
const ITEM_NOTES: &[&str] = &[
    "No onions",
    "Extra spicy",
    "Dressing on the side",
    "Allergy: peanuts",
    "Light ice",
    "Well done",
    "Split plate",
];

/// Result of one assembly attempt
#[derive(Debug)]
pub enum AssemblyOutcome {
    /// Order paid; ready for statistics and refund selection
    Paid {
        order: SimulatedOrder,
        payment: PaymentOutcome,
    },
    /// Zero line items landed; order left open and skipped
    Abandoned,
    /// A required step failed (order creation or payment)
    Failed,
}

/// Builds complete simulated orders
pub struct OrderAssembler {
    orders: Arc<dyn OrderGateway>,
    router: PaymentRouter,
    audit: Arc<dyn AuditSink>,
    /// Fallback tax rate when items carry no associations (1% = 10,000)
    flat_tax_rate: i64,
    tz: Tz,
}

impl OrderAssembler {
    pub fn new(
        orders: Arc<dyn OrderGateway>,
        router: PaymentRouter,
        audit: Arc<dyn AuditSink>,
        flat_tax_rate: i64,
        tz: Tz,
    ) -> Self {
        Self {
            orders,
            router,
            audit,
            flat_tax_rate,
            tz,
        }
    }

    /// Assemble, settle, and mirror one order
    pub async fn assemble(
        &self,
        rng: &mut StdRng,
        snapshot: &CatalogSnapshot,
        resolver: &DiscountResolver,
        profile: &PeriodProfile,
        placed_at: DateTime<Utc>,
        business_date: &str,
    ) -> AssemblyOutcome {
        // 1. People
        let employee = match snapshot.employees.choose(rng) {
            Some(employee) => employee.clone(),
            None => return AssemblyOutcome::Failed,
        };
        let customer = sample_customer(rng, snapshot);
        let party_size = range_u32(rng, profile.party_range.0, profile.party_range.1);

        // 2. Order shell
        let created = self
            .orders
            .create_order(OrderCreate {
                employee_id: employee.id.clone(),
                customer_id: customer.as_ref().map(|c| c.customer.id.clone()),
                note: None,
            })
            .await;
        let platform_order = match created {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(%err, "order creation failed, skipping order");
                return AssemblyOutcome::Failed;
            }
        };

        let mut order = SimulatedOrder::new(
            platform_order.id,
            employee.id.clone(),
            customer,
            profile.period,
        );
        order.party_size = party_size;
        order.placed_at = placed_at;

        // 3. Dining option and order type
        order.dining_option = pick_dining_option(rng, profile);
        if let Err(err) = self
            .orders
            .set_dining_option(&order.id, order.dining_option)
            .await
        {
            tracing::warn!(order_id = %order.id, %err, "set dining option failed");
        }
        if let Some(order_type) = snapshot
            .order_types
            .iter()
            .find(|t| t.label == order.dining_option.order_type_label())
        {
            match self.orders.set_order_type(&order.id, &order_type.id).await {
                Ok(()) => {
                    order.order_type_id = Some(order_type.id.clone());
                    order.order_type_label = Some(order_type.label.clone());
                }
                Err(err) => {
                    tracing::warn!(order_id = %order.id, %err, "set order type failed");
                }
            }
        }

        // 4-5. Line items
        let selections = select_items(rng, snapshot, profile, party_size);
        for item in selections {
            let quantity = quantity_for(rng, party_size);
            let note = maybe_note(rng);
            let payload = LineItemCreate {
                item_id: item.id.clone(),
                quantity: quantity as i32,
                note: note.clone(),
            };
            match self.orders.add_line_item(&order.id, payload).await {
                Ok(line) => order.items.push(SimLineItem {
                    line_item_id: line.id,
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    category: item.category_name.clone(),
                    unit_price: item.price,
                    quantity,
                    note,
                    modifier_amount: 0,
                    modifier_count: 0,
                    tax_rate_ids: item.tax_rate_ids.clone(),
                }),
                Err(err) => {
                    tracing::warn!(order_id = %order.id, item = %item.name, %err,
                        "add line item failed");
                }
            }
        }

        // 6. Hard rule: no payment on an empty order
        if order.items.is_empty() {
            tracing::warn!(order_id = %order.id, "no line items attached, abandoning order");
            if let Err(err) = self.orders.update_state(&order.id, OrderState::Open).await {
                tracing::debug!(order_id = %order.id, %err, "abandon state update failed");
            }
            return AssemblyOutcome::Abandoned;
        }

        // 7. Modifiers
        self.attach_modifiers(rng, snapshot, &mut order).await;

        // 8. Discount
        let item_total = order.item_total();
        let local = placed_at.with_timezone(&self.tz).naive_local();
        let ctx = DiscountContext {
            items: &order.items,
            customer: order.customer.as_ref(),
            period: order.period,
            now_utc: placed_at,
            now_local: local,
            item_total,
        };
        if let Some(applied) = resolver.resolve(rng, &ctx) {
            match self
                .orders
                .apply_discount(&order.id, applied.payload.clone())
                .await
            {
                Ok(()) => order.discount = Some(applied),
                Err(err) if !err.is_transient() => {
                    tracing::error!(order_id = %order.id, %err, "structurally invalid discount");
                }
                Err(err) => {
                    tracing::warn!(order_id = %order.id, %err, "apply discount failed");
                }
            }
        }
        order.subtotal =
            item_total - order.discount.as_ref().map(|d| d.payload.reduction()).unwrap_or(0);

        // 9-10. Auto-gratuity or tip
        if order.party_size >= AUTO_GRATUITY_PARTY {
            let charge = ServiceChargePayload::from_percentage(
                "Auto Gratuity",
                AUTO_GRATUITY_PERCENT,
                order.subtotal,
            );
            let amount = charge.amount;
            match self.orders.apply_service_charge(&order.id, charge).await {
                Ok(()) => order.service_charge = amount,
                Err(err) => {
                    tracing::warn!(order_id = %order.id, %err, "apply service charge failed");
                }
            }
            // Auto-gratuity subsumes the tip, even when the platform call
            // fails; a large party is never double-charged.
            order.tip = 0;
        } else {
            let percent = tip_percent(rng, order.dining_option, order.party_size);
            order.tip = percentage_of(order.subtotal, percent);
        }

        // 11. Tax
        order.tax = compute_tax(&order, snapshot, self.flat_tax_rate);

        // Totals the platform should agree with
        let local_total = order.subtotal + order.tax + order.service_charge;
        if let Err(err) = self.orders.update_total(&order.id, local_total).await {
            tracing::warn!(order_id = %order.id, %err, "update total failed");
        }
        self.validate_total(&order.id, local_total).await;

        // 12. Payment
        let payment = match self
            .router
            .settle(rng, &order, &snapshot.tenders, &snapshot.gift_cards)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(order_id = %order.id, %err, "payment failed, abandoning order");
                return AssemblyOutcome::Failed;
            }
        };
        order.payments = payment.records.clone();

        // 13. Paid transition + audit mirror
        if let Err(err) = self.orders.update_state(&order.id, OrderState::Paid).await {
            tracing::warn!(order_id = %order.id, %err, "paid state update failed");
        }
        self.mirror(&order, &payment, &snapshot.tenders, business_date)
            .await;

        AssemblyOutcome::Paid { order, payment }
    }

    /// Step 7: probabilistically attach modifiers per line item
    async fn attach_modifiers(
        &self,
        rng: &mut StdRng,
        snapshot: &CatalogSnapshot,
        order: &mut SimulatedOrder,
    ) {
        let item_groups: Vec<(usize, Vec<String>)> = order
            .items
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let groups = snapshot
                    .items
                    .iter()
                    .find(|i| i.id == line.item_id)
                    .map(|i| i.modifier_group_ids.clone())
                    .unwrap_or_default();
                (idx, groups)
            })
            .collect();

        for (idx, group_ids) in item_groups {
            if group_ids.is_empty() || !chance(rng, MODIFIER_GATE) {
                continue;
            }
            for group_id in &group_ids {
                let Some(group) = snapshot.modifier_groups.get(group_id) else {
                    continue;
                };
                let picks = select_modifiers(rng, group);
                for modifier in picks {
                    let payload = ModificationCreate {
                        line_item_id: order.items[idx].line_item_id.clone(),
                        modifier_id: modifier.id.clone(),
                        name: modifier.name.clone(),
                        amount: modifier.price,
                    };
                    match self.orders.add_modification(&order.id, payload).await {
                        Ok(()) => {
                            order.items[idx].modifier_amount += modifier.price;
                            order.items[idx].modifier_count += 1;
                        }
                        Err(err) => {
                            tracing::warn!(order_id = %order.id, modifier = %modifier.name, %err,
                                "add modification failed");
                        }
                    }
                }
            }
        }
    }

    /// Compare the local total against the platform's; mismatches are
    /// warnings, never errors
    async fn validate_total(&self, order_id: &str, local_total: i64) {
        match self.orders.calculate_total(order_id).await {
            Ok(remote) if remote != local_total => {
                tracing::warn!(
                    order_id,
                    local_total,
                    remote_total = remote,
                    "platform total disagrees with local calculation"
                );
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(order_id, %err, "total validation skipped");
            }
        }
    }

    /// Best-effort audit mirror; every failure is swallowed
    async fn mirror(
        &self,
        order: &SimulatedOrder,
        payment: &PaymentOutcome,
        tenders: &[shared::models::Tender],
        business_date: &str,
    ) {
        if let Err(err) = self
            .audit
            .record_simulated_order(order.audit_record(business_date))
            .await
        {
            tracing::debug!(order_id = %order.id, %err, "audit order mirror failed");
        }
        for record in &payment.records {
            let share = (payment.records.len() > 1).then(|| {
                let total: i64 = payment.records.iter().map(|r| r.amount).sum();
                if total > 0 {
                    record.amount * 100 / total
                } else {
                    0
                }
            });
            let tender_label = tenders
                .iter()
                .find(|t| t.id == record.tender_id)
                .map(|t| t.label.clone())
                .unwrap_or_default();
            let audit = SimulatedPaymentAudit {
                order_id: order.id.clone(),
                payment_id: record.id.clone(),
                tender_id: record.tender_id.clone(),
                tender_label,
                amount: record.amount,
                tip_amount: record.tip_amount,
                split_percentage: share,
                gift_card: payment.gift_card_amount > 0,
                refund_reason: None,
            };
            if let Err(err) = self.audit.record_simulated_payment(audit).await {
                tracing::debug!(order_id = %order.id, %err, "audit payment mirror failed");
            }
        }
    }
}

/// Step 1: 60% of orders carry a customer with ephemeral loyalty inputs
fn sample_customer(rng: &mut StdRng, snapshot: &CatalogSnapshot) -> Option<SimCustomer> {
    if snapshot.customers.is_empty() || !chance(rng, CUSTOMER_GATE) {
        return None;
    }
    let customer = snapshot.customers.choose(rng)?.clone();
    let visit_count = customer.visit_count.unwrap_or_else(|| rng.gen_range(0..=60));
    Some(SimCustomer {
        customer,
        visit_count,
        vip: chance(rng, VIP_GATE),
    })
}

/// Step 3: weighted dining-option draw from the period profile
fn pick_dining_option(rng: &mut StdRng, profile: &PeriodProfile) -> DiningOption {
    let weights: Vec<u32> = profile.dining_weights.iter().map(|(_, w)| *w).collect();
    match weighted_index(rng, &weights) {
        Some(idx) => profile.dining_weights[idx].0,
        None => DiningOption::Here,
    }
}

/// Step 4: biased item selection.
///
/// Count = period base draw + party_size/2, floored at 1. Preferred
/// categories sample at 3x weight; parties of 4+ first get one item per
/// preferred category so large orders never collapse into one category.
fn select_items<'a>(
    rng: &mut StdRng,
    snapshot: &'a CatalogSnapshot,
    profile: &PeriodProfile,
    party_size: u32,
) -> Vec<&'a Item> {
    let base = range_u32(rng, profile.item_range.0, profile.item_range.1);
    let count = (base + party_size / 2).max(1) as usize;

    let mut selected: Vec<&Item> = Vec::with_capacity(count);

    if party_size >= 4 {
        for category in &profile.preferred_categories {
            if selected.len() >= count {
                break;
            }
            let in_category: Vec<&Item> = snapshot
                .items
                .iter()
                .filter(|i| i.category_name.as_deref() == Some(category.as_str()))
                .collect();
            if let Some(item) = in_category.choose(rng) {
                selected.push(*item);
            }
        }
    }

    let weights: Vec<u32> = snapshot
        .items
        .iter()
        .map(|item| {
            let preferred = item
                .category_name
                .as_deref()
                .is_some_and(|c| profile.preferred_categories.iter().any(|p| p == c));
            if preferred {
                PREFERRED_CATEGORY_WEIGHT
            } else {
                1
            }
        })
        .collect();

    while selected.len() < count {
        match weighted_index(rng, &weights) {
            Some(idx) => selected.push(&snapshot.items[idx]),
            None => break,
        }
    }

    selected
}

/// Step 5: quantity 2-3 with 30% probability for parties over 2
fn quantity_for(rng: &mut StdRng, party_size: u32) -> i64 {
    if party_size > 2 && chance(rng, MULTI_QUANTITY_GATE) {
        rng.gen_range(2..=3)
    } else {
        1
    }
}

/// Step 5: occasional free-text note
fn maybe_note(rng: &mut StdRng) -> Option<String> {
    if chance(rng, NOTE_GATE) {
        ITEM_NOTES.choose(rng).map(|n| n.to_string())
    } else {
        None
    }
}

/// Step 7: modifier picks for one group; required minimums always met
fn select_modifiers<'a>(
    rng: &mut StdRng,
    group: &'a ModifierGroup,
) -> Vec<&'a shared::models::Modifier> {
    if group.modifiers.is_empty() {
        return Vec::new();
    }
    let max_allowed = group
        .max_allowed
        .map(|m| m as usize)
        .unwrap_or(group.modifiers.len())
        .min(group.modifiers.len())
        .max(1);

    let count = if group.min_required > 0 {
        let min = (group.min_required as usize).min(max_allowed);
        rng.gen_range(min..=max_allowed)
    } else if chance(rng, OPTIONAL_GROUP_GATE) {
        rng.gen_range(1..=2usize.min(max_allowed))
    } else {
        0
    };

    group.modifiers.choose_multiple(rng, count).collect()
}

/// Step 10: tip percentage by dining option.
///
/// Dine-in 15-25%, takeout 0-15% (zeroed 30% of the time), delivery
/// 10-20%; floored at 18% for parties of 6+. The floor is unreachable in
/// the normal flow because auto-gratuity short-circuits first, but the
/// function honors it in isolation.
pub fn tip_percent(rng: &mut impl Rng, dining: DiningOption, party_size: u32) -> i64 {
    let mut percent = match dining {
        DiningOption::Here => rng.gen_range(15..=25),
        DiningOption::ToGo => rng.gen_range(0..=15),
        DiningOption::Delivery => rng.gen_range(10..=20),
    };
    if party_size >= AUTO_GRATUITY_PARTY {
        percent = percent.max(18);
    }
    if dining == DiningOption::ToGo && chance(rng, ZERO_TIP_GATE) {
        percent = 0;
    }
    percent
}

/// Step 11: per-item tax from assigned rates, falling back to the flat
/// configured rate when the per-item pass computes zero
pub fn compute_tax(order: &SimulatedOrder, snapshot: &CatalogSnapshot, flat_rate: i64) -> i64 {
    let per_item: i64 = order
        .items
        .iter()
        .map(|line| {
            let rate_sum: i64 = line
                .tax_rate_ids
                .iter()
                .filter_map(|id| snapshot.tax_rates.get(id))
                .map(|rate| rate.rate)
                .sum();
            (line.line_total() * rate_sum + 500_000) / 1_000_000
        })
        .sum();

    if per_item > 0 {
        per_item
    } else {
        // Conflates "no associations" with a genuine 0% rate; kept for
        // platform compatibility.
        tracing::debug!(order_id = %order.id, "per-item tax is zero, using flat rate");
        (order.subtotal * flat_rate + 500_000) / 1_000_000
    }
}
