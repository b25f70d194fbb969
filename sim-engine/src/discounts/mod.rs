//! Discount resolution
//!
//! Decides at most one discount per order through a strict seven-step
//! waterfall. Each step is gated by an independent Bernoulli draw; the
//! first step whose gate fires and finds an eligible candidate wins.
//! There is no stacking and no best-of-all-eligible ranking across steps.

mod combos;
mod coupons;

pub use combos::{detect_best_combo, ComboMatch};
pub use coupons::{validate_coupon, CouponRejection};

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use shared::models::{percentage_of, Discount, DiscountPayload, DiscountScope, DiscountType};

use crate::loyalty::LoyaltyTier;
use crate::order::{SimCustomer, SimLineItem};
use crate::periods::MealPeriod;
use crate::util::random::chance;

/// Which waterfall step produced a discount
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    TimeBased,
    Loyalty,
    Combo,
    PromoCode,
    LineItem,
    Threshold,
    Legacy,
}

impl DiscountKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiscountKind::TimeBased => "TIME_BASED",
            DiscountKind::Loyalty => "LOYALTY",
            DiscountKind::Combo => "COMBO",
            DiscountKind::PromoCode => "PROMO_CODE",
            DiscountKind::LineItem => "LINE_ITEM",
            DiscountKind::Threshold => "THRESHOLD",
            DiscountKind::Legacy => "LEGACY",
        }
    }
}

/// The single discount applied to an order
#[derive(Debug, Clone)]
pub struct AppliedDiscount {
    pub kind: DiscountKind,
    pub payload: DiscountPayload,
}

/// Discount, combo, and coupon definitions the resolver draws from
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    pub discounts: Vec<Discount>,
    pub combos: Vec<shared::models::ComboDefinition>,
    pub coupons: Vec<shared::models::CouponDefinition>,
}

/// Per-step probability gates, in percent
///
/// Extracted so tests can force a step deterministically instead of
/// monkeypatching the RNG.
#[derive(Debug, Clone, Copy)]
pub struct ResolverGates {
    pub time_based: u32,
    pub loyalty: u32,
    pub combo: u32,
    pub promo_code: u32,
    pub line_item: u32,
    pub threshold: u32,
    pub legacy: u32,
}

impl Default for ResolverGates {
    fn default() -> Self {
        Self {
            time_based: 90,
            loyalty: 15,
            combo: 12,
            promo_code: 8,
            line_item: 10,
            threshold: 20,
            legacy: 5,
        }
    }
}

impl ResolverGates {
    /// All gates closed; individual steps opened per test
    pub fn closed() -> Self {
        Self {
            time_based: 0,
            loyalty: 0,
            combo: 0,
            promo_code: 0,
            line_item: 0,
            threshold: 0,
            legacy: 0,
        }
    }
}

/// Everything about the order a single resolution pass looks at
#[derive(Debug)]
pub struct DiscountContext<'a> {
    pub items: &'a [SimLineItem],
    pub customer: Option<&'a SimCustomer>,
    pub period: MealPeriod,
    pub now_utc: DateTime<Utc>,
    /// Merchant-local wall clock, for day/hour windows
    pub now_local: NaiveDateTime,
    /// Item total before any discount, in minor units
    pub item_total: i64,
}

/// Resolves at most one discount per order
#[derive(Debug, Clone)]
pub struct DiscountResolver {
    defs: DefinitionSet,
    gates: ResolverGates,
}

impl DiscountResolver {
    pub fn new(defs: DefinitionSet) -> Self {
        Self {
            defs,
            gates: ResolverGates::default(),
        }
    }

    pub fn with_gates(mut self, gates: ResolverGates) -> Self {
        self.gates = gates;
        self
    }

    /// Run the waterfall. The first gated step that produces an eligible
    /// candidate wins; later steps are never consulted.
    pub fn resolve(
        &self,
        rng: &mut impl Rng,
        ctx: &DiscountContext<'_>,
    ) -> Option<AppliedDiscount> {
        if ctx.item_total <= 0 || ctx.items.is_empty() {
            return None;
        }

        // 1. Time-based, happy hour only
        if ctx.period == MealPeriod::HappyHour && chance(rng, self.gates.time_based) {
            if let Some(applied) = self.try_time_based(ctx) {
                return Some(applied);
            }
        }

        // 2. Loyalty
        if ctx.customer.is_some() && chance(rng, self.gates.loyalty) {
            if let Some(applied) = self.try_loyalty(ctx) {
                return Some(applied);
            }
        }

        // 3. Combo
        if ctx.items.len() >= 3 && chance(rng, self.gates.combo) {
            if let Some(applied) = self.try_combo(ctx) {
                return Some(applied);
            }
        }

        // 4. Promo code
        if chance(rng, self.gates.promo_code) {
            if let Some(applied) = self.try_promo_code(rng, ctx) {
                return Some(applied);
            }
        }

        // 5. Line item
        if chance(rng, self.gates.line_item) {
            if let Some(applied) = self.try_line_item(rng, ctx) {
                return Some(applied);
            }
        }

        // 6. Threshold
        if chance(rng, self.gates.threshold) {
            if let Some(applied) = self.try_threshold(ctx) {
                return Some(applied);
            }
        }

        // 7. Legacy fallback
        if chance(rng, self.gates.legacy) {
            if let Some(applied) = self.try_legacy(rng, ctx) {
                return Some(applied);
            }
        }

        None
    }

    /// First currently-valid time-window discount, applied per its scope
    fn try_time_based(&self, ctx: &DiscountContext<'_>) -> Option<AppliedDiscount> {
        let discount = self
            .defs
            .discounts
            .iter()
            .filter(|d| d.active && d.discount_type == DiscountType::TimeBased)
            .find(|d| in_time_window(d, &ctx.now_local))?;

        let payload = match discount.scope {
            DiscountScope::Order => payload_for(discount, ctx.item_total)?,
            DiscountScope::Item => {
                let item = first_eligible_item(ctx.items, &discount.categories)?;
                payload_for(discount, item.line_total())?.on_line_item(item.line_item_id.clone())
            }
        };
        Some(AppliedDiscount {
            kind: DiscountKind::TimeBased,
            payload,
        })
    }

    /// Tier from visit count, matched against a loyalty definition and
    /// applied as a calculated order-level reduction
    fn try_loyalty(&self, ctx: &DiscountContext<'_>) -> Option<AppliedDiscount> {
        let customer = ctx.customer?;
        let tier = LoyaltyTier::from_visits(customer.visit_count);
        if tier == LoyaltyTier::None {
            return None;
        }

        let discount = self
            .defs
            .discounts
            .iter()
            .filter(|d| d.active && d.discount_type == DiscountType::Loyalty)
            .find(|d| d.loyalty_tier.as_deref() == Some(tier.label()))?;

        let percent = discount.percentage.unwrap_or_else(|| tier.discount_percent());
        let payload = DiscountPayload::from_percentage(&discount.name, percent, ctx.item_total)
            .with_discount_id(&discount.id);
        if payload.reduction() == 0 {
            return None;
        }
        Some(AppliedDiscount {
            kind: DiscountKind::Loyalty,
            payload,
        })
    }

    /// Highest-value satisfiable combo
    fn try_combo(&self, ctx: &DiscountContext<'_>) -> Option<AppliedDiscount> {
        let best = detect_best_combo(&self.defs.combos, ctx.items, ctx.item_total)?;
        let payload =
            DiscountPayload::from_amount(&best.combo.name, best.amount).with_discount_id(&best.combo.id);
        Some(AppliedDiscount {
            kind: DiscountKind::Combo,
            payload,
        })
    }

    /// Simulate the customer presenting one of the configured codes
    fn try_promo_code(
        &self,
        rng: &mut impl Rng,
        ctx: &DiscountContext<'_>,
    ) -> Option<AppliedDiscount> {
        let coupon = self.defs.coupons.choose(rng)?;
        if let Err(rejection) = validate_coupon(
            coupon,
            ctx.now_utc,
            &ctx.now_local,
            ctx.item_total,
            ctx.customer,
            ctx.items,
        ) {
            tracing::debug!(code = %coupon.code, ?rejection, "promo code rejected");
            return None;
        }

        let payload = match (coupon.amount, coupon.percentage) {
            (Some(amount), _) => {
                DiscountPayload::from_amount(&coupon.name, amount.min(ctx.item_total))
            }
            (None, Some(pct)) => DiscountPayload::from_percentage(&coupon.name, pct, ctx.item_total),
            (None, None) => return None,
        };
        if payload.reduction() == 0 {
            return None;
        }
        Some(AppliedDiscount {
            kind: DiscountKind::PromoCode,
            payload: payload.with_discount_id(&coupon.id),
        })
    }

    /// Random line-item discount whose categories intersect the order
    fn try_line_item(
        &self,
        rng: &mut impl Rng,
        ctx: &DiscountContext<'_>,
    ) -> Option<AppliedDiscount> {
        let eligible: Vec<&Discount> = self
            .defs
            .discounts
            .iter()
            .filter(|d| d.active && d.discount_type == DiscountType::LineItem)
            .filter(|d| first_eligible_item(ctx.items, &d.categories).is_some())
            .collect();
        let discount = eligible.choose(rng)?;
        let item = first_eligible_item(ctx.items, &discount.categories)?;
        let payload =
            payload_for(discount, item.line_total())?.on_line_item(item.line_item_id.clone());
        Some(AppliedDiscount {
            kind: DiscountKind::LineItem,
            payload,
        })
    }

    /// Largest unlocked threshold discount
    fn try_threshold(&self, ctx: &DiscountContext<'_>) -> Option<AppliedDiscount> {
        let discount = self
            .defs
            .discounts
            .iter()
            .filter(|d| d.active && d.discount_type == DiscountType::Threshold)
            .filter(|d| d.min_order_amount.is_some_and(|min| min <= ctx.item_total))
            .max_by_key(|d| d.value_against(ctx.item_total))?;
        let payload = payload_for(discount, ctx.item_total)?;
        Some(AppliedDiscount {
            kind: DiscountKind::Threshold,
            payload,
        })
    }

    /// Uniformly random discount from the full catalog, no eligibility
    /// check beyond existing
    fn try_legacy(&self, rng: &mut impl Rng, ctx: &DiscountContext<'_>) -> Option<AppliedDiscount> {
        let discount = self.defs.discounts.choose(rng)?;
        let payload = payload_for(discount, ctx.item_total)?;
        Some(AppliedDiscount {
            kind: DiscountKind::Legacy,
            payload,
        })
    }
}

/// Build a payload with the amount always computed locally.
///
/// Returns None when the discount would reduce nothing.
fn payload_for(discount: &Discount, base: i64) -> Option<DiscountPayload> {
    let value = discount.value_against(base);
    if value == 0 {
        return None;
    }
    let payload = match (discount.amount, discount.percentage) {
        (None, Some(pct)) => DiscountPayload::from_percentage(&discount.name, pct, base),
        _ => DiscountPayload::from_amount(&discount.name, value),
    };
    Some(payload.with_discount_id(&discount.id))
}

/// First line item matching the category filter (empty filter = any item)
fn first_eligible_item<'a>(
    items: &'a [SimLineItem],
    categories: &[String],
) -> Option<&'a SimLineItem> {
    if categories.is_empty() {
        return items.first();
    }
    items.iter().find(|item| {
        item.category
            .as_deref()
            .is_some_and(|c| categories.iter().any(|cat| cat.eq_ignore_ascii_case(c)))
    })
}

/// Day-of-week and hour window check for a time-based discount
fn in_time_window(discount: &Discount, now_local: &NaiveDateTime) -> bool {
    if let Some(days) = &discount.active_days {
        let today = now_local.weekday().num_days_from_sunday() as u8;
        if !days.contains(&today) {
            return false;
        }
    }
    match (discount.start_hour, discount.end_hour) {
        (Some(start), Some(end)) => {
            let hour = now_local.hour();
            if start <= end {
                hour >= start && hour < end
            } else {
                // Overnight window (e.g. 22-2)
                hour >= start || hour < end
            }
        }
        _ => true,
    }
}
