//! Promo-code coupon validation

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use shared::models::CouponDefinition;

use crate::order::{SimCustomer, SimLineItem};

/// Why a presented code was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponRejection {
    Inactive,
    NotYetValid,
    Expired,
    UsageLimitReached,
    BelowMinimumAmount,
    VipOnly,
    WrongDay,
    OutsideHours,
    NoEligibleCategory,
}

/// Validate a presented code against the order.
///
/// Rejections are business-rule non-eligibility, never errors; the
/// waterfall just moves on.
pub fn validate_coupon(
    coupon: &CouponDefinition,
    now_utc: DateTime<Utc>,
    now_local: &NaiveDateTime,
    order_total: i64,
    customer: Option<&SimCustomer>,
    items: &[SimLineItem],
) -> Result<(), CouponRejection> {
    if !coupon.active {
        return Err(CouponRejection::Inactive);
    }

    if let Some(from) = coupon.valid_from {
        if now_utc < from {
            return Err(CouponRejection::NotYetValid);
        }
    }
    if let Some(until) = coupon.valid_until {
        if now_utc > until {
            return Err(CouponRejection::Expired);
        }
    }

    if let Some(limit) = coupon.usage_limit {
        if coupon.times_used >= limit {
            return Err(CouponRejection::UsageLimitReached);
        }
    }

    if let Some(min) = coupon.min_order_amount {
        if order_total < min {
            return Err(CouponRejection::BelowMinimumAmount);
        }
    }

    if coupon.vip_only && !customer.is_some_and(|c| c.vip) {
        return Err(CouponRejection::VipOnly);
    }

    if let Some(days) = &coupon.active_days {
        let today = now_local.weekday().num_days_from_sunday() as u8;
        if !days.contains(&today) {
            return Err(CouponRejection::WrongDay);
        }
    }

    if let (Some(start), Some(end)) = (coupon.start_hour, coupon.end_hour) {
        let hour = now_local.hour();
        let inside = if start <= end {
            hour >= start && hour < end
        } else {
            hour >= start || hour < end
        };
        if !inside {
            return Err(CouponRejection::OutsideHours);
        }
    }

    if !coupon.categories.is_empty() {
        let any_eligible = items.iter().any(|item| {
            item.category.as_deref().is_some_and(|c| {
                coupon
                    .categories
                    .iter()
                    .any(|cat| cat.eq_ignore_ascii_case(c))
            })
        });
        if !any_eligible {
            return Err(CouponRejection::NoEligibleCategory);
        }
    }

    Ok(())
}
