//! Meal periods and the day scheduler
//!
//! Maps a calendar date to a target order count and distributes it across
//! meal periods. Period profiles are immutable configuration; weights sum
//! to exactly 100, as does each period's dining-option distribution.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::models::DiningOption;

use crate::util::random::{range_u32, weighted_index};

/// Meal period of a simulated order
///
/// Iteration order is fixed via [`MealPeriod::ALL`]; the distribution
/// remainder always lands on the last entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealPeriod {
    Breakfast,
    Lunch,
    HappyHour,
    Dinner,
    LateNight,
}

impl MealPeriod {
    /// Fixed iteration order for distribution and reporting
    pub const ALL: [MealPeriod; 5] = [
        MealPeriod::Breakfast,
        MealPeriod::Lunch,
        MealPeriod::HappyHour,
        MealPeriod::Dinner,
        MealPeriod::LateNight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealPeriod::Breakfast => "BREAKFAST",
            MealPeriod::Lunch => "LUNCH",
            MealPeriod::HappyHour => "HAPPY_HOUR",
            MealPeriod::Dinner => "DINNER",
            MealPeriod::LateNight => "LATE_NIGHT",
        }
    }
}

/// Immutable per-period configuration
#[derive(Debug, Clone)]
pub struct PeriodProfile {
    pub period: MealPeriod,
    /// Hour range [start, end) in merchant local time
    pub hours: (u32, u32),
    /// Share of the day's orders; profile weights sum to 100
    pub weight: u32,
    /// Base line-item count range, before the party-size bump
    pub item_range: (u32, u32),
    /// Party size range
    pub party_range: (u32, u32),
    /// Categories item selection is biased toward
    pub preferred_categories: Vec<String>,
    /// Dining-option mix; weights sum to 100
    pub dining_weights: Vec<(DiningOption, u32)>,
}

fn profile(
    period: MealPeriod,
    hours: (u32, u32),
    weight: u32,
    item_range: (u32, u32),
    party_range: (u32, u32),
    preferred: &[&str],
    dining: [(DiningOption, u32); 3],
) -> PeriodProfile {
    PeriodProfile {
        period,
        hours,
        weight,
        item_range,
        party_range,
        preferred_categories: preferred.iter().map(|c| c.to_string()).collect(),
        dining_weights: dining.to_vec(),
    }
}

/// Default restaurant day, in [`MealPeriod::ALL`] order
pub fn default_profiles() -> Vec<PeriodProfile> {
    vec![
        profile(
            MealPeriod::Breakfast,
            (7, 11),
            15,
            (1, 3),
            (1, 3),
            &["Breakfast", "Drinks"],
            [
                (DiningOption::Here, 50),
                (DiningOption::ToGo, 40),
                (DiningOption::Delivery, 10),
            ],
        ),
        profile(
            MealPeriod::Lunch,
            (11, 15),
            30,
            (1, 4),
            (1, 4),
            &["Entrees", "Sides"],
            [
                (DiningOption::Here, 45),
                (DiningOption::ToGo, 40),
                (DiningOption::Delivery, 15),
            ],
        ),
        profile(
            MealPeriod::HappyHour,
            (15, 18),
            10,
            (2, 5),
            (1, 6),
            &["Appetizers", "Alcohol"],
            [
                (DiningOption::Here, 80),
                (DiningOption::ToGo, 15),
                (DiningOption::Delivery, 5),
            ],
        ),
        profile(
            MealPeriod::Dinner,
            (18, 22),
            35,
            (2, 6),
            (2, 8),
            &["Entrees", "Appetizers", "Desserts"],
            [
                (DiningOption::Here, 60),
                (DiningOption::ToGo, 20),
                (DiningOption::Delivery, 20),
            ],
        ),
        profile(
            MealPeriod::LateNight,
            (22, 24),
            10,
            (1, 3),
            (1, 4),
            &["Appetizers", "Drinks", "Alcohol"],
            [
                (DiningOption::Here, 30),
                (DiningOption::ToGo, 40),
                (DiningOption::Delivery, 30),
            ],
        ),
    ]
}

/// Daily order volume ranges keyed by day-of-week category
#[derive(Debug, Clone)]
pub struct OrderVolume {
    pub weekday: (u32, u32),
    pub friday: (u32, u32),
    pub saturday: (u32, u32),
    pub sunday: (u32, u32),
}

impl OrderVolume {
    fn range_for(&self, date: NaiveDate) -> (u32, u32) {
        match date.weekday() {
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
            _ => self.weekday,
        }
    }
}

/// Scheduler for one merchant's simulated day
#[derive(Debug, Clone)]
pub struct MealPeriodScheduler {
    profiles: Vec<PeriodProfile>,
    volume: OrderVolume,
    tz: Tz,
}

impl MealPeriodScheduler {
    pub fn new(volume: OrderVolume, tz: Tz) -> Self {
        Self {
            profiles: default_profiles(),
            volume,
            tz,
        }
    }

    pub fn with_profiles(mut self, profiles: Vec<PeriodProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn profiles(&self) -> &[PeriodProfile] {
        &self.profiles
    }

    pub fn profile(&self, period: MealPeriod) -> &PeriodProfile {
        self.profiles
            .iter()
            .find(|p| p.period == period)
            .unwrap_or(&self.profiles[0])
    }

    /// Target order count for a date: uniform draw from the day-of-week
    /// category's configured range
    pub fn order_count_for_date(&self, rng: &mut impl Rng, date: NaiveDate) -> u32 {
        let (min, max) = self.volume.range_for(date);
        range_u32(rng, min, max)
    }

    /// Allocate `total` across periods proportional to weight.
    ///
    /// Every period except the last rounds `weight / total_weight × total`;
    /// the last absorbs the remainder so the counts always sum to `total`.
    pub fn distribute_orders_by_period(&self, total: u32) -> Vec<(MealPeriod, u32)> {
        let total_weight: u32 = self.profiles.iter().map(|p| p.weight).sum();
        let mut allocation = Vec::with_capacity(self.profiles.len());
        let mut allocated = 0;

        for (idx, profile) in self.profiles.iter().enumerate() {
            let count = if idx == self.profiles.len() - 1 {
                total - allocated
            } else if total_weight == 0 {
                0
            } else {
                let share = f64::from(profile.weight) / f64::from(total_weight);
                ((f64::from(total) * share).round() as u32).min(total - allocated)
            };
            allocated += count;
            allocation.push((profile.period, count));
        }

        allocation
    }

    /// Draw a single period proportional to weight, for on-demand
    /// generation. Defaults to Dinner if the cumulative scan falls
    /// through; with integer weights summing to 100 it never does.
    pub fn weighted_random_period(&self, rng: &mut impl Rng) -> MealPeriod {
        let weights: Vec<u32> = self.profiles.iter().map(|p| p.weight).collect();
        match weighted_index(rng, &weights) {
            Some(idx) => self.profiles[idx].period,
            None => MealPeriod::Dinner,
        }
    }

    /// Compose a random timestamp inside the period's hour range on `date`,
    /// in the merchant timezone
    pub fn generate_order_time(
        &self,
        rng: &mut impl Rng,
        date: NaiveDate,
        period: MealPeriod,
    ) -> chrono::DateTime<Utc> {
        let profile = self.profile(period);
        let (start, end) = profile.hours;
        let hour = if end > start {
            rng.gen_range(start..end)
        } else {
            start
        };
        let minute = rng.gen_range(0..60);

        let time = NaiveTime::from_hms_opt(hour.min(23), minute, 0)
            .unwrap_or(NaiveTime::MIN);
        let naive = date.and_time(time);

        match self.tz.from_local_datetime(&naive).earliest() {
            Some(local) => local.with_timezone(&Utc),
            // DST gap or unresolvable local time: fall back to naive UTC
            None => Utc.from_utc_datetime(&naive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scheduler() -> MealPeriodScheduler {
        MealPeriodScheduler::new(
            OrderVolume {
                weekday: (40, 80),
                friday: (70, 110),
                saturday: (90, 150),
                sunday: (60, 100),
            },
            chrono_tz::America::New_York,
        )
    }

    #[test]
    fn test_period_weights_sum_to_100() {
        let total: u32 = default_profiles().iter().map(|p| p.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_dining_weights_sum_to_100_per_period() {
        for profile in default_profiles() {
            let total: u32 = profile.dining_weights.iter().map(|(_, w)| w).sum();
            assert_eq!(total, 100, "period={:?}", profile.period);
        }
    }

    #[test]
    fn test_distribution_sums_exactly() {
        let s = scheduler();
        for total in [0, 1, 3, 7, 42, 100, 997] {
            let allocation = s.distribute_orders_by_period(total);
            let sum: u32 = allocation.iter().map(|(_, c)| c).sum();
            assert_eq!(sum, total, "total={}", total);
            assert_eq!(allocation.len(), MealPeriod::ALL.len());
        }
    }

    #[test]
    fn test_distribution_follows_fixed_order() {
        let allocation = scheduler().distribute_orders_by_period(50);
        let order: Vec<MealPeriod> = allocation.iter().map(|(p, _)| *p).collect();
        assert_eq!(order, MealPeriod::ALL.to_vec());
    }

    #[test]
    fn test_order_count_saturday_in_range() {
        let s = scheduler();
        let mut rng = StdRng::seed_from_u64(11);
        // 2026-08-08 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        for _ in 0..200 {
            let count = s.order_count_for_date(&mut rng, saturday);
            assert!((90..=150).contains(&count), "count={}", count);
        }
    }

    #[test]
    fn test_order_count_weekday_disjoint_from_saturday() {
        let s = scheduler();
        let mut rng = StdRng::seed_from_u64(11);
        // 2026-08-05 is a Wednesday; weekday range (40, 80) is disjoint
        // from Saturday's (90, 150)
        let wednesday = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        for _ in 0..200 {
            let count = s.order_count_for_date(&mut rng, wednesday);
            assert!((40..=80).contains(&count), "count={}", count);
        }
    }

    #[test]
    fn test_weighted_random_period_distribution() {
        let s = scheduler();
        let mut rng = StdRng::seed_from_u64(13);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..10_000 {
            *counts.entry(s.weighted_random_period(&mut rng)).or_insert(0u32) += 1;
        }
        // Dinner (35%) must dominate HappyHour (10%) over 10k draws
        assert!(counts[&MealPeriod::Dinner] > counts[&MealPeriod::HappyHour]);
        // Every period shows up
        for period in MealPeriod::ALL {
            assert!(counts.contains_key(&period), "missing {:?}", period);
        }
    }

    #[test]
    fn test_generate_order_time_within_period_hours() {
        let s = scheduler();
        let mut rng = StdRng::seed_from_u64(17);
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        for _ in 0..100 {
            let ts = s.generate_order_time(&mut rng, date, MealPeriod::Dinner);
            let local = ts.with_timezone(&chrono_tz::America::New_York);
            let hour = chrono::Timelike::hour(&local);
            assert!((18..22).contains(&hour), "hour={}", hour);
        }
    }
}
