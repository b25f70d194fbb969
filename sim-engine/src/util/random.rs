//! Random distribution utilities
//!
//! Pure functions over an injected RNG so every probabilistic decision in
//! the engine can be made deterministic in tests.

use rand::seq::SliceRandom;
use rand::Rng;

/// Minimum share a randomly generated split may hand any tender
pub const MIN_SPLIT_SHARE: i64 = 5;

/// Bernoulli gate: true with `percent`% probability
pub fn chance(rng: &mut impl Rng, percent: u32) -> bool {
    if percent >= 100 {
        return true;
    }
    rng.gen_range(0..100) < percent
}

/// Uniform draw from an inclusive range; tolerates min == max
pub fn range_u32(rng: &mut impl Rng, min: u32, max: u32) -> u32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform draw from an inclusive i64 range; tolerates min == max
pub fn range_i64(rng: &mut impl Rng, min: i64, max: i64) -> i64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Weighted categorical draw: returns an index into `weights` chosen
/// proportionally. Returns None for an empty or all-zero weight list;
/// callers provide their own fallback.
pub fn weighted_index(rng: &mut impl Rng, weights: &[u32]) -> Option<usize> {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return None;
    }
    let draw = rng.gen_range(0..total);
    let mut cumulative = 0;
    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw < cumulative {
            return Some(idx);
        }
    }
    // Unreachable with consistent weights; kept so a bad weight table can
    // never panic the run.
    None
}

/// Pick `count` distinct elements at random, preserving no particular order
pub fn choose_distinct<'a, T>(rng: &mut impl Rng, pool: &'a [T], count: usize) -> Vec<&'a T> {
    pool.choose_multiple(rng, count.min(pool.len())).collect()
}

/// Generate `n` positive split percentages summing to exactly 100.
///
/// 70% of the time: an even split with any remainder on the first share.
/// 30% of the time: a random split from sorted interior cut-points in
/// [20, 80], retried until every share clears [`MIN_SPLIT_SHARE`] and
/// falling back to the even split when the draw keeps failing.
pub fn split_percentages(rng: &mut impl Rng, n: usize) -> Vec<i64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![100];
    }

    if chance(rng, 70) {
        even_split(n)
    } else {
        random_split(rng, n)
    }
}

/// Even split: 100 / n each, remainder on the first share
pub fn even_split(n: usize) -> Vec<i64> {
    let base = 100 / n as i64;
    let remainder = 100 - base * n as i64;
    let mut shares = vec![base; n];
    shares[0] += remainder;
    shares
}

/// Random split from sorted interior cut-points in [20, 80]
fn random_split(rng: &mut impl Rng, n: usize) -> Vec<i64> {
    for _ in 0..10 {
        let mut cuts: Vec<i64> = (0..n - 1).map(|_| rng.gen_range(20..=80)).collect();
        cuts.sort_unstable();

        let mut shares = Vec::with_capacity(n);
        let mut prev = 0;
        for cut in &cuts {
            shares.push(cut - prev);
            prev = *cut;
        }
        shares.push(100 - prev);

        if shares.iter().all(|s| *s >= MIN_SPLIT_SHARE) {
            return shares;
        }
    }
    even_split(n)
}
