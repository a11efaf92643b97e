//! Random picks for gameplay code.
//!
//! Each helper has a `_with` form taking any [`Rng`]; the short form draws
//! from the thread-local generator.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform integer in `min..=max`. The bounds may come in either order.
pub fn random(min: i64, max: i64) -> i64 {
    random_with(&mut rand::thread_rng(), min, max)
}

pub fn random_with<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Picks a key by cumulative weight against one draw in `[0, 1)`.
///
/// Weights are probabilities and are not normalised: the first key whose
/// running sum reaches the draw wins. When the weights sum below the draw
/// the heaviest key wins, the earliest one on ties. `None` only for an empty
/// table.
pub fn weighted_random<K>(weights: &[(K, f64)]) -> Option<&K> {
    weighted_random_with(&mut rand::thread_rng(), weights)
}

pub fn weighted_random_with<'a, K, R: Rng + ?Sized>(rng: &mut R, weights: &'a [(K, f64)]) -> Option<&'a K> {
    let draw: f64 = rng.r#gen();
    let mut sum = 0.0;
    for (key, weight) in weights {
        sum += weight;
        if draw <= sum {
            return Some(key);
        }
    }

    let mut heaviest: Option<&(K, f64)> = None;
    for entry in weights {
        if heaviest.is_none_or(|best| entry.1 > best.1) {
            heaviest = Some(entry);
        }
    }
    heaviest.map(|(key, _)| key)
}

/// Up to `amount` distinct elements in random order.
pub fn sample<T: Clone>(items: &[T], amount: usize) -> Vec<T> {
    sample_with(&mut rand::thread_rng(), items, amount)
}

pub fn sample_with<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T], amount: usize) -> Vec<T> {
    items.choose_multiple(rng, amount).cloned().collect()
}
