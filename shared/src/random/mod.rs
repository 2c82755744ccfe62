//! # Deterministic RNG
//! A linear-congruential generator whose output depends only on its seed.
//! Two peers constructing a [`DeterministicRng`] from the same seed draw the
//! same sequence for any sequence of calls, which is what lets the host
//! replay a remote peer's action bit-for-bit.

pub mod error;

pub use error::RandomError;

const MODULUS: u64 = 1 << 31;
const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterministicRng {
    state: u32,
}

impl DeterministicRng {
    /// Seeds the generator with `max(1, |seed| mod 2^31)`
    pub fn new(seed: i64) -> Self {
        let state = (seed.unsigned_abs() % MODULUS).max(1);
        Self {
            state: state as u32,
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the generator and returns a float in `[0, 1)`
    pub fn next(&mut self) -> f64 {
        let state = (MULTIPLIER * u64::from(self.state) + INCREMENT) % MODULUS;
        self.state = state as u32;
        state as f64 / MODULUS as f64
    }

    /// Integer in `[min, max_exclusive)`; returns `min` when the bounds are equal
    pub fn range(&mut self, min: i64, max_exclusive: i64) -> i64 {
        if min == max_exclusive {
            return min;
        }
        // i128 so spans wider than i64::MAX neither overflow nor wrap
        let span = i128::from(max_exclusive) - i128::from(min);
        let mut offset = (self.next() * span as f64).floor() as i128;
        if span > 0 {
            // f64 rounding of huge spans can land exactly on the bound
            offset = offset.min(span - 1);
        }
        (i128::from(min) + offset) as i64
    }

    /// Float in `[min, max)`
    pub fn float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomError> {
        if items.is_empty() {
            return Err(RandomError::EmptyCollection);
        }
        let index = self.range(0, items.len() as i64) as usize;
        Ok(&items[index])
    }

    /// Picks an item with probability proportional to its weight. Weights
    /// that are negative, zero or not finite never win.
    pub fn weighted_choice<'a, T>(&mut self, items: &'a [(T, f64)]) -> Result<&'a T, RandomError> {
        if items.is_empty() {
            return Err(RandomError::EmptyCollection);
        }
        let usable = |weight: f64| weight.is_finite() && weight > 0.0;
        let total: f64 = items
            .iter()
            .map(|(_, weight)| *weight)
            .filter(|weight| usable(*weight))
            .sum();
        if total <= 0.0 {
            return Err(RandomError::InvalidWeights);
        }

        let mut roll = self.next() * total;
        let mut last_usable = None;
        for (item, weight) in items {
            if !usable(*weight) {
                continue;
            }
            if roll < *weight {
                return Ok(item);
            }
            roll -= *weight;
            last_usable = Some(item);
        }

        // float accumulation can leave a sliver past the final bucket
        last_usable.ok_or(RandomError::InvalidWeights)
    }

    /// Fisher–Yates over a copy of `items`; the input is left untouched
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut output = items.to_vec();
        let mut index = output.len();
        while index > 1 {
            index -= 1;
            let swap_with = self.range(0, index as i64 + 1) as usize;
            output.swap(index, swap_with);
        }
        output
    }

    /// Fair coin
    pub fn boolean(&mut self) -> bool {
        self.chance(0.5)
    }

    /// `true` with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }
}
