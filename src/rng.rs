//! Deterministic random source for map generation
//!
//! A Park-Miller minimal standard generator (Schrage's method). Every random
//! decision in the generator flows through one of these, so a seed fully
//! determines the finished map.

const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 16_807;
const QUOTIENT: i64 = 127_773; // MODULUS / MULTIPLIER
const REMAINDER: i64 = 2_836; // MODULUS % MULTIPLIER

/// Park-Miller linear congruential generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapRng {
    state: i64,
}

impl MapRng {
    /// Seed the generator. A seed that reduces to zero would lock the
    /// sequence at zero, so it is replaced by 1.
    pub fn new(seed: u64) -> Self {
        let state = (seed % MODULUS as u64) as i64;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advance and return the next raw value in `1..MODULUS`.
    pub fn next_raw(&mut self) -> u32 {
        let hi = self.state / QUOTIENT;
        let lo = self.state % QUOTIENT;
        let test = MULTIPLIER * lo - REMAINDER * hi;

        self.state = if test > 0 { test } else { test + MODULUS };
        self.state as u32
    }

    /// Uniform integer in the inclusive range between `from` and `to`.
    ///
    /// The bounds may be given in either order. Equal bounds return
    /// immediately without consuming any randomness.
    pub fn number(&mut self, from: i32, to: i32) -> i32 {
        if from == to {
            return from;
        }
        let (lo, hi) = if from > to { (to, from) } else { (from, to) };
        let span = i64::from(hi) - i64::from(lo) + 1;
        (i64::from(self.next_raw()) % span + i64::from(lo)) as i32
    }

    /// True with probability `1 / n` (`!number(0, n - 1)` in generator terms).
    pub fn one_in(&mut self, n: i32) -> bool {
        self.number(0, n - 1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_standard_sequence() {
        // Park & Miller's published check value: seed 1 gives 1043618065
        // after 10000 draws.
        let mut rng = MapRng::new(1);
        assert_eq!(rng.next_raw(), 16_807);

        let mut rng = MapRng::new(1);
        let mut last = 0;
        for _ in 0..10_000 {
            last = rng.next_raw();
        }
        assert_eq!(last, 1_043_618_065);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = MapRng::new(12345);
        let mut b = MapRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.number(0, 1000), b.number(0, 1000));
        }
    }

    #[test]
    fn test_number_is_inclusive() {
        let mut rng = MapRng::new(99);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let n = rng.number(-1, 1);
            assert!((-1..=1).contains(&n));
            seen[(n + 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_number_swapped_bounds_consume_identically() {
        let mut a = MapRng::new(777);
        let mut b = MapRng::new(777);
        for _ in 0..50 {
            assert_eq!(a.number(5, 2), b.number(2, 5));
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_equal_bounds_do_not_consume() {
        let mut rng = MapRng::new(4242);
        let before = rng.clone();
        assert_eq!(rng.number(7, 7), 7);
        assert_eq!(rng, before);
    }

    #[test]
    fn test_zero_seed_does_not_stall() {
        let mut rng = MapRng::new(0);
        let first = rng.next_raw();
        let second = rng.next_raw();
        assert_ne!(first, 0);
        assert_ne!(first, second);
    }
}
