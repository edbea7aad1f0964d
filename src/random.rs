//! Uniform sampling of members via precomputed path counts.

use log::debug;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::error::{Result, ZddError};
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

const MBIG: i64 = 1_000_000_000;
const MSEED: i64 = 161_803_398;
const FAC: f64 = 1.0 / MBIG as f64;

/// Knuth's subtractive generator, in the `ran3` formulation of Numerical Recipes.
///
/// Each instance carries its own state, so two generators built from the same
/// seed yield the same sequence.
#[derive(Debug, Clone)]
pub struct Ran3 {
    ma: [i64; 56],
    inext: usize,
    inextp: usize,
}

impl Ran3 {
    pub fn new(seed: i32) -> Self {
        let mut rng = Self {
            ma: [0; 56],
            inext: 0,
            inextp: 31,
        };
        rng.reseed(seed);
        rng
    }

    /// Restarts the sequence from `seed`. Only `|seed|` matters.
    pub fn reseed(&mut self, seed: i32) {
        let ma = &mut self.ma;
        let mut mj = (MSEED - i64::from(seed).abs()).abs() % MBIG;
        ma[55] = mj;
        let mut mk = 1;
        for i in 1..55 {
            let ii = (21 * i) % 55;
            ma[ii] = mk;
            mk = mj - mk;
            if mk < 0 {
                mk += MBIG;
            }
            mj = ma[ii];
        }
        for _ in 0..4 {
            for i in 1..56 {
                ma[i] -= ma[1 + (i + 30) % 55];
                if ma[i] < 0 {
                    ma[i] += MBIG;
                }
            }
        }
        self.inext = 0;
        self.inextp = 31;
    }

    /// Next variate, uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.inext = self.inext % 55 + 1;
        self.inextp = self.inextp % 55 + 1;
        let mut mj = self.ma[self.inext] - self.ma[self.inextp];
        if mj < 0 {
            mj += MBIG;
        }
        self.ma[self.inext] = mj;
        mj as f64 * FAC
    }
}

/// `lo / (lo + hi)` as an `f64`, for counts of any size.
///
/// Both operands are shifted down to the 53 significant bits an `f64` can hold,
/// so the conversion never reaches infinity.
fn low_fraction(lo: &BigUint, hi: &BigUint) -> f64 {
    let total = lo + hi;
    let shift = total.bits().saturating_sub(f64::MANTISSA_DIGITS as u64);
    let lo = (lo >> shift).to_f64().unwrap_or(0.0);
    let total = (total >> shift).to_f64().unwrap_or(1.0);
    lo / total
}

/// A member drawn by [`ZddManager::random_member`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// `{{labels...}}`.
    pub family: ZddId,
    /// Chosen elements, root-most first.
    pub labels: Vec<Var>,
}

impl ZddManager {
    /// Draws a member of `f` uniformly at random.
    ///
    /// At each node the high branch is taken with probability proportional to
    /// the number of members below it.
    ///
    /// ```
    /// use zdd_rs::random::Ran3;
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.powerset([1u32, 2, 3]);
    /// let mut rng = Ran3::new(7);
    /// let s = mgr.random_member(f, &mut rng).unwrap();
    /// assert!(mgr.contains(f, &s.labels));
    /// ```
    pub fn random_member(&self, f: ZddId, rng: &mut Ran3) -> Result<Sample> {
        self.check_family(f)?;
        if f.is_zero() {
            return Err(ZddError::EmptyFamily { op: "random_member" });
        }

        let mut labels = Vec::new();
        let mut g = f;
        while !g.is_terminal() {
            let node = self.node(g);
            let go_high = if node.lo.is_zero() {
                true
            } else {
                let fraction = low_fraction(&self.count(node.lo), &self.count(node.hi));
                rng.next_f64() > fraction
            };
            if go_high {
                labels.push(node.var);
                g = node.hi;
            } else {
                g = node.lo;
            }
        }
        debug_assert!(g.is_one());

        debug!("random_member({}) -> {:?}", f, labels);
        Ok(Sample {
            family: self.singleton(labels.iter().copied()),
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use test_log::test;

    use super::*;
    use crate::error::ErrorKind;

    fn raw(rng: &mut Ran3) -> i64 {
        (rng.next_f64() * MBIG as f64).round() as i64
    }

    #[test]
    fn test_ran3_known_sequence() {
        let mut rng = Ran3::new(1);
        assert_eq!(raw(&mut rng), 298_227_348);
        assert_eq!(raw(&mut rng), 715_119_168);
        assert_eq!(raw(&mut rng), 33_021_107);

        rng.reseed(42);
        assert_eq!(raw(&mut rng), 634_670_766);
        assert_eq!(raw(&mut rng), 791_644_133);
    }

    #[test]
    fn test_ran3_range() {
        let mut rng = Ran3::new(-7);
        for _ in 0..10_000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_random_member_is_deterministic() {
        let mgr = ZddManager::new();
        let f = mgr.union(mgr.powerset([1u32, 2, 4]), mgr.singleton([3u32, 5]));
        let mut a = Ran3::new(2024);
        let mut b = Ran3::new(2024);
        for _ in 0..50 {
            let s = mgr.random_member(f, &mut a).unwrap();
            assert_eq!(s, mgr.random_member(f, &mut b).unwrap());
            assert!(mgr.contains(f, &s.labels));
            assert_eq!(mgr.intersection(s.family, f), s.family);
        }
    }

    #[test]
    fn test_random_member_covers_family() {
        let mgr = ZddManager::new();
        let f = mgr.powerset([1u32, 2]);
        let mut rng = Ran3::new(5);
        let mut seen: HashMap<Vec<Var>, usize> = HashMap::new();
        for _ in 0..2000 {
            let s = mgr.random_member(f, &mut rng).unwrap();
            *seen.entry(s.labels).or_default() += 1;
        }
        assert_eq!(seen.len(), 4);
        for (set, n) in seen {
            assert!(n > 300, "{:?} drawn only {} times", set, n);
        }
    }

    #[test]
    fn test_low_fraction_of_huge_counts() {
        let one = BigUint::from(1u32);
        assert_eq!(low_fraction(&(&one << 2000), &(&one << 2000)), 0.5);
        assert_eq!(low_fraction(&(&one << 1023), &(&one << 1025)), 0.2);
        assert_eq!(low_fraction(&BigUint::from(1u32), &BigUint::from(3u32)), 0.25);
        let f = low_fraction(&one, &(&one << 3000));
        assert!(f >= 0.0 && f < 1e-300);
    }

    #[test]
    fn test_random_member_over_large_universe() {
        let mgr = ZddManager::new();
        let f = mgr.powerset(1u32..=1100);
        assert!(mgr.count(f).bits() > 1024);

        let mut rng = Ran3::new(3);
        let mut first = 0;
        let mut last = 0;
        for _ in 0..200 {
            let s = mgr.random_member(f, &mut rng).unwrap();
            first += s.labels.contains(&Var::new(1)) as usize;
            last += s.labels.contains(&Var::new(1100)) as usize;
        }
        assert!((60..=140).contains(&first), "element 1 drawn {} times", first);
        assert!((60..=140).contains(&last), "element 1100 drawn {} times", last);
    }

    #[test]
    fn test_random_member_of_singletons() {
        let mgr = ZddManager::new();
        let mut rng = Ran3::new(1);
        assert_eq!(mgr.random_member(mgr.one(), &mut rng).unwrap().family, mgr.one());

        let f = mgr.singleton([2u32, 3]);
        let s = mgr.random_member(f, &mut rng).unwrap();
        assert_eq!(s.family, f);
        assert_eq!(s.labels, vec![Var::new(2), Var::new(3)]);

        let err = mgr.random_member(mgr.zero(), &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
    }
}
