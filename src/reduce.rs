//! Bottom-up reductions: minimal sets, maximal sets and minimal hitting sets.
//!
//! Each algorithm is a dynamic program over [`RankBuckets`][crate::topo::RankBuckets]:
//! nodes are resolved from the last element to the first, so both children of
//! a node are already in the memo table when the node itself is reached.
//! The memo tables live only for one call.

use std::collections::HashMap;

use log::debug;

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Members of `f` with no proper subset in `f`.
    ///
    /// ```
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.union(mgr.singleton([2u32]), mgr.singleton([1u32, 2, 3]));
    /// assert_eq!(mgr.minimal(f), mgr.singleton([2u32]));
    /// ```
    pub fn minimal(&self, f: ZddId) -> ZddId {
        if f.is_terminal() {
            return f;
        }

        let buckets = self.collect_by_rank(f);
        let mut memo = HashMap::from([(ZddId::ZERO, ZddId::ZERO), (ZddId::ONE, ZddId::ONE)]);
        for (v, nodes) in buckets.bottom_up() {
            for &n in nodes {
                let node = self.node(n);
                let lo = memo[&node.lo];
                let hi = memo[&node.hi];
                // A high member survives only if no low member fits inside it.
                let kept = self.nonsupersets(hi, lo);
                let res = self.union(lo, self.change(kept, v));
                memo.insert(n, res);
            }
        }

        let res = memo[&f];
        debug!(
            "minimal({}): {} -> {} nodes",
            f,
            buckets.len(),
            self.node_count(res)
        );
        res
    }

    /// Members of `f` with no proper superset in `f`.
    ///
    /// ```
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.union(mgr.singleton([2u32]), mgr.singleton([1u32, 2, 3]));
    /// assert_eq!(mgr.maximal(f), mgr.singleton([1u32, 2, 3]));
    /// ```
    pub fn maximal(&self, f: ZddId) -> ZddId {
        if f.is_terminal() {
            return f;
        }

        let buckets = self.collect_by_rank(f);
        let mut memo = HashMap::from([(ZddId::ZERO, ZddId::ZERO), (ZddId::ONE, ZddId::ONE)]);
        for (v, nodes) in buckets.bottom_up() {
            for &n in nodes {
                let node = self.node(n);
                let lo = memo[&node.lo];
                let hi = memo[&node.hi];
                let covered = self.restrict(lo, hi);
                let res = self.union(self.difference(lo, covered), self.change(hi, v));
                memo.insert(n, res);
            }
        }

        let res = memo[&f];
        debug!(
            "maximal({}): {} -> {} nodes",
            f,
            buckets.len(),
            self.node_count(res)
        );
        res
    }

    /// Minimal transversals of `f`: the inclusion-minimal sets that intersect
    /// every member of `f`.
    ///
    /// `hitting(∅) = {∅}` and `hitting({∅}) = ∅`. For an inclusion-minimal `f`
    /// over the registered universe, `hitting(hitting(f)) == f`.
    ///
    /// ```
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// // {{1, 2}, {3}} is hit minimally by {1, 3} and {2, 3}.
    /// let f = mgr.union(mgr.singleton([1u32, 2]), mgr.singleton([3u32]));
    /// let h = mgr.union(mgr.singleton([1u32, 3]), mgr.singleton([2u32, 3]));
    /// assert_eq!(mgr.hitting(f), h);
    /// assert_eq!(mgr.hitting(h), f);
    /// ```
    pub fn hitting(&self, f: ZddId) -> ZddId {
        if f.is_zero() {
            return ZddId::ONE;
        }
        if f.is_one() {
            return ZddId::ZERO;
        }
        self.minimal(self.hitting_closure(f))
    }

    /// Every subset of the registered universe that intersects all members of `f`.
    ///
    /// The result is closed upward: adding any element to a member keeps it a member.
    pub fn hitting_closure(&self, f: ZddId) -> ZddId {
        let n = self.num_elems();
        if f.is_zero() {
            return self.powerset((1..=n).map(Var::new));
        }
        if f.is_one() {
            return ZddId::ZERO;
        }

        let buckets = self.collect_by_rank(f);
        let mut memo = HashMap::from([(ZddId::ZERO, ZddId::ZERO), (ZddId::ONE, ZddId::ZERO)]);
        for (v, nodes) in buckets.bottom_up() {
            for &id in nodes {
                let node = self.node(id);
                let h = self.pad(memo[&node.hi], v.id(), self.pad_limit(node.hi));
                let res = if node.lo.is_zero() {
                    // Every member contains `v`, so `v` alone hits them all.
                    let free = self.powerset((v.id() + 1..=n).map(Var::new));
                    self.union(h, self.change(free, v))
                } else {
                    let l = self.pad(memo[&node.lo], v.id(), self.pad_limit(node.lo));
                    self.union(self.intersection(h, l), self.change(l, v))
                };
                memo.insert(id, res);
            }
        }

        let res = self.pad(memo[&f], 0, self.var(f).id());
        debug!(
            "hitting_closure({}): {} -> {} nodes",
            f,
            buckets.len(),
            self.node_count(res)
        );
        res
    }

    /// First label that must not be padded in below a child.
    fn pad_limit(&self, child: ZddId) -> u32 {
        if child.is_terminal() {
            self.num_elems() + 1
        } else {
            self.var(child).id()
        }
    }

    /// Closes `r` under adding any element strictly between `above` and `below`.
    fn pad(&self, mut r: ZddId, above: u32, below: u32) -> ZddId {
        for j in (above + 1..below).rev() {
            r = self.union(r, self.change(r, Var::new(j)));
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use test_log::test;

    use super::*;

    fn family(mgr: &ZddManager, sets: &[&[u32]]) -> ZddId {
        sets.iter()
            .fold(mgr.zero(), |acc, s| mgr.union(acc, mgr.singleton(s.iter().copied())))
    }

    #[test]
    fn test_terminals_are_fixed_points() {
        let mgr = ZddManager::new();
        for f in [mgr.zero(), mgr.one()] {
            assert_eq!(mgr.minimal(f), f);
            assert_eq!(mgr.maximal(f), f);
        }
    }

    #[test]
    fn test_two_singletons() {
        let mgr = ZddManager::new();
        mgr.register_upto(2).unwrap();
        let f = family(&mgr, &[&[1], &[2]]);
        assert_eq!(mgr.minimal(f), f);
        assert_eq!(mgr.maximal(f), f);
        assert_eq!(mgr.hitting(f), family(&mgr, &[&[1, 2]]));
    }

    #[test]
    fn test_minimal_drops_supersets() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1, 2], &[2], &[1, 3], &[3, 4], &[1, 2, 4]]);
        assert_eq!(mgr.minimal(f), family(&mgr, &[&[2], &[1, 3], &[3, 4]]));

        let with_empty = mgr.union(f, mgr.one());
        assert_eq!(mgr.minimal(with_empty), mgr.one());
    }

    #[test]
    fn test_maximal_drops_subsets() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1, 2], &[2], &[1, 3], &[3, 4], &[1, 2, 4], &[]]);
        assert_eq!(mgr.maximal(f), family(&mgr, &[&[1, 3], &[3, 4], &[1, 2, 4]]));
    }

    #[test]
    fn test_idempotence() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1, 2], &[2, 3], &[1], &[3, 4, 5], &[2, 5]]);
        let m = mgr.minimal(f);
        assert_eq!(mgr.minimal(m), m);
        let m = mgr.maximal(f);
        assert_eq!(mgr.maximal(m), m);
    }

    #[test]
    fn test_hitting_degenerate() {
        let mgr = ZddManager::new();
        mgr.register_upto(3).unwrap();
        assert_eq!(mgr.hitting(mgr.zero()), mgr.one());
        assert_eq!(mgr.hitting(mgr.one()), mgr.zero());
        // A family containing ∅ cannot be hit.
        assert_eq!(mgr.hitting(family(&mgr, &[&[], &[1]])), mgr.zero());
    }

    #[test]
    fn test_hitting_skips_unused_elements() {
        let mgr = ZddManager::new();
        mgr.register_upto(5).unwrap();
        let f = family(&mgr, &[&[2, 4]]);
        assert_eq!(mgr.hitting(f), family(&mgr, &[&[2], &[4]]));

        let closure = mgr.hitting_closure(f);
        // 2^5 subsets, minus the 2^3 that avoid both 2 and 4.
        assert_eq!(mgr.count(closure), BigUint::from(32u32 - 8));
    }

    #[test]
    fn test_hitting_duality() {
        let mgr = ZddManager::new();
        mgr.register_upto(5).unwrap();
        let f = family(&mgr, &[&[1, 2], &[2, 3], &[3, 4], &[4, 5], &[1, 5]]);
        let h = mgr.hitting(f);
        assert_eq!(mgr.hitting(h), f);
    }
}
