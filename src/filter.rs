//! Containment filters: drop the members of one family that are subsets
//! (or supersets) of some member of another family.
//!
//! Both filters recurse on the two diagrams simultaneously, always splitting on
//! the root-most label, and memoize on the ordered pair of operands in the
//! manager-wide computed table.

use std::cmp::Ordering;

use log::trace;

use crate::cache::{CacheKey, OpType};
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

impl ZddManager {
    /// `l ∪ { S ∪ {v} | S ∈ h }`: the family of node `(v, l, h)`.
    ///
    /// Unlike [`get_node`][Self::get_node], `v` need not precede the labels of
    /// `l` and `h`.
    pub fn zuniq(&self, v: Var, l: ZddId, h: ZddId) -> ZddId {
        self.union(l, self.extend(h, v))
    }

    /// Members of `f` that are not a subset of any member of `g`.
    ///
    /// ```
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.union(mgr.singleton([1u32]), mgr.singleton([2u32, 3]));
    /// let g = mgr.singleton([1u32, 2]);
    /// assert_eq!(mgr.nonsubsets(f, g), mgr.singleton([2u32, 3]));
    /// ```
    pub fn nonsubsets(&self, f: ZddId, g: ZddId) -> ZddId {
        trace!("nonsubsets({}, {})", f, g);

        if g.is_zero() {
            return f;
        }
        // ∅ is a subset of every member of a non-empty `g`.
        if f.is_terminal() || f == g {
            return ZddId::ZERO;
        }

        let key = CacheKey::ordered(OpType::NonSubsets, f, g);
        if let Some(res) = self.cache().get(&key) {
            return res;
        }

        let fl = self.node(f);
        let res = match fl.var.id().cmp(&self.rank(g)) {
            Ordering::Less => {
                // No member of `g` contains `fl.var`.
                let lo = self.nonsubsets(fl.lo, g);
                self.zuniq(fl.var, lo, fl.hi)
            }
            Ordering::Greater => {
                let gl = self.node(g);
                let a = self.nonsubsets(f, gl.lo);
                let b = self.nonsubsets(f, gl.hi);
                self.intersection(a, b)
            }
            Ordering::Equal => {
                let gl = self.node(g);
                let a = self.nonsubsets(fl.lo, gl.lo);
                let b = self.nonsubsets(fl.lo, gl.hi);
                let lo = self.intersection(a, b);
                let hi = self.nonsubsets(fl.hi, gl.hi);
                self.zuniq(fl.var, lo, hi)
            }
        };

        self.cache_insert(key, res);
        res
    }

    /// Members of `f` that are not a superset of any member of `g`.
    ///
    /// ```
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.union(mgr.singleton([1u32, 2]), mgr.singleton([3u32]));
    /// let g = mgr.singleton([2u32]);
    /// assert_eq!(mgr.nonsupersets(f, g), mgr.singleton([3u32]));
    /// ```
    pub fn nonsupersets(&self, f: ZddId, g: ZddId) -> ZddId {
        trace!("nonsupersets({}, {})", f, g);

        if g.is_zero() {
            return f;
        }
        // Every set is a superset of ∅ and of itself.
        if f.is_zero() || g.is_one() || f == g {
            return ZddId::ZERO;
        }
        // Members of `g` containing its root label cannot fit inside any member of `f`.
        if self.rank(f) > self.rank(g) {
            return self.nonsupersets(f, self.lo(g));
        }

        let key = CacheKey::ordered(OpType::NonSupersets, f, g);
        if let Some(res) = self.cache().get(&key) {
            return res;
        }

        let fl = self.node(f);
        let res = if fl.var.id() < self.rank(g) {
            let lo = self.nonsupersets(fl.lo, g);
            let hi = self.nonsupersets(fl.hi, g);
            self.zuniq(fl.var, lo, hi)
        } else {
            let gl = self.node(g);
            let lo = self.nonsupersets(fl.lo, gl.lo);
            let a = self.nonsupersets(fl.hi, gl.hi);
            let b = self.nonsupersets(fl.hi, gl.lo);
            let hi = self.intersection(a, b);
            self.zuniq(fl.var, lo, hi)
        };

        self.cache_insert(key, res);
        res
    }
}
