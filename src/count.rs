//! Exact member counting (Knuth's Algorithm C) with arbitrary-precision results.

use num_bigint::BigUint;

use crate::reference::ZddId;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Exact number of member sets in `f` (Knuth's Algorithm C).
    ///
    /// Per-node counts are kept in a manager-wide cache and reused by
    /// [`random_member`][Self::random_member].
    pub fn count(&self, f: ZddId) -> BigUint {
        if f.is_zero() {
            return BigUint::ZERO;
        }
        if f.is_one() {
            return BigUint::from(1u32);
        }

        if let Some(res) = self.count_cache.borrow().get(f) {
            return res;
        }

        let node = self.node(f);
        let res = self.count(node.lo) + self.count(node.hi);

        self.count_cache.borrow_mut().insert(f, res.clone());
        res
    }
}
