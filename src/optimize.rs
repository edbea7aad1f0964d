//! Weighted optimization over the members of a family (Knuth's Algorithm B).

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::error::{Result, ZddError};
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// A member of maximum total weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMember {
    /// `{{elements...}}`.
    pub family: ZddId,
    /// Elements of the member, in ascending order.
    pub elements: Vec<Var>,
    /// Sum of the weights of `elements`.
    pub score: i64,
}

impl ZddManager {
    /// Finds a member of `f` maximizing the sum of `weights[e]` over its elements.
    ///
    /// `weights[0]` is ignored; `weights` must cover every registered element.
    /// Among equally good members, the one that leaves out root-most elements wins.
    ///
    /// ```
    /// use zdd_rs::types::Var;
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.union(mgr.singleton([1u32, 3]), mgr.singleton([2u32]));
    /// let best = mgr.best_member(f, &[0, 1, 5, 1]).unwrap();
    /// assert_eq!(best.elements, vec![Var::new(2)]);
    /// assert_eq!(best.score, 5);
    /// ```
    pub fn best_member(&self, f: ZddId, weights: &[i64]) -> Result<BestMember> {
        self.check_family(f)?;
        let required = self.num_elems() as usize + 1;
        if weights.len() < required {
            return Err(ZddError::WeightsTooShort {
                len: weights.len(),
                required,
            });
        }
        if f.is_zero() {
            return Err(ZddError::EmptyFamily { op: "best_member" });
        }

        let buckets = self.collect_by_rank(f);
        // Path sums of up to MAX_ELEMENTS i64 weights always fit in i128.
        let mut score = HashMap::from([(ZddId::ONE, 0i128)]);
        let mut include = HashSet::new();
        for (v, nodes) in buckets.bottom_up() {
            for &n in nodes {
                let node = self.node(n);
                let with = score[&node.hi] + i128::from(weights[v.index()]);
                let best = if node.lo.is_zero() {
                    include.insert(n);
                    with
                } else {
                    let without = score[&node.lo];
                    if with > without {
                        include.insert(n);
                        with
                    } else {
                        without
                    }
                };
                score.insert(n, best);
            }
        }

        let mut elements = Vec::new();
        let mut g = f;
        while !g.is_terminal() {
            let node = self.node(g);
            if include.contains(&g) {
                elements.push(node.var);
                g = node.hi;
            } else {
                g = node.lo;
            }
        }
        debug_assert!(g.is_one());

        let best = score[&f];
        let score = i64::try_from(best).map_err(|_| ZddError::ScoreOutOfRange { score: best })?;
        let res = BestMember {
            family: self.singleton(elements.iter().copied()),
            score,
            elements,
        };
        debug!("best_member({}) -> {:?} with score {}", f, res.elements, res.score);
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::ErrorKind;

    fn family(mgr: &ZddManager, sets: &[&[u32]]) -> ZddId {
        sets.iter()
            .fold(mgr.zero(), |acc, s| mgr.union(acc, mgr.singleton(s.iter().copied())))
    }

    #[test]
    fn test_best_member_picks_heaviest() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1, 3], &[2]]);
        let best = mgr.best_member(f, &[0, 1, 5, 1]).unwrap();
        assert_eq!(best.family, family(&mgr, &[&[2]]));
        assert_eq!(best.elements, vec![Var::new(2)]);
        assert_eq!(best.score, 5);

        let best = mgr.best_member(f, &[0, 3, 1, 3]).unwrap();
        assert_eq!(best.elements, vec![Var::new(1), Var::new(3)]);
        assert_eq!(best.score, 6);
    }

    #[test]
    fn test_best_member_negative_weights() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1], &[2], &[1, 2], &[]]);
        let best = mgr.best_member(f, &[0, -4, -1]).unwrap();
        assert_eq!(best.family, mgr.one());
        assert!(best.elements.is_empty());
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_best_member_ties_exclude() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1], &[2]]);
        let best = mgr.best_member(f, &[0, 2, 2]).unwrap();
        assert_eq!(best.elements, vec![Var::new(2)]);
        assert_eq!(best.score, 2);
    }

    #[test]
    fn test_best_member_large_weights() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1, 2, 3]]);
        let half = i64::MAX / 2;
        let err = mgr.best_member(f, &[0, half, half, half]).unwrap_err();
        assert_eq!(
            err,
            ZddError::ScoreOutOfRange {
                score: 3 * i128::from(half)
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        // A losing path may leave the i64 range as long as the winner does not.
        let f = family(&mgr, &[&[1, 2, 3], &[4]]);
        let low = i64::MIN / 2;
        let best = mgr.best_member(f, &[0, low, low, low, 5]).unwrap();
        assert_eq!(best.elements, vec![Var::new(4)]);
        assert_eq!(best.score, 5);

        let best = mgr.best_member(f, &[0, half, half, -half, 5]).unwrap();
        assert_eq!(best.elements, vec![Var::new(1), Var::new(2), Var::new(3)]);
        assert_eq!(best.score, half);
    }

    #[test]
    fn test_best_member_of_unit() {
        let mgr = ZddManager::new();
        mgr.register_upto(2).unwrap();
        let best = mgr.best_member(mgr.one(), &[0, 1, 1]).unwrap();
        assert_eq!(best.family, mgr.one());
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_best_member_errors() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1, 3]]);

        let err = mgr.best_member(f, &[0, 1, 1]).unwrap_err();
        assert_eq!(err, ZddError::WeightsTooShort { len: 3, required: 4 });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = mgr.best_member(mgr.zero(), &[0, 1, 1, 1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
    }
}
