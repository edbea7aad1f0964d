//! Grouping of the internal nodes of a family by their label.
//!
//! This is the backbone of every bottom-up dynamic program in the crate: after
//! [`ZddManager::collect_by_rank`], walking the buckets from the last element to
//! the first visits each node after both of its children.

use std::collections::HashSet;

use log::trace;

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Internal nodes reachable from one root, bucketed by label.
///
/// `buckets[v]` holds the nodes labelled `v`; bucket 0 is always empty.
#[derive(Debug, Clone, Default)]
pub struct RankBuckets {
    buckets: Vec<Vec<ZddId>>,
}

impl RankBuckets {
    /// Nodes labelled with `var`.
    pub fn bucket(&self, var: Var) -> &[ZddId] {
        self.buckets.get(var.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of bucketed nodes.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Iterates `(label, nodes)` from the terminal-most label to the root-most.
    ///
    /// Every node appears after all of its internal descendants.
    pub fn bottom_up(&self) -> impl Iterator<Item = (Var, &[ZddId])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .map(|(v, nodes)| (Var::new(v as u32), nodes.as_slice()))
    }

    /// Flattened version of [`bottom_up`][Self::bottom_up].
    pub fn nodes_bottom_up(&self) -> impl Iterator<Item = ZddId> + '_ {
        self.bottom_up().flat_map(|(_, nodes)| nodes.iter().copied())
    }
}

impl ZddManager {
    /// Collects every internal node reachable from `f`, each exactly once.
    pub fn collect_by_rank(&self, f: ZddId) -> RankBuckets {
        let mut buckets = vec![Vec::new(); self.num_elems() as usize + 1];
        let mut visited = HashSet::new();
        let mut stack = vec![f];

        while let Some(g) = stack.pop() {
            if g.is_terminal() || !visited.insert(g) {
                continue;
            }
            let node = self.node(g);
            buckets[node.var.index()].push(g);
            stack.push(node.hi);
            stack.push(node.lo);
        }

        trace!("collect_by_rank({}) -> {} nodes", f, visited.len());
        RankBuckets { buckets }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_terminals_have_no_nodes() {
        let mgr = ZddManager::new();
        mgr.register_upto(2).unwrap();
        assert!(mgr.collect_by_rank(mgr.zero()).is_empty());
        assert!(mgr.collect_by_rank(mgr.one()).is_empty());
    }

    #[test]
    fn test_shared_nodes_visited_once() {
        let mgr = ZddManager::new();
        // 2^{1,2,3}: one node per element, each reachable along many paths.
        let ps = mgr.powerset([1u32, 2, 3]);
        let buckets = mgr.collect_by_rank(ps);
        assert_eq!(buckets.len(), 3);
        for v in 1..=3 {
            assert_eq!(buckets.bucket(Var::new(v)).len(), 1);
        }
    }

    #[test]
    fn test_children_come_first() {
        let mgr = ZddManager::new();
        let f = mgr.union(mgr.singleton([1u32, 3]), mgr.union(mgr.singleton([2u32]), mgr.singleton([3u32, 4])));
        let buckets = mgr.collect_by_rank(f);
        assert_eq!(buckets.len(), mgr.node_count(f));

        let order: Vec<ZddId> = buckets.nodes_bottom_up().collect();
        for (i, &n) in order.iter().enumerate() {
            for child in [mgr.lo(n), mgr.hi(n)] {
                if !child.is_terminal() {
                    let pos = order.iter().position(|&m| m == child).unwrap();
                    assert!(pos < i, "child {} must precede {}", child, n);
                }
            }
        }
        assert_eq!(buckets.bottom_up().next().map(|(v, _)| v), Some(Var::new(4)));
    }
}
