//! Enumeration of the members of a family.
//!
//! All of these visit every member, so they are only practical for small
//! families. Members come out high branch first, elements in ascending order.

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Lazy depth-first iterator over the members of a family.
pub struct SetIterator<'a> {
    mgr: &'a ZddManager,
    /// Shared prefix of the current path.
    path: Vec<Var>,
    /// Pending `(node, path length, label to push on entry)` frames.
    stack: Vec<(ZddId, usize, Option<Var>)>,
}

impl<'a> SetIterator<'a> {
    pub fn new(mgr: &'a ZddManager, root: ZddId) -> Self {
        Self {
            mgr,
            path: Vec::new(),
            stack: vec![(root, 0, None)],
        }
    }
}

impl Iterator for SetIterator<'_> {
    type Item = Vec<Var>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, len, label)) = self.stack.pop() {
            self.path.truncate(len);
            if let Some(v) = label {
                self.path.push(v);
            }
            if id.is_zero() {
                continue;
            }
            if id.is_one() {
                return Some(self.path.clone());
            }

            let node = self.mgr.node(id);
            let len = self.path.len();
            self.stack.push((node.lo, len, None));
            self.stack.push((node.hi, len, Some(node.var)));
        }
        None
    }
}

impl ZddManager {
    /// Calls `visit` once per member of `f`.
    pub fn for_each_member(&self, f: ZddId, mut visit: impl FnMut(&[Var])) {
        let mut labels = Vec::new();
        self.for_each_member_rec(f, &mut labels, &mut visit);
    }

    fn for_each_member_rec(&self, f: ZddId, labels: &mut Vec<Var>, visit: &mut impl FnMut(&[Var])) {
        if f.is_zero() {
            return;
        }
        if f.is_one() {
            visit(labels.as_slice());
            return;
        }
        let node = self.node(f);
        labels.push(node.var);
        self.for_each_member_rec(node.hi, labels, visit);
        labels.pop();
        self.for_each_member_rec(node.lo, labels, visit);
    }

    /// ```
    /// use zdd_rs::types::Var;
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.union(mgr.base(1), mgr.one());
    /// let sets: Vec<_> = mgr.iter_sets(f).collect();
    /// assert_eq!(sets, vec![vec![Var::new(1)], vec![]]);
    /// ```
    pub fn iter_sets(&self, f: ZddId) -> SetIterator<'_> {
        SetIterator::new(self, f)
    }

    pub fn collect_sets(&self, f: ZddId) -> Vec<Vec<Var>> {
        self.iter_sets(f).collect()
    }

    /// Renders `f` as `{{1,2},{3}}`; `∅` is `{}` and `{∅}` is `{{}}`.
    pub fn to_bracket_string(&self, f: ZddId) -> String {
        let mut out = String::from("{");
        let mut first = true;
        self.for_each_member(f, |set| {
            if !first {
                out.push(',');
            }
            first = false;
            out.push('{');
            for (i, v) in set.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&v.to_string());
            }
            out.push('}');
        });
        out.push('}');
        out
    }
}
