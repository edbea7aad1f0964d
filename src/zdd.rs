//! The ZDD manager: node arena, universe registry and base set algebra.
//!
//! Every family is a [`ZddId`] handle into one manager's arena. The manager
//! hash-conses nodes, so handle equality is family equality, and it owns every
//! memo table used by the algorithms in the sibling modules.
//!
//! # Quick Start
//!
//! ```
//! use num_bigint::BigUint;
//! use zdd_rs::zdd::ZddManager;
//!
//! let mgr = ZddManager::new();
//!
//! let x1 = mgr.element_family(1).unwrap(); // {{1}}
//! let x2 = mgr.element_family(2).unwrap(); // {{2}}
//!
//! let union = mgr.union(x1, x2); // {{1}, {2}}
//! let joined = mgr.join(x1, x2); // {{1, 2}}
//!
//! assert_eq!(mgr.count(union), BigUint::from(2u32));
//! assert_eq!(mgr.hitting(union), joined);
//! ```

use std::cell::{Cell, RefCell};
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

use log::{debug, trace};

use crate::cache::{Cache, CacheKey, ChangeCache, CountCache, OpType};
use crate::config::ZddConfig;
use crate::error::{Result, ZddError};
use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::subtable::Subtable;
use crate::types::Var;

/// Owner of all nodes of all families built from one universe.
///
/// - **Uniqueness**: identical `(var, lo, hi)` triples are stored once;
/// - **Zero-suppression**: nodes with `hi = ⊥` are never created;
/// - **Fixed order**: element `i` is always tested before element `i + 1`.
///
/// The manager is single-threaded: interior mutability goes through `RefCell`,
/// so it is `!Sync`. Handles (`ZddId`) are plain indices and may be sent
/// anywhere, but they only mean something to the manager that produced them.
pub struct ZddManager {
    config: ZddConfig,

    /// Node storage. Index 0 = ZERO terminal, Index 1 = ONE terminal.
    nodes: RefCell<Vec<ZddNode>>,

    /// Unique tables, `subtables[i - 1]` for element `i`.
    subtables: RefCell<Vec<Subtable>>,

    /// Number of registered elements.
    num_elems: Cell<u32>,

    cache: RefCell<Cache>,
    change_cache: RefCell<ChangeCache>,
    pub(crate) count_cache: RefCell<CountCache>,
}

impl Default for ZddManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ZddManager {
    pub fn new() -> Self {
        Self::with_config(ZddConfig::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(ZddConfig::default().with_capacity(capacity))
    }

    pub fn with_config(config: ZddConfig) -> Self {
        let mut nodes = Vec::with_capacity(config.capacity.max(2));
        nodes.push(ZddNode::terminal()); // ZERO
        nodes.push(ZddNode::terminal()); // ONE

        Self {
            cache: RefCell::new(Cache::with_capacity(config.capacity)),
            config,
            nodes: RefCell::new(nodes),
            subtables: RefCell::new(Vec::new()),
            num_elems: Cell::new(0),
            change_cache: RefCell::new(ChangeCache::default()),
            count_cache: RefCell::new(CountCache::default()),
        }
    }

    pub fn config(&self) -> &ZddConfig {
        &self.config
    }

    pub fn cache(&self) -> std::cell::Ref<'_, Cache> {
        self.cache.borrow()
    }

    pub(crate) fn cache_insert(&self, key: CacheKey, res: ZddId) {
        self.cache.borrow_mut().insert(key, res);
    }

    /// Drops every memo table. Results stay valid; only future work gets slower.
    pub fn clear_caches(&self) {
        debug!("clear_caches: dropping {} cached operations", self.cache.borrow().len());
        self.cache.borrow_mut().clear();
        self.change_cache.borrow_mut().clear();
        self.count_cache.borrow_mut().clear();
    }
}

// Terminals and accessors
impl ZddManager {
    /// The empty family (⊥).
    pub fn zero(&self) -> ZddId {
        ZddId::ZERO
    }

    /// The family containing only the empty set (⊤).
    pub fn one(&self) -> ZddId {
        ZddId::ONE
    }

    pub fn is_zero(&self, f: ZddId) -> bool {
        f.is_zero()
    }

    pub fn is_one(&self, f: ZddId) -> bool {
        f.is_one()
    }

    pub fn is_terminal(&self, f: ZddId) -> bool {
        f.is_terminal()
    }

    pub fn node(&self, f: ZddId) -> ZddNode {
        self.nodes.borrow()[f.index()]
    }

    /// Label of an internal node.
    pub fn var(&self, f: ZddId) -> Var {
        debug_assert!(!f.is_terminal(), "terminals have no label");
        self.node(f).var
    }

    pub fn lo(&self, f: ZddId) -> ZddId {
        debug_assert!(!f.is_terminal(), "terminals have no children");
        self.node(f).lo
    }

    pub fn hi(&self, f: ZddId) -> ZddId {
        debug_assert!(!f.is_terminal(), "terminals have no children");
        self.node(f).hi
    }

    /// Position of the root of `f` in the variable order.
    ///
    /// Terminals rank after every element.
    pub(crate) fn rank(&self, f: ZddId) -> u32 {
        if f.is_terminal() {
            u32::MAX
        } else {
            self.var(f).id()
        }
    }

    /// Fails unless `f` was produced by this manager.
    pub fn check_family(&self, f: ZddId) -> Result<()> {
        if f.index() < self.nodes.borrow().len() {
            Ok(())
        } else {
            Err(ZddError::UnknownFamily(f))
        }
    }

    /// Total number of nodes in the arena, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Number of distinct internal nodes reachable from `f`.
    pub fn node_count(&self, f: ZddId) -> usize {
        let mut visited = HashSet::new();
        let mut stack = vec![f];
        while let Some(g) = stack.pop() {
            if g.is_terminal() || !visited.insert(g) {
                continue;
            }
            let node = self.node(g);
            stack.push(node.lo);
            stack.push(node.hi);
        }
        visited.len()
    }
}

// Universe registry
impl ZddManager {
    /// Number of registered elements.
    pub fn num_elems(&self) -> u32 {
        self.num_elems.get()
    }

    /// Registers the next element, placing it after all existing ones.
    fn new_var(&self) -> Var {
        let id = self.num_elems.get() + 1;
        self.subtables.borrow_mut().push(Subtable::new(self.config.bucket_bits));
        self.num_elems.set(id);
        trace!("new_var -> {}", id);
        Var::new(id)
    }

    /// Ensures elements `1..=element` exist.
    ///
    /// Fails if `element` is zero or above the configured maximum.
    pub fn register_upto(&self, element: u32) -> Result<()> {
        let max = self.config.max_elements;
        if element == 0 || element > max {
            return Err(ZddError::ElementOutOfRange { element, max });
        }
        if element > self.num_elems() {
            debug!("register_upto: growing universe {} -> {}", self.num_elems(), element);
        }
        while self.num_elems() < element {
            self.new_var();
        }
        Ok(())
    }

    /// The family `{{element}}`, registering the element first if needed.
    pub fn element_family(&self, element: u32) -> Result<ZddId> {
        self.register_upto(element)?;
        Ok(self.get_node(Var::new(element), ZddId::ZERO, ZddId::ONE))
    }

    fn ensure_var(&self, var: Var) {
        assert!(
            !var.is_zero() && var.id() <= self.config.max_elements,
            "Element {} is out of range 1..={}",
            var,
            self.config.max_elements
        );
        while self.num_elems() < var.id() {
            self.new_var();
        }
    }

    /// Every subset of the registered universe that is not a member of `f`.
    pub fn complement_of(&self, f: ZddId) -> Result<ZddId> {
        self.check_family(f)?;
        let universe = self.powerset((1..=self.num_elems()).map(Var::new));
        let res = self.difference(universe, f);
        debug!(
            "complement_of({}) over {} elements -> {} ({} nodes)",
            f,
            self.num_elems(),
            res,
            self.node_count(res)
        );
        Ok(res)
    }
}

// Node construction
impl ZddManager {
    /// Returns the unique node `(var, lo, hi)`, creating it if needed.
    ///
    /// Applies the zero-suppression rule: `hi = ⊥` yields `lo`.
    pub fn get_node(&self, var: Var, lo: ZddId, hi: ZddId) -> ZddId {
        assert!(!var.is_zero(), "Variable index should not be zero");
        if hi.is_zero() {
            return lo;
        }
        debug_assert!(var.id() < self.rank(lo), "lo child must be below {}", var);
        debug_assert!(var.id() < self.rank(hi), "hi child must be below {}", var);
        self.ensure_var(var);

        {
            let subtables = self.subtables.borrow();
            let nodes = self.nodes.borrow();
            if let Some(id) = subtables[var.index() - 1].find(lo, hi, &nodes) {
                return id;
            }
        }

        let mut nodes = self.nodes.borrow_mut();
        let id = ZddId::new(nodes.len() as u32);
        nodes.push(ZddNode::new(var, lo, hi));
        self.subtables.borrow_mut()[var.index() - 1].insert(id, &mut nodes);
        id
    }

    /// `{{var}}`.
    pub fn base(&self, var: impl Into<Var>) -> ZddId {
        self.get_node(var.into(), ZddId::ZERO, ZddId::ONE)
    }

    /// `{{v1, ..., vn}}`: the family whose only member is the given set.
    pub fn singleton(&self, vars: impl IntoIterator<Item = impl Into<Var>>) -> ZddId {
        let mut vars: Vec<Var> = vars.into_iter().map(Into::into).collect();
        vars.sort_unstable_by_key(|&v| Reverse(v));
        vars.dedup();
        vars.into_iter().fold(ZddId::ONE, |acc, v| self.get_node(v, ZddId::ZERO, acc))
    }

    /// `2^{vars}`: every subset of the given elements.
    pub fn powerset(&self, vars: impl IntoIterator<Item = impl Into<Var>>) -> ZddId {
        let mut vars: Vec<Var> = vars.into_iter().map(Into::into).collect();
        vars.sort_unstable_by_key(|&v| Reverse(v));
        vars.dedup();
        vars.into_iter().fold(ZddId::ONE, |acc, v| self.get_node(v, acc, acc))
    }
}

// Set algebra
impl ZddManager {
    /// `F ∪ G`.
    pub fn union(&self, f: ZddId, g: ZddId) -> ZddId {
        trace!("union({}, {})", f, g);

        if f.is_zero() {
            return g;
        }
        if g.is_zero() || f == g {
            return f;
        }

        let key = CacheKey::commutative(OpType::Union, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let res = match self.rank(f).cmp(&self.rank(g)) {
            Ordering::Less => {
                let n = self.node(f);
                let lo = self.union(n.lo, g);
                self.get_node(n.var, lo, n.hi)
            }
            Ordering::Greater => {
                let n = self.node(g);
                let lo = self.union(f, n.lo);
                self.get_node(n.var, lo, n.hi)
            }
            Ordering::Equal => {
                // Both internal with the same label (two distinct terminals are ZERO and ONE).
                let (fl, gl) = (self.node(f), self.node(g));
                let lo = self.union(fl.lo, gl.lo);
                let hi = self.union(fl.hi, gl.hi);
                self.get_node(fl.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// `F ∩ G`.
    pub fn intersection(&self, f: ZddId, g: ZddId) -> ZddId {
        trace!("intersection({}, {})", f, g);

        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f == g {
            return f;
        }
        if f.is_one() {
            return if self.contains_empty(g) { ZddId::ONE } else { ZddId::ZERO };
        }
        if g.is_one() {
            return if self.contains_empty(f) { ZddId::ONE } else { ZddId::ZERO };
        }

        let key = CacheKey::commutative(OpType::Intersection, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let (fl, gl) = (self.node(f), self.node(g));
        let res = match fl.var.cmp(&gl.var) {
            Ordering::Less => self.intersection(fl.lo, g),
            Ordering::Greater => self.intersection(f, gl.lo),
            Ordering::Equal => {
                let lo = self.intersection(fl.lo, gl.lo);
                let hi = self.intersection(fl.hi, gl.hi);
                self.get_node(fl.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// `F \ G`.
    pub fn difference(&self, f: ZddId, g: ZddId) -> ZddId {
        trace!("difference({}, {})", f, g);

        if f.is_zero() || f == g {
            return ZddId::ZERO;
        }
        if g.is_zero() {
            return f;
        }
        if f.is_one() {
            return if self.contains_empty(g) { ZddId::ZERO } else { ZddId::ONE };
        }

        let key = CacheKey::ordered(OpType::Difference, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let fl = self.node(f);
        let res = match fl.var.id().cmp(&self.rank(g)) {
            Ordering::Less => {
                let lo = self.difference(fl.lo, g);
                self.get_node(fl.var, lo, fl.hi)
            }
            Ordering::Greater => self.difference(f, self.lo(g)),
            Ordering::Equal => {
                let gl = self.node(g);
                let lo = self.difference(fl.lo, gl.lo);
                let hi = self.difference(fl.hi, gl.hi);
                self.get_node(fl.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// `{ S ∪ T | S ∈ F, T ∈ G }`.
    pub fn join(&self, f: ZddId, g: ZddId) -> ZddId {
        trace!("join({}, {})", f, g);

        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return g;
        }
        if g.is_one() {
            return f;
        }

        let key = CacheKey::commutative(OpType::Join, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let (fl, gl) = (self.node(f), self.node(g));
        let res = match fl.var.cmp(&gl.var) {
            Ordering::Less => {
                let lo = self.join(fl.lo, g);
                let hi = self.join(fl.hi, g);
                self.get_node(fl.var, lo, hi)
            }
            Ordering::Greater => {
                let lo = self.join(f, gl.lo);
                let hi = self.join(f, gl.hi);
                self.get_node(gl.var, lo, hi)
            }
            Ordering::Equal => {
                let lo = self.join(fl.lo, gl.lo);
                let hi_lo = self.join(fl.hi, gl.lo);
                let lo_hi = self.join(fl.lo, gl.hi);
                let hi_hi = self.join(fl.hi, gl.hi);
                let hi = self.union(hi_lo, self.union(lo_hi, hi_hi));
                self.get_node(fl.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// `{ S ∪ {var} | S ∈ F }`.
    pub fn extend(&self, f: ZddId, var: Var) -> ZddId {
        if f.is_zero() {
            return ZddId::ZERO;
        }
        self.join(f, self.base(var))
    }

    /// Toggles `var` in every member of `F`.
    pub fn change(&self, f: ZddId, var: Var) -> ZddId {
        trace!("change({}, {})", f, var);

        if f.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return self.base(var);
        }
        if let Some(res) = self.change_cache.borrow().get(f, var) {
            return res;
        }

        let n = self.node(f);
        let res = match n.var.cmp(&var) {
            Ordering::Less => {
                let lo = self.change(n.lo, var);
                let hi = self.change(n.hi, var);
                self.get_node(n.var, lo, hi)
            }
            Ordering::Equal => self.get_node(var, n.hi, n.lo),
            Ordering::Greater => self.get_node(var, ZddId::ZERO, f),
        };

        self.change_cache.borrow_mut().insert(f, var, res);
        res
    }

    /// Members of `F` that are subsets of at least one member of `G`.
    pub fn restrict(&self, f: ZddId, g: ZddId) -> ZddId {
        trace!("restrict({}, {})", f, g);

        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() || f == g {
            return f;
        }
        if g.is_one() {
            return if self.contains_empty(f) { ZddId::ONE } else { ZddId::ZERO };
        }

        let key = CacheKey::ordered(OpType::Restrict, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let (fl, gl) = (self.node(f), self.node(g));
        let res = match fl.var.cmp(&gl.var) {
            // No member of G contains f's label.
            Ordering::Less => self.restrict(fl.lo, g),
            Ordering::Greater => {
                let a = self.restrict(f, gl.lo);
                let b = self.restrict(f, gl.hi);
                self.union(a, b)
            }
            Ordering::Equal => {
                let a = self.restrict(fl.lo, gl.lo);
                let b = self.restrict(fl.lo, gl.hi);
                let lo = self.union(a, b);
                let hi = self.restrict(fl.hi, gl.hi);
                self.get_node(fl.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }
}

// Queries
impl ZddManager {
    /// Returns true if the family contains the empty set.
    pub fn contains_empty(&self, mut f: ZddId) -> bool {
        while !f.is_terminal() {
            f = self.lo(f);
        }
        f.is_one()
    }

    /// Returns true if `set` is a member of `f`.
    pub fn contains(&self, f: ZddId, set: &[Var]) -> bool {
        let mut set = set.to_vec();
        set.sort_unstable();
        set.dedup();

        let mut current = f;
        for var in set {
            loop {
                if current.is_terminal() {
                    return false;
                }
                let n = self.node(current);
                match n.var.cmp(&var) {
                    Ordering::Less => current = n.lo,
                    Ordering::Equal => {
                        current = n.hi;
                        break;
                    }
                    Ordering::Greater => return false,
                }
            }
        }
        self.contains_empty(current)
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
    fn test_terminals() {
        let mgr = ZddManager::new();
        assert!(mgr.is_zero(mgr.zero()));
        assert!(mgr.is_one(mgr.one()));
        assert!(mgr.is_terminal(mgr.zero()));
        assert!(mgr.is_terminal(mgr.one()));
        assert_eq!(mgr.num_nodes(), 2);
    }

    #[test]
    fn test_register_upto() {
        let mgr = ZddManager::new();
        assert_eq!(mgr.num_elems(), 0);
        mgr.register_upto(3).unwrap();
        assert_eq!(mgr.num_elems(), 3);
        mgr.register_upto(2).unwrap();
        assert_eq!(mgr.num_elems(), 3);

        let err = mgr.register_upto(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_register_upto_respects_max() {
        let mgr = ZddManager::with_config(ZddConfig::default().with_max_elements(4));
        assert!(mgr.register_upto(4).is_ok());
        assert_eq!(
            mgr.register_upto(5),
            Err(ZddError::ElementOutOfRange { element: 5, max: 4 })
        );
        assert_eq!(mgr.num_elems(), 4);
    }

    #[test]
    fn test_element_family() {
        let mgr = ZddManager::new();
        let x3 = mgr.element_family(3).unwrap();
        assert_eq!(mgr.num_elems(), 3);
        assert_eq!(mgr.var(x3), Var::new(3));
        assert_eq!(mgr.lo(x3), ZddId::ZERO);
        assert_eq!(mgr.hi(x3), ZddId::ONE);
        assert_eq!(mgr.element_family(3).unwrap(), x3);
    }

    #[test]
    fn test_hash_consing() {
        let mgr = ZddManager::new();
        let a = family(&mgr, &[&[1, 2], &[3]]);
        let b = family(&mgr, &[&[3], &[2, 1]]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_union_intersection_difference() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1], &[2], &[1, 2]]);
        let g = family(&mgr, &[&[2], &[3], &[]]);

        assert_eq!(mgr.union(f, g), family(&mgr, &[&[], &[1], &[2], &[3], &[1, 2]]));
        assert_eq!(mgr.intersection(f, g), family(&mgr, &[&[2]]));
        assert_eq!(mgr.difference(f, g), family(&mgr, &[&[1], &[1, 2]]));
        assert_eq!(mgr.difference(g, f), family(&mgr, &[&[], &[3]]));
        assert_eq!(mgr.intersection(g, mgr.one()), mgr.one());
    }

    #[test]
    fn test_join_and_extend() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1], &[2]]);
        let g = family(&mgr, &[&[], &[3]]);
        assert_eq!(mgr.join(f, g), family(&mgr, &[&[1], &[2], &[1, 3], &[2, 3]]));
        assert_eq!(mgr.extend(g, Var::new(2)), family(&mgr, &[&[2], &[2, 3]]));
        assert_eq!(mgr.extend(f, Var::new(2)), family(&mgr, &[&[1, 2], &[2]]));
    }

    #[test]
    fn test_change() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1], &[2, 3]]);
        assert_eq!(mgr.change(f, Var::new(2)), family(&mgr, &[&[1, 2], &[3]]));
        assert_eq!(mgr.change(mgr.one(), Var::new(4)), mgr.base(4));
        assert_eq!(mgr.change(mgr.change(f, Var::new(1)), Var::new(1)), f);
    }

    #[test]
    fn test_restrict() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[], &[1], &[2], &[1, 3], &[4]]);
        let g = family(&mgr, &[&[1, 2, 3]]);
        assert_eq!(mgr.restrict(f, g), family(&mgr, &[&[], &[1], &[2], &[1, 3]]));
        assert_eq!(mgr.restrict(f, mgr.one()), mgr.one());
        assert_eq!(mgr.restrict(f, mgr.zero()), mgr.zero());
    }

    #[test]
    fn test_powerset_and_complement() {
        let mgr = ZddManager::new();
        mgr.register_upto(3).unwrap();
        let f = family(&mgr, &[&[1], &[2, 3]]);

        let all = mgr.powerset([1u32, 2, 3]);
        assert_eq!(mgr.node_count(all), 3);

        let c = mgr.complement_of(f).unwrap();
        assert_eq!(mgr.union(c, f), all);
        assert_eq!(mgr.intersection(c, f), mgr.zero());
        assert_eq!(mgr.complement_of(c).unwrap(), f);
    }

    #[test]
    fn test_complement_rejects_foreign_handle() {
        let mgr = ZddManager::new();
        assert_eq!(
            mgr.complement_of(ZddId::new(1000)),
            Err(ZddError::UnknownFamily(ZddId::new(1000)))
        );
    }

    #[test]
    fn test_contains() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1], &[2, 3]]);
        assert!(mgr.contains(f, &[Var::new(1)]));
        assert!(mgr.contains(f, &[Var::new(3), Var::new(2)]));
        assert!(!mgr.contains(f, &[Var::new(2)]));
        assert!(!mgr.contains(f, &[]));
        assert!(!mgr.contains(f, &[Var::new(5)]));
        assert!(mgr.contains_empty(mgr.union(f, mgr.one())));
    }

    #[test]
    fn test_clear_caches_keeps_results() {
        let mgr = ZddManager::new();
        let f = family(&mgr, &[&[1], &[2]]);
        let g = family(&mgr, &[&[2], &[3]]);
        let u = mgr.union(f, g);
        assert!(!mgr.cache().is_empty());
        mgr.clear_caches();
        assert!(mgr.cache().is_empty());
        assert_eq!(mgr.union(f, g), u);
    }
}
