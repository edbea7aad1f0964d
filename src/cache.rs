//! Memo tables owned by the manager.
//!
//! Entries are keyed by node identity. Identities are never recycled (the arena
//! only grows), so an entry stays valid for the lifetime of its manager.

use std::cell::Cell;
use std::collections::HashMap;

use num_bigint::BigUint;

use crate::reference::ZddId;
use crate::types::Var;

/// Binary operations whose results are memoized in [`Cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    Union,
    Intersection,
    Difference,
    Join,
    Restrict,
    NonSubsets,
    NonSupersets,
}

/// Cache key for binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: OpType,
    pub f: ZddId,
    pub g: ZddId,
}

impl CacheKey {
    /// Key for a commutative operation: operand order is normalized.
    pub fn commutative(op: OpType, f: ZddId, g: ZddId) -> Self {
        let (f, g) = if f <= g { (f, g) } else { (g, f) };
        Self { op, f, g }
    }

    /// Key for an operation whose operands must not be swapped.
    pub fn ordered(op: OpType, f: ZddId, g: ZddId) -> Self {
        Self { op, f, g }
    }
}

/// Computed table for binary operations, with hit/miss statistics.
#[derive(Debug, Default)]
pub struct Cache {
    map: HashMap<CacheKey, ZddId>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Look up a cached result, updating the statistics.
    pub fn get(&self, key: &CacheKey) -> Option<ZddId> {
        let res = self.map.get(key).copied();
        match res {
            Some(_) => self.hits.set(self.hits.get() + 1),
            None => self.misses.set(self.misses.get() + 1),
        }
        res
    }

    pub fn insert(&mut self, key: CacheKey, value: ZddId) {
        self.map.insert(key, value);
    }

    /// Number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    /// Number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Memo table for the element toggle `change(f, var)`.
#[derive(Debug, Default)]
pub struct ChangeCache {
    map: HashMap<(ZddId, Var), ZddId>,
}

impl ChangeCache {
    pub fn get(&self, f: ZddId, var: Var) -> Option<ZddId> {
        self.map.get(&(f, var)).copied()
    }

    pub fn insert(&mut self, f: ZddId, var: Var, value: ZddId) {
        self.map.insert((f, var), value);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Per-node cardinalities, shared by counting and random sampling.
#[derive(Debug, Default)]
pub struct CountCache {
    map: HashMap<ZddId, BigUint>,
}

impl CountCache {
    pub fn get(&self, id: ZddId) -> Option<BigUint> {
        self.map.get(&id).cloned()
    }

    pub fn insert(&mut self, id: ZddId, count: BigUint) {
        self.map.insert(id, count);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
