//! Per-element unique table with intrusive collision chains.
//!
//! Every internal node labelled with one element lives in that element's
//! subtable; lookups by `(lo, hi)` are what make the diagram hash-consed.

use crate::node::ZddNode;
use crate::reference::ZddId;

/// Default number of bucket bits (2^10 buckets per element).
pub const DEFAULT_BUCKET_BITS: usize = 10;

/// Buckets for the nodes of a single element.
///
/// Chains are threaded through [`ZddNode::next`]; `buckets` holds the chain heads.
#[derive(Debug, Clone)]
pub struct Subtable {
    buckets: Vec<ZddId>,
    bitmask: u64,
    count: usize,
}

impl Subtable {
    /// Create an empty subtable with `2^bits` buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");
        let num_buckets = 1usize << bits;
        Self {
            buckets: vec![ZddId::INVALID; num_buckets],
            bitmask: (num_buckets - 1) as u64,
            count: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, lo: ZddId, hi: ZddId) -> usize {
        (hash_children(lo, hi) & self.bitmask) as usize
    }

    /// Look up the node with the given children.
    pub fn find(&self, lo: ZddId, hi: ZddId, nodes: &[ZddNode]) -> Option<ZddId> {
        let mut current = self.buckets[self.bucket_index(lo, hi)];
        while current != ZddId::INVALID {
            let node = &nodes[current.index()];
            if node.lo == lo && node.hi == hi {
                return Some(current);
            }
            current = node.next;
        }
        None
    }

    /// Link an already-allocated node into its bucket.
    pub fn insert(&mut self, id: ZddId, nodes: &mut [ZddNode]) {
        let node = nodes[id.index()];
        let bucket = self.bucket_index(node.lo, node.hi);
        nodes[id.index()].next = self.buckets[bucket];
        self.buckets[bucket] = id;
        self.count += 1;
    }

    /// Number of nodes in this subtable.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

// FNV-1a style mixing of the two child indices.
#[inline]
fn hash_children(lo: ZddId, hi: ZddId) -> u64 {
    let mut h = 14695981039346656037u64;
    h ^= lo.raw() as u64;
    h = h.wrapping_mul(1099511628211);
    h ^= hi.raw() as u64;
    h = h.wrapping_mul(1099511628211);
    h
}
