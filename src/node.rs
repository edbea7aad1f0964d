//! Arena record of one internal node.

use crate::reference::ZddId;
use crate::types::Var;

/// An arena record for one internal node.
///
/// Denotes the family `F(lo) ∪ { S ∪ {var} | S ∈ F(hi) }`.
///
/// Invariants maintained by [`ZddManager::get_node`][crate::zdd::ZddManager::get_node]:
/// - `hi` is never `ZddId::ZERO` (zero-suppression);
/// - every internal child carries a label strictly greater than `var`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ZddNode {
    /// Element tested at this node.
    pub var: Var,
    /// Sets not containing `var`.
    pub lo: ZddId,
    /// Sets containing `var`, with `var` removed.
    pub hi: ZddId,
    /// Next node in the unique-table collision chain.
    pub next: ZddId,
}

impl ZddNode {
    pub fn new(var: Var, lo: ZddId, hi: ZddId) -> Self {
        debug_assert!(!hi.is_zero(), "ZDD node cannot have hi=ZERO (zero-suppression rule)");
        Self {
            var,
            lo,
            hi,
            next: ZddId::INVALID,
        }
    }

    /// Placeholder record stored at the terminal indices.
    pub const fn terminal() -> Self {
        Self {
            var: Var::ZERO,
            lo: ZddId::INVALID,
            hi: ZddId::INVALID,
            next: ZddId::INVALID,
        }
    }
}
