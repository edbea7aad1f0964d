//! Element labels and the universe size limit.

use std::fmt;

/// Largest number of elements a single universe may register.
pub const MAX_ELEMENTS: u32 = 65_535;

/// An element of the universe (1-indexed).
///
/// The identifier doubles as the element's rank: element 1 sits at the root of
/// every diagram, and each later element sits strictly closer to the terminals.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Reserved zero value, never a registered element.
    pub const ZERO: Var = Var(0);

    /// Creates an element with the given ID.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id == 0`.
    pub const fn new(id: u32) -> Self {
        debug_assert!(id > 0, "Element IDs must be >= 1");
        Var(id)
    }

    /// Returns the raw element ID.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the element ID as `usize`, for indexing per-element tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is the reserved zero value.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Var {
    fn from(id: u32) -> Self {
        Var::new(id)
    }
}

impl From<Var> for u32 {
    fn from(v: Var) -> Self {
        v.0
    }
}
