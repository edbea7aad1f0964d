use std::fmt::{Display, Formatter};

/// Handle to a family of sets: the arena slot of its root node.
///
/// The manager hash-conses nodes, so within one manager two handles are equal
/// if and only if their families are equal. Slot 0 is `∅` (no sets) and
/// slot 1 is `{∅}` (only the empty set).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ZddId(u32);

impl ZddId {
    /// `∅`, printed as ⊥.
    pub const ZERO: ZddId = ZddId(0);
    /// `{∅}`, printed as ⊤.
    pub const ONE: ZddId = ZddId(1);
    /// End of a unique-table chain; never a valid family.
    pub const INVALID: ZddId = ZddId(u32::MAX);

    pub const fn new(slot: u32) -> Self {
        ZddId(slot)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self.0, 0 | 1)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == Self::ZERO.0
    }

    pub const fn is_one(self) -> bool {
        self.0 == Self::ONE.0
    }
}

/// Handles default to [`ZddId::INVALID`], which no manager ever hands out.
impl Default for ZddId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl Display for ZddId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            f.write_str("⊥")
        } else if self.is_one() {
            f.write_str("⊤")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

impl From<u32> for ZddId {
    fn from(slot: u32) -> Self {
        Self::new(slot)
    }
}
