//! Construction parameters for the manager.

use crate::subtable::DEFAULT_BUCKET_BITS;
use crate::types::MAX_ELEMENTS;

/// Construction parameters for [`ZddManager`][crate::zdd::ZddManager].
///
/// ```
/// use zdd_rs::config::ZddConfig;
/// use zdd_rs::zdd::ZddManager;
///
/// let config = ZddConfig::default().with_capacity(1 << 16).with_max_elements(100);
/// let mgr = ZddManager::with_config(config);
/// assert_eq!(mgr.config().max_elements, 100);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ZddConfig {
    /// Initial capacity of the node arena.
    pub capacity: usize,
    /// Each element's unique table gets `2^bucket_bits` buckets.
    pub bucket_bits: usize,
    /// Upper bound for [`register_upto`][crate::zdd::ZddManager::register_upto].
    pub max_elements: u32,
}

impl Default for ZddConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            bucket_bits: DEFAULT_BUCKET_BITS,
            max_elements: MAX_ELEMENTS,
        }
    }
}

impl ZddConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_bucket_bits(mut self, bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");
        self.bucket_bits = bits;
        self
    }

    /// Limit the universe size. Values above [`MAX_ELEMENTS`] are clamped.
    pub fn with_max_elements(mut self, max_elements: u32) -> Self {
        self.max_elements = max_elements.min(MAX_ELEMENTS);
        self
    }
}
