//! Region identities and block handles.
//!
//! A [`BlockHandle`] names one live allocation: the region it was carved
//! from and its start offset within that region's arena. Handles are plain
//! values; they stay cheap to copy and compare, and resolving one always goes
//! through the owning region's block list.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`RegionId`] allocation.
static REGION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a region.
///
/// Allocated from a monotonic counter via [`RegionId::next`]. A region that is
/// destroyed and recreated under the same name receives a fresh ID, so
/// handles into the old region never resolve against the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u64);

impl RegionId {
    /// Allocate a fresh, unique region ID.
    pub fn next() -> Self {
        Self(REGION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw value. Intended for tests and diagnostics.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to a live block, returned by allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    pub(crate) region: RegionId,
    pub(crate) offset: u16,
}

impl BlockHandle {
    /// Create a handle for the block starting at `offset` in `region`.
    pub const fn new(region: RegionId, offset: u16) -> Self {
        Self { region, offset }
    }

    /// The region this block was allocated from.
    pub const fn region(&self) -> RegionId {
        self.region
    }

    /// Start offset of the block within its region's arena.
    pub const fn offset(&self) -> u16 {
        self.offset
    }
}

impl fmt::Display for BlockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block(region={}, {:#06x})", self.region, self.offset)
    }
}
