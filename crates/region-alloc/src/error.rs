//! Region and configuration error types.

use std::error::Error;
use std::fmt;

use crate::handle::BlockHandle;

/// Errors that can occur during region and block operations.
///
/// Every variant is an expected, caller-visible failure. None of them leave
/// the allocator in a partially updated state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// A live region already uses this name.
    DuplicateName {
        /// The rejected name.
        name: String,
    },
    /// No live region has this name.
    UnknownRegion {
        /// The name that was looked up.
        name: String,
    },
    /// The requested size is zero after interpreting the caller's input.
    InvalidSize {
        /// The size as the caller supplied it.
        requested: i64,
    },
    /// The operation needs a chosen region and none is chosen.
    NoChosenRegion,
    /// The request exceeds the chosen region's unused byte count.
    InsufficientSpace {
        /// Rounded size of the request in bytes.
        requested: u16,
        /// Bytes not yet handed out in the region.
        available: u16,
    },
    /// Enough bytes are free in total, but no single gap is large enough.
    NoFit {
        /// Rounded size of the request in bytes.
        requested: u16,
    },
    /// The handle does not name a live block.
    UnknownBlock {
        /// The unresolved handle.
        handle: BlockHandle,
    },
    /// The backing buffer for a new region could not be reserved.
    ArenaAllocation {
        /// Capacity that was requested, in bytes.
        requested: u16,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => write!(f, "region '{name}' already exists"),
            Self::UnknownRegion { name } => write!(f, "no region named '{name}'"),
            Self::InvalidSize { requested } => {
                write!(f, "invalid size {requested}: must be positive")
            }
            Self::NoChosenRegion => write!(f, "no region is chosen"),
            Self::InsufficientSpace {
                requested,
                available,
            } => {
                write!(
                    f,
                    "insufficient space: requested {requested} bytes, {available} bytes unused"
                )
            }
            Self::NoFit { requested } => {
                write!(f, "no contiguous gap of {requested} bytes")
            }
            Self::UnknownBlock { handle } => write!(f, "unknown block {handle}"),
            Self::ArenaAllocation { requested } => {
                write!(f, "failed to reserve a {requested} byte arena")
            }
        }
    }
}

impl Error for RegionError {}

/// Errors from [`AllocatorConfig::validate`](crate::AllocatorConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `alignment` is zero.
    ZeroAlignment,
    /// `alignment` is not a power of two.
    AlignmentNotPowerOfTwo {
        /// The configured alignment.
        alignment: u16,
    },
    /// `max_region_size` is zero.
    MaxSizeZero,
    /// `max_region_size` is not a multiple of `alignment`.
    MaxSizeUnaligned {
        /// The configured maximum size.
        max_region_size: u16,
        /// The configured alignment.
        alignment: u16,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAlignment => write!(f, "alignment must be non-zero"),
            Self::AlignmentNotPowerOfTwo { alignment } => {
                write!(f, "alignment must be a power of two (got {alignment})")
            }
            Self::MaxSizeZero => write!(f, "max_region_size must be non-zero"),
            Self::MaxSizeUnaligned {
                max_region_size,
                alignment,
            } => {
                write!(
                    f,
                    "max_region_size {max_region_size} is not a multiple of alignment {alignment}"
                )
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::RegionId;

    #[test]
    fn display_names_the_region() {
        let err = RegionError::DuplicateName {
            name: "Region A".to_string(),
        };
        assert_eq!(err.to_string(), "region 'Region A' already exists");
    }

    #[test]
    fn display_insufficient_space() {
        let err = RegionError::InsufficientSpace {
            requested: 16,
            available: 8,
        };
        assert_eq!(
            err.to_string(),
            "insufficient space: requested 16 bytes, 8 bytes unused"
        );
    }

    #[test]
    fn display_unknown_block_includes_handle() {
        let handle = BlockHandle::new(RegionId::from_raw(3), 64);
        let text = RegionError::UnknownBlock { handle }.to_string();
        assert!(text.contains("region=3"));
        assert!(text.contains("0x0040"));
    }
}
