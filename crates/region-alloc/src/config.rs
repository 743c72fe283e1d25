//! Allocator configuration parameters and size arithmetic.
//!
//! Every size the allocator records (region capacities and block sizes) is a
//! multiple of [`AllocatorConfig::alignment`] and never exceeds
//! [`AllocatorConfig::max_region_size`]. The helpers here are the single
//! place where caller-supplied sizes are turned into recorded sizes.

use crate::error::ConfigError;

/// Block alignment granularity in bytes.
pub const BLOCK_ALIGNMENT: u16 = 8;

/// Largest representable region (and block) size in bytes.
///
/// The largest multiple of [`BLOCK_ALIGNMENT`] that fits in a `u16`.
pub const MAX_REGION_SIZE: u16 = u16::MAX - (u16::MAX % BLOCK_ALIGNMENT);

/// Configuration for a [`RegionAllocator`](crate::RegionAllocator).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Granularity every recorded size is rounded up to.
    ///
    /// Default: 8. Must be a non-zero power of two.
    pub alignment: u16,

    /// Upper bound on region capacity and block size.
    ///
    /// Default: 65,528. Must be a non-zero multiple of `alignment`.
    /// Requests above this are clamped, not rejected.
    pub max_region_size: u16,
}

impl AllocatorConfig {
    /// Create a config with the default alignment and maximum size.
    pub const fn new() -> Self {
        Self {
            alignment: BLOCK_ALIGNMENT,
            max_region_size: MAX_REGION_SIZE,
        }
    }

    /// Check the invariants documented on each field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alignment == 0 {
            return Err(ConfigError::ZeroAlignment);
        }
        if !self.alignment.is_power_of_two() {
            return Err(ConfigError::AlignmentNotPowerOfTwo {
                alignment: self.alignment,
            });
        }
        if self.max_region_size == 0 {
            return Err(ConfigError::MaxSizeZero);
        }
        if self.max_region_size % self.alignment != 0 {
            return Err(ConfigError::MaxSizeUnaligned {
                max_region_size: self.max_region_size,
                alignment: self.alignment,
            });
        }
        Ok(())
    }

    /// Round `size` up to the next multiple of the alignment, clamping to
    /// `max_region_size`.
    ///
    /// A zero size is a caller bug; release builds return 0, which every
    /// caller rejects.
    pub fn round_to_block(&self, size: u32) -> u16 {
        debug_assert!(size > 0, "round_to_block called with a zero size");
        if size > u32::from(self.max_region_size) {
            return self.max_region_size;
        }
        let align = u32::from(self.alignment);
        let rounded = size.div_ceil(align) * align;
        // size <= max_region_size and max_region_size is aligned, so the
        // rounded value cannot pass it.
        rounded as u16
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret a caller's signed size request.
///
/// Positive values pass through unchanged. Negative values wrap as a 16-bit
/// unsigned quantity, so `-1` requests 65,535 bytes (later clamped to the
/// maximum size). Returns `None` when the result is zero.
pub fn interpret_signed(size: i64) -> Option<u32> {
    let unsigned = match size {
        0 => return None,
        n if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        n => u32::from(n as u16),
    };
    (unsigned > 0).then_some(unsigned)
}
