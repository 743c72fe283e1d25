//! The allocator façade: region lifecycle plus the chosen-region context.
//!
//! [`RegionAllocator`] is the only type callers need. It owns the
//! [`RegionDirectory`] and remembers which region is currently chosen; every
//! size, allocation and free operation targets that region implicitly.
//!
//! Two layers share the same state:
//!
//! - `Result`-returning methods ([`create_region`](RegionAllocator::create_region),
//!   [`alloc`](RegionAllocator::alloc), [`free`](RegionAllocator::free), ...)
//!   report why something failed.
//! - The `r*` call contract ([`rinit`](RegionAllocator::rinit),
//!   [`ralloc`](RegionAllocator::ralloc), [`rfree`](RegionAllocator::rfree), ...)
//!   collapses failures to `false`/`None`/`0` and logs the reason at `debug`.
//!
//! # Lifecycle
//!
//! ```text
//! create_region("A") ──▶ A chosen ──▶ alloc / free / size_of target A
//!        │                    │
//!        │              choose("B") switches the target
//!        ▼
//! destroy("A") ──▶ A's blocks and arena released, chosen cleared if it was A
//! ```

use std::io;

use log::{debug, trace};

use crate::config::{interpret_signed, AllocatorConfig};
use crate::directory::RegionDirectory;
use crate::error::{ConfigError, RegionError};
use crate::handle::BlockHandle;
use crate::region::Region;
use crate::report::AllocatorReport;

/// Named regions with first-fit allocation inside the chosen one.
///
/// Each instance is independent: regions, the chosen region, and handles
/// belong to the allocator that created them. Not thread-safe; wrap in a
/// mutex to share across threads.
#[derive(Debug, Default)]
pub struct RegionAllocator {
    /// Size rounding and clamping policy.
    config: AllocatorConfig,
    /// Every live region.
    directory: RegionDirectory,
    /// Name of the region implicit operations target.
    chosen: Option<String>,
}

impl RegionAllocator {
    /// Create an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator with a custom configuration.
    pub fn with_config(config: AllocatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            directory: RegionDirectory::new(),
            chosen: None,
        })
    }

    /// The configuration this allocator was built with.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    // ── Region lifecycle ────────────────────────────────────────

    /// Create a region and make it the chosen region.
    ///
    /// `size` is rounded up to the alignment and clamped to the maximum
    /// region size; negative values wrap as 16-bit sizes. Fails without side
    /// effects if the name is taken, the size is zero after interpretation,
    /// or the arena cannot be reserved.
    pub fn create_region(&mut self, name: &str, size: i64) -> Result<&Region, RegionError> {
        if self.directory.contains(name) {
            return Err(RegionError::DuplicateName {
                name: name.to_owned(),
            });
        }
        let requested = interpret_signed(size).ok_or(RegionError::InvalidSize { requested: size })?;
        let capacity = self.config.round_to_block(requested);

        let region = Region::new(name, capacity)?;
        let region = self.directory.insert(region)?;
        self.chosen = Some(name.to_owned());

        debug!(
            "created region '{name}' ({capacity} bytes, id {})",
            region.id()
        );
        Ok(&*region)
    }

    /// Make the named region the target of implicit operations.
    ///
    /// On failure the chosen region is unchanged.
    pub fn choose(&mut self, name: &str) -> Result<(), RegionError> {
        if !self.directory.contains(name) {
            return Err(RegionError::UnknownRegion {
                name: name.to_owned(),
            });
        }
        debug!("chose region '{name}'");
        self.chosen = Some(name.to_owned());
        Ok(())
    }

    /// Name of the chosen region, if any.
    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    /// The chosen region, if any.
    pub fn chosen_region(&self) -> Option<&Region> {
        self.directory.find(self.chosen.as_deref()?)
    }

    fn chosen_region_mut(&mut self) -> Result<&mut Region, RegionError> {
        let name = self.chosen.as_deref().ok_or(RegionError::NoChosenRegion)?;
        self.directory
            .find_mut(name)
            .ok_or(RegionError::NoChosenRegion)
    }

    /// Destroy the named region, releasing its blocks and arena.
    ///
    /// Returns whether a region was destroyed. Destroying an unknown name is
    /// a no-op. Clears the chosen region if it was this one.
    pub fn destroy(&mut self, name: &str) -> bool {
        if !self.directory.contains(name) {
            debug!("destroy of unknown region '{name}' ignored");
            return false;
        }
        let deleted = self.directory.delete(name);
        if self.chosen.as_deref() == Some(name) {
            self.chosen = None;
        }
        debug!("destroyed region '{name}'");
        deleted
    }

    // ── Block operations ────────────────────────────────────────

    /// Allocate `size` bytes in the chosen region.
    ///
    /// The size is rounded up to the alignment (and clamped to the maximum
    /// region size). The returned block is zero-filled.
    pub fn alloc(&mut self, size: i64) -> Result<BlockHandle, RegionError> {
        let requested = interpret_signed(size).ok_or(RegionError::InvalidSize { requested: size })?;
        let rounded = self.config.round_to_block(requested);
        self.chosen_region_mut()?.alloc(rounded)
    }

    /// Free the block named by `handle`, returning its size.
    ///
    /// Requires a chosen region, but the block may live in any region: the
    /// directory is searched for its owner, and the owner's byte count is
    /// the one that shrinks.
    pub fn free(&mut self, handle: BlockHandle) -> Result<u16, RegionError> {
        if self.chosen_region().is_none() {
            return Err(RegionError::NoChosenRegion);
        }
        self.directory
            .owner_of_mut(handle)
            .ok_or(RegionError::UnknownBlock { handle })?
            .free(handle)
    }

    /// Size of the block named by `handle` in the chosen region, or 0.
    pub fn size_of(&self, handle: BlockHandle) -> u16 {
        self.chosen_region().map_or(0, |r| r.size_of(handle))
    }

    /// Shared access to a live block's bytes, in whichever region owns it.
    pub fn block_bytes(&self, handle: BlockHandle) -> Option<&[u8]> {
        self.directory.owner_of(handle)?.block_bytes(handle)
    }

    /// Mutable access to a live block's bytes, in whichever region owns it.
    pub fn block_bytes_mut(&mut self, handle: BlockHandle) -> Option<&mut [u8]> {
        self.directory.owner_of_mut(handle)?.block_bytes_mut(handle)
    }

    // ── Introspection ───────────────────────────────────────────

    /// Look up a region by name.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.directory.find(name)
    }

    /// Iterate over live regions, most recently created first.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.directory.iter()
    }

    /// Number of live regions.
    pub fn region_count(&self) -> usize {
        self.directory.len()
    }

    /// Snapshot every region's accounting and block layout.
    pub fn report(&self) -> AllocatorReport {
        AllocatorReport::capture(&self.directory)
    }

    // ── Call contract ───────────────────────────────────────────

    /// Create a region and choose it. See [`create_region`](Self::create_region).
    pub fn rinit(&mut self, name: &str, size: i64) -> bool {
        logged("rinit", self.create_region(name, size).map(|_| ())).is_some()
    }

    /// Choose a region by name. See [`choose`](Self::choose).
    pub fn rchoose(&mut self, name: &str) -> bool {
        logged("rchoose", self.choose(name)).is_some()
    }

    /// Name of the chosen region, if any.
    pub fn rchosen(&self) -> Option<&str> {
        self.chosen()
    }

    /// Allocate in the chosen region. See [`alloc`](Self::alloc).
    pub fn ralloc(&mut self, size: i64) -> Option<BlockHandle> {
        logged("ralloc", self.alloc(size))
    }

    /// Free a block in any region. See [`free`](Self::free).
    pub fn rfree(&mut self, handle: BlockHandle) -> bool {
        logged("rfree", self.free(handle)).is_some()
    }

    /// Size of a block in the chosen region, or 0.
    pub fn rsize(&self, handle: BlockHandle) -> u16 {
        self.size_of(handle)
    }

    /// Destroy a region; unknown names are ignored.
    pub fn rdestroy(&mut self, name: &str) {
        self.destroy(name);
    }

    /// Write the human-readable report of every region to `out`.
    pub fn rdump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.report())
    }
}

fn logged<T>(op: &str, result: Result<T, RegionError>) -> Option<T> {
    result
        .inspect(|_| trace!("{op} succeeded"))
        .inspect_err(|err| debug!("{op} failed: {err}"))
        .ok()
}
