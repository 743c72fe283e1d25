//! Name-keyed directory of live regions.
//!
//! The [`RegionDirectory`] owns every live [`Region`]. It uses `IndexMap`
//! (not `HashMap`) so iteration order is deterministic: the most recently
//! inserted region comes first. Callers must not rely on that order for
//! anything but reporting.

use indexmap::map::Entry;
use indexmap::IndexMap;
use log::warn;

use crate::error::RegionError;
use crate::handle::BlockHandle;
use crate::region::Region;

/// Owns all live regions, keyed by exact (case-sensitive) name.
#[derive(Debug, Default)]
pub struct RegionDirectory {
    regions: IndexMap<String, Region>,
}

impl RegionDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `region`, keyed by its name.
    ///
    /// Returns `Err(RegionError::DuplicateName)` if the name is already
    /// taken; the existing region is left untouched.
    pub fn insert(&mut self, region: Region) -> Result<&mut Region, RegionError> {
        match self.regions.entry(region.name().to_owned()) {
            Entry::Occupied(entry) => Err(RegionError::DuplicateName {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(region)),
        }
    }

    /// Whether a region with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    /// Look up a region by name.
    pub fn find(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Look up a region by name for mutation.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Region> {
        self.regions.get_mut(name)
    }

    /// Remove and drop the named region, releasing its blocks and arena.
    ///
    /// Callers check existence first; deleting an absent name is a logic
    /// error that trips a debug assertion and otherwise returns `false`.
    pub fn delete(&mut self, name: &str) -> bool {
        let removed = self.regions.shift_remove(name);
        debug_assert!(removed.is_some(), "delete of unknown region '{name}'");
        match removed {
            Some(region) => {
                region.release();
                true
            }
            None => {
                warn!("directory: delete of unknown region '{name}'");
                false
            }
        }
    }

    /// Iterate over regions, most recently inserted first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Region> + ExactSizeIterator {
        self.regions.values().rev()
    }

    /// Iterate mutably over regions, most recently inserted first.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Region> + ExactSizeIterator {
        self.regions.values_mut().rev()
    }

    /// The region holding a live block at `handle`, searching every region.
    pub fn owner_of(&self, handle: BlockHandle) -> Option<&Region> {
        self.iter().find(|r| r.block(handle).is_some())
    }

    /// Mutable variant of [`owner_of`](Self::owner_of).
    pub fn owner_of_mut(&mut self, handle: BlockHandle) -> Option<&mut Region> {
        self.iter_mut().find(|r| r.block(handle).is_some())
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region exists.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
