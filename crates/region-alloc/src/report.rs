//! Read-only snapshots of allocator state for diagnostics.
//!
//! [`AllocatorReport`] captures every region's accounting and block layout
//! at one instant. Its `Display` impl is the human-readable dump.

use std::fmt;

use crate::block_list::Block;
use crate::directory::RegionDirectory;
use crate::region::Region;

/// Accounting and layout of a single region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionReport {
    /// Region name.
    pub name: String,
    /// Arena size in bytes.
    pub capacity: u16,
    /// Bytes handed out.
    pub bytes_used: u16,
    /// Unused space as a percentage of capacity.
    pub free_percent: f32,
    /// Largest contiguous gap in bytes.
    pub largest_gap: u16,
    /// Live blocks in address order.
    pub blocks: Vec<Block>,
}

impl RegionReport {
    /// Capture the current state of `region`.
    pub fn capture(region: &Region) -> Self {
        Self {
            name: region.name().to_owned(),
            capacity: region.capacity(),
            bytes_used: region.bytes_used(),
            free_percent: region.free_percent(),
            largest_gap: region.blocks().largest_gap(),
            blocks: region.blocks().iter().copied().collect(),
        }
    }
}

impl fmt::Display for RegionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "REGION NAME: \t{}", self.name)?;
        writeln!(f, "SIZE (BYTES): \t{}", self.capacity)?;
        writeln!(f, "USED (BYTES): \t{}", self.bytes_used)?;
        writeln!(f, "FREE SPACE: \t{:.2} %", self.free_percent)?;
        writeln!(f, "LARGEST GAP: \t{}", self.largest_gap)?;
        writeln!(f)?;

        if !self.blocks.is_empty() {
            writeln!(f, "\tBLOCKS:")?;
            writeln!(f)?;
        }
        for block in &self.blocks {
            writeln!(f, "\t\t{:#06x}", block.start())?;
            writeln!(f, "\t\t{} bytes", block.size())?;
            writeln!(f)?;
        }
        writeln!(f)
    }
}

/// Snapshot of every live region, in directory order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AllocatorReport {
    /// Per-region reports, most recently created first.
    pub regions: Vec<RegionReport>,
}

impl AllocatorReport {
    /// Capture every region in `directory`.
    pub fn capture(directory: &RegionDirectory) -> Self {
        Self {
            regions: directory.iter().map(RegionReport::capture).collect(),
        }
    }

    /// Total bytes handed out across all regions.
    pub fn total_used(&self) -> u32 {
        self.regions.iter().map(|r| u32::from(r.bytes_used)).sum()
    }

    /// Total arena capacity across all regions.
    pub fn total_capacity(&self) -> u32 {
        self.regions.iter().map(|r| u32::from(r.capacity)).sum()
    }
}

impl fmt::Display for AllocatorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in &self.regions {
            write!(f, "{region}")?;
        }
        Ok(())
    }
}
