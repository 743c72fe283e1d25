//! Named, fixed-capacity memory regions with first-fit block allocation.
//!
//! A caller creates independently sized regions, chooses one as the active
//! context, and allocates and frees 8-byte-granular blocks inside it. Freed
//! space is reused by the next allocation that fits, lowest address first.
//!
//! # Architecture
//!
//! ```text
//! RegionAllocator (façade, holds the chosen region)
//! └── RegionDirectory (IndexMap<name, Region>, most recent first)
//!     └── Region (one Vec<u8> arena, fixed capacity, bytes_used)
//!         └── BlockList (address-ordered Vec<Block>, first-fit placement)
//! ```
//!
//! Handles are [`BlockHandle`] values: the owning region's [`RegionId`] plus
//! the block's start offset in that region's arena. They never dangle; a
//! handle into a freed block or destroyed region simply stops resolving.
//!
//! # Example
//!
//! ```
//! use region_alloc::RegionAllocator;
//!
//! let mut regions = RegionAllocator::new();
//! assert!(regions.rinit("scratch", 100)); // rounded up to 104 bytes
//!
//! let block = regions.ralloc(10).unwrap(); // rounded up to 16 bytes
//! assert_eq!(regions.rsize(block), 16);
//!
//! regions.block_bytes_mut(block).unwrap()[0] = 7;
//! assert!(regions.rfree(block));
//! assert_eq!(regions.rsize(block), 0);
//!
//! regions.rdestroy("scratch");
//! assert_eq!(regions.rchosen(), None);
//! ```
//!
//! # Threading
//!
//! Single-threaded. Every operation runs to completion; share an allocator
//! across threads only behind a mutex.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod block_list;
pub mod config;
pub mod directory;
pub mod error;
pub mod handle;
pub mod region;
pub mod report;

// Public re-exports for the primary API surface.
pub use allocator::RegionAllocator;
pub use block_list::{Block, BlockList, Gap};
pub use config::{AllocatorConfig, BLOCK_ALIGNMENT, MAX_REGION_SIZE};
pub use error::{ConfigError, RegionError};
pub use handle::{BlockHandle, RegionId};
pub use region::Region;
pub use report::{AllocatorReport, RegionReport};
