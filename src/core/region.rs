//! Named memory regions of a loaded program.
//!
//! A region pairs two segmented addresses, the inclusive begin and end
//! bounds the toolchain reports for one part of the image.

use crate::core::address::SegAddr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The parts of the image a program-parameters record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    /// Code resident in the primary on-chip address space
    RootCode,
    /// Data resident in the primary on-chip address space
    RootData,
    /// Code mapped through the paging window into extended memory
    XmemCode,
    /// Data mapped through the paging window into extended memory
    XmemData,
    /// Constant data, placed separately on separate-I&D builds
    ConstantData,
}

impl RegionKind {
    /// Report label for this region.
    pub fn label(self) -> &'static str {
        match self {
            RegionKind::RootCode => "root code",
            RegionKind::RootData => "root data",
            RegionKind::XmemCode => "xmem code",
            RegionKind::XmemData => "xmem data",
            RegionKind::ConstantData => "constant data",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contiguous part of the loaded image with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryRegion {
    /// Which part of the image this is
    pub kind: RegionKind,
    /// First address of the region
    pub begin: SegAddr,
    /// Last address of the region
    pub end: SegAddr,
}

impl MemoryRegion {
    /// Create a new MemoryRegion.
    pub fn new(kind: RegionKind, begin: SegAddr, end: SegAddr) -> Self {
        MemoryRegion { kind, begin, end }
    }

    /// Begin and end bounds as flat physical addresses.
    pub fn linear_span(&self) -> (u32, u32) {
        (self.begin.linear(), self.end.linear())
    }

    /// Size of the region in bytes on the flat view.
    ///
    /// Zero-length regions (begin == end reports one byte) and inverted
    /// bounds (reported as zero) both occur in records for features the
    /// build did not use.
    pub fn byte_len(&self) -> u32 {
        let (begin, end) = self.linear_span();
        match end.checked_sub(begin) {
            Some(diff) => diff + 1,
            None => 0,
        }
    }

    /// Whether the flat view of the region contains the address.
    pub fn contains(&self, addr: SegAddr) -> bool {
        let (begin, end) = self.linear_span();
        let flat = addr.linear();
        begin <= flat && flat <= end
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} begins at {}, ends at {}",
            self.kind, self.begin, self.end
        )
    }
}
