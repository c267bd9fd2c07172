//! Segmented address type for program-parameter records.
//!
//! This module provides the fundamental SegAddr type that every
//! memory-layout field in a program-parameters record is expressed in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A segmented 24-bit address from a program-parameters record.
///
/// The toolchain stores each layout boundary as a 16-bit logical offset
/// plus the 8-bit mapping-register value (XPC, DATASEG, or STACKSEG) that
/// was in effect for the region, with a reserved flags byte. The original
/// record overlays this with a packed 32-bit view for arithmetic; here the
/// packed view is an explicit conversion instead of a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct SegAddr {
    /// Mapping-register value selecting the 4 KiB window the offset lives in
    pub base: u8,
    /// Logical 16-bit address within the window
    pub offset: u16,
    /// Reserved; unused on current targets
    pub flags: u8,
}

impl SegAddr {
    /// Create a new SegAddr with zero flags.
    pub fn new(base: u8, offset: u16) -> Self {
        SegAddr {
            base,
            offset,
            flags: 0,
        }
    }

    /// Unpack from the record's little-endian 32-bit form
    /// (`offset | base << 16 | flags << 24`).
    pub fn from_long(value: u32) -> Self {
        SegAddr {
            base: ((value >> 16) & 0xFF) as u8,
            offset: (value & 0xFFFF) as u16,
            flags: ((value >> 24) & 0xFF) as u8,
        }
    }

    /// Pack into the record's 32-bit form.
    pub fn to_long(self) -> u32 {
        u32::from(self.offset) | (u32::from(self.base) << 16) | (u32::from(self.flags) << 24)
    }

    /// Flat physical address under the window mapping.
    ///
    /// The mapping register contributes in units of 4 KiB, so the flat
    /// address is `base * 0x1000 + offset`. The maximum value is 0x10EFFF
    /// and always fits in a u32.
    pub fn linear(self) -> u32 {
        (u32::from(self.base) << 12) + u32::from(self.offset)
    }
}

impl fmt::Display for SegAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.base, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_padding() {
        assert_eq!(SegAddr::new(0x00, 0x0000).to_string(), "0000:0000");
        assert_eq!(SegAddr::new(0xf8, 0xe7ff).to_string(), "00f8:e7ff");
        assert_eq!(SegAddr::new(0x7a, 0x00b0).to_string(), "007a:00b0");
    }

    #[test]
    fn test_long_round_trip() {
        let addr = SegAddr {
            base: 0xf5,
            offset: 0xe123,
            flags: 0x01,
        };
        assert_eq!(SegAddr::from_long(addr.to_long()), addr);
        assert_eq!(addr.to_long(), 0x01f5_e123);

        assert_eq!(SegAddr::from_long(0x00f5_e123), SegAddr::new(0xf5, 0xe123));
    }

    #[test]
    fn test_linear_mapping() {
        assert_eq!(SegAddr::new(0x00, 0x5fff).linear(), 0x05fff);
        assert_eq!(SegAddr::new(0xf5, 0xe000).linear(), 0xf5000 + 0xe000);
        // worst case stays inside u32
        assert_eq!(SegAddr::new(0xff, 0xffff).linear(), 0x10efff);
    }

    #[test]
    fn test_json_round_trip() {
        let addr = SegAddr::new(0x74, 0xb000);
        let json = serde_json::to_string(&addr).unwrap();
        let back: SegAddr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_ordering_follows_packed_form() {
        let lo = SegAddr::new(0x00, 0xffff);
        let hi = SegAddr::new(0x01, 0x0000);
        assert!(lo < hi);
    }
}
