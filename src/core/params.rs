//! The program-parameters record.
//!
//! This module provides the ProgParams type, the record the runtime
//! populates before `main` runs to describe the final memory layout of a
//! loaded program. The library never computes a layout itself; it only
//! decodes and reports what the toolchain left behind.

use crate::core::address::SegAddr;
use crate::core::region::{MemoryRegion, RegionKind};
use crate::error::{ProgParamError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Size in bytes of the raw record as laid out by the toolchain.
///
/// Eleven packed segmented addresses followed by eight 16-bit words.
pub const RAW_LEN: usize = 60;

/// A runtime-populated record describing the final memory layout.
///
/// The segmented fields mirror the record's declaration order: root code,
/// xmem code, root data, xmem data, and constant-data bounds, then the
/// highest program address. The flat 16-bit fields cover the stack plus
/// the aux stack, free, and heap bounds the record carries but current
/// targets leave unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgParams {
    /// Root code begin (RCB)
    pub root_code_begin: SegAddr,
    /// Root code end (RCE)
    pub root_code_end: SegAddr,
    /// Xmem code begin (XCB)
    pub xmem_code_begin: SegAddr,
    /// Xmem code end (XCE)
    pub xmem_code_end: SegAddr,
    /// Root data begin (RDB)
    pub root_data_begin: SegAddr,
    /// Root data end (RDE)
    pub root_data_end: SegAddr,
    /// Xmem data begin (XDB)
    pub xmem_data_begin: SegAddr,
    /// Xmem data end (XDE)
    pub xmem_data_end: SegAddr,
    /// Root constants begin (RCDB)
    pub constant_begin: SegAddr,
    /// Root constants end (RCDE)
    pub constant_end: SegAddr,
    /// Highest program address (HPA); max of root code, constant data,
    /// and xmem code
    pub highest_program_addr: SegAddr,
    /// Aux stack begin; unused on current targets
    pub aux_stack_begin: u16,
    /// Aux stack end; unused on current targets
    pub aux_stack_end: u16,
    /// Stack begin
    pub stack_begin: u16,
    /// Stack end
    pub stack_end: u16,
    /// Free-space begin; unused on current targets
    pub free_begin: u16,
    /// Free-space end; unused on current targets
    pub free_end: u16,
    /// Heap begin; unused on current targets
    pub heap_begin: u16,
    /// Heap end; unused on current targets
    pub heap_end: u16,
}

impl ProgParams {
    /// Decode the raw record exactly as the toolchain lays it out.
    ///
    /// Trailing bytes beyond [`RAW_LEN`] are ignored so a record can be
    /// pulled straight out of a larger memory dump.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < RAW_LEN {
            return Err(ProgParamError::Truncated {
                expected: RAW_LEN,
                actual: bytes.len(),
            });
        }

        let addr = |index: usize| {
            let at = index * 4;
            SegAddr::from_long(u32::from_le_bytes([
                bytes[at],
                bytes[at + 1],
                bytes[at + 2],
                bytes[at + 3],
            ]))
        };
        let word = |index: usize| {
            let at = 11 * 4 + index * 2;
            u16::from_le_bytes([bytes[at], bytes[at + 1]])
        };

        let params = ProgParams {
            root_code_begin: addr(0),
            root_code_end: addr(1),
            xmem_code_begin: addr(2),
            xmem_code_end: addr(3),
            root_data_begin: addr(4),
            root_data_end: addr(5),
            xmem_data_begin: addr(6),
            xmem_data_end: addr(7),
            constant_begin: addr(8),
            constant_end: addr(9),
            highest_program_addr: addr(10),
            aux_stack_begin: word(0),
            aux_stack_end: word(1),
            stack_begin: word(2),
            stack_end: word(3),
            free_begin: word(4),
            free_end: word(5),
            heap_begin: word(6),
            heap_end: word(7),
        };
        debug!(
            hpa = %params.highest_program_addr,
            "decoded program parameters"
        );
        Ok(params)
    }

    /// Encode into the raw toolchain layout.
    pub fn to_bytes(&self) -> [u8; RAW_LEN] {
        let addrs = [
            self.root_code_begin,
            self.root_code_end,
            self.xmem_code_begin,
            self.xmem_code_end,
            self.root_data_begin,
            self.root_data_end,
            self.xmem_data_begin,
            self.xmem_data_end,
            self.constant_begin,
            self.constant_end,
            self.highest_program_addr,
        ];
        let words = [
            self.aux_stack_begin,
            self.aux_stack_end,
            self.stack_begin,
            self.stack_end,
            self.free_begin,
            self.free_end,
            self.heap_begin,
            self.heap_end,
        ];

        let mut bytes = [0u8; RAW_LEN];
        for (index, addr) in addrs.iter().enumerate() {
            bytes[index * 4..index * 4 + 4].copy_from_slice(&addr.to_long().to_le_bytes());
        }
        for (index, word) in words.iter().enumerate() {
            let at = 11 * 4 + index * 2;
            bytes[at..at + 2].copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// The bounds of one part of the image as a region.
    pub fn region(&self, kind: RegionKind) -> MemoryRegion {
        let (begin, end) = match kind {
            RegionKind::RootCode => (self.root_code_begin, self.root_code_end),
            RegionKind::RootData => (self.root_data_begin, self.root_data_end),
            RegionKind::XmemCode => (self.xmem_code_begin, self.xmem_code_end),
            RegionKind::XmemData => (self.xmem_data_begin, self.xmem_data_end),
            RegionKind::ConstantData => (self.constant_begin, self.constant_end),
        };
        MemoryRegion::new(kind, begin, end)
    }

    /// All segmented regions of the record.
    pub fn regions(&self) -> [MemoryRegion; 5] {
        [
            self.region(RegionKind::RootCode),
            self.region(RegionKind::RootData),
            self.region(RegionKind::XmemCode),
            self.region(RegionKind::XmemData),
            self.region(RegionKind::ConstantData),
        ]
    }

    /// Check that no region or stack bound is inverted.
    ///
    /// An all-zero record is valid; unused features leave begin == end.
    pub fn validate(&self) -> Result<()> {
        for region in self.regions() {
            let (begin, end) = region.linear_span();
            if begin > end {
                return Err(ProgParamError::InvalidLayout(format!(
                    "{} ends before it begins ({} > {})",
                    region.kind, region.begin, region.end
                )));
            }
        }
        if self.stack_begin > self.stack_end {
            return Err(ProgParamError::InvalidLayout(format!(
                "stack ends before it begins ({:x} > {:x})",
                self.stack_begin, self.stack_end
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProgParams {
        ProgParams {
            root_code_begin: SegAddr::new(0x00, 0x0000),
            root_code_end: SegAddr::new(0x00, 0x5fff),
            xmem_code_begin: SegAddr::new(0xf5, 0xe000),
            xmem_code_end: SegAddr::new(0xf8, 0xe7ff),
            root_data_begin: SegAddr::new(0x7a, 0x7000),
            root_data_end: SegAddr::new(0x7a, 0xafff),
            xmem_data_begin: SegAddr::new(0x00, 0x0000),
            xmem_data_end: SegAddr::new(0x00, 0x0000),
            constant_begin: SegAddr::new(0x00, 0x6000),
            constant_end: SegAddr::new(0x00, 0x6fff),
            highest_program_addr: SegAddr::new(0xf8, 0xe7ff),
            aux_stack_begin: 0,
            aux_stack_end: 0,
            stack_begin: 0xd000,
            stack_end: 0xdfff,
            free_begin: 0,
            free_end: 0,
            heap_begin: 0,
            heap_end: 0,
        }
    }

    #[test]
    fn test_raw_round_trip() {
        let params = sample();
        let bytes = params.to_bytes();
        assert_eq!(bytes.len(), RAW_LEN);
        let back = ProgParams::from_bytes(&bytes).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_raw_field_placement() {
        let bytes = sample().to_bytes();
        // RCE is the second packed address: offset then base then flags
        assert_eq!(&bytes[4..8], &[0xff, 0x5f, 0x00, 0x00]);
        // stack begin is the third 16-bit word after the addresses
        assert_eq!(&bytes[48..50], &[0x00, 0xd0]);
    }

    #[test]
    fn test_from_bytes_ignores_trailing() {
        let mut dump = sample().to_bytes().to_vec();
        dump.extend_from_slice(&[0xaa; 16]);
        let back = ProgParams::from_bytes(&dump).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_from_bytes_truncated() {
        let err = ProgParams::from_bytes(&[0u8; 59]).unwrap_err();
        match err {
            ProgParamError::Truncated { expected, actual } => {
                assert_eq!(expected, RAW_LEN);
                assert_eq!(actual, 59);
            }
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let params = sample();
        let json = params.to_json().unwrap();
        let back = ProgParams::from_json(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = ProgParams::from_json("{\"root_code_begin\": 12}").unwrap_err();
        assert!(matches!(err, ProgParamError::Serialization(_)));
    }

    #[test]
    fn test_regions() {
        let params = sample();
        let region = params.region(RegionKind::RootData);
        assert_eq!(region.begin, SegAddr::new(0x7a, 0x7000));
        assert_eq!(region.end, SegAddr::new(0x7a, 0xafff));
        assert_eq!(params.regions().len(), 5);
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let zeroed = ProgParams::from_bytes(&[0u8; RAW_LEN]).unwrap();
        assert!(zeroed.validate().is_ok());

        let mut inverted = sample();
        inverted.root_code_end = SegAddr::new(0x00, 0x0000);
        inverted.root_code_begin = SegAddr::new(0x00, 0x0001);
        let err = inverted.validate().unwrap_err();
        assert!(err.to_string().contains("root code"));

        let mut bad_stack = sample();
        bad_stack.stack_begin = 0xe000;
        bad_stack.stack_end = 0xd000;
        assert!(bad_stack.validate().is_err());
    }
}
