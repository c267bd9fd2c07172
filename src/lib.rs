//! Memory-layout inspection for runtime-populated program parameters.
//!
//! Microcontroller toolchains in the Rabbit family leave behind a
//! program-parameters record describing where the loader placed the final
//! image: root code and data, paged (xmem) code and data, constant data,
//! the stack, and the highest address the program occupies. This crate
//! models that record as plain Rust types and renders the classic
//! memory-layout report from it.

/// Core data types module
pub mod core;
pub mod error;
pub mod logging;
pub mod report;

pub use crate::core::address::SegAddr;
pub use crate::core::params::{ProgParams, RAW_LEN};
pub use crate::core::region::{MemoryRegion, RegionKind};
pub use crate::error::{ProgParamError, Result};
pub use crate::report::{render, render_to_string, ReportOptions};
