//! Core data types for program-parameter inspection.

pub mod address;
pub mod params;
pub mod region;
