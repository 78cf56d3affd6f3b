//! Core units and the missing-aware sample container shared across the
//! velocity speed workspace.

pub mod samples;
pub mod units;

pub use samples::Samples;
pub use units::{Unit, UnitError, convert};
