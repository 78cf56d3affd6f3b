//! Reference and limit airspeed lookups from static performance tables.
//!
//! Flight-data-analysis pipelines use this library to answer "what speed
//! should the aircraft have been flying at this moment": takeoff safety
//! speed (V2) and landing/approach reference speeds (Vref, Vapp) from gross
//! weight and flap/slat detent, and the maximum operating speed/Mach
//! (VMO/MMO) from altitude. Keeping the engine in a library crate lets the
//! CLI and analysis front-ends share it.

pub mod samples {
    pub use vspeed_core::samples::*;
}

pub mod units {
    pub use vspeed_core::units::*;
}

pub mod interp {
    pub use vspeed_interp::*;
}

pub mod lookup {
    pub use vspeed_lookup::*;
}

pub mod config {
    pub use vspeed_config::*;
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
