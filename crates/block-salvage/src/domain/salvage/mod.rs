//! # Salvage Module
//!
//! Scan state, probe outcomes and the pass report.

mod probe;
mod report;
mod state;


// Re-export public types
pub use probe::{Probe, SalvagedPage};
pub use report::SalvageReport;
pub use state::ScanState;
