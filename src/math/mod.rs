//! Mathematical utilities: planar polygon measures and summary statistics.

pub mod polygon;
pub mod stats;

pub use polygon::*;
pub use stats::*;
