//! Input/output helpers.
//!
//! - GeoJSON selection parsing + Feature export (`geojson`)
//! - trained model artifact read/write (`artifact`)
//! - synthetic dataset CSV export (`export`)

pub mod artifact;
pub mod export;
pub mod geojson;

pub use artifact::*;
pub use export::*;
pub use geojson::*;
