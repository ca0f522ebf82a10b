//! Data sources. The only one is the seeded synthetic delta-LST generator.

pub mod synthetic;

pub use synthetic::*;
