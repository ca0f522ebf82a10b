//! Reporting utilities: formatted terminal output for evaluations and training runs.

pub mod format;

pub use format::*;
