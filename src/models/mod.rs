//! Model implementations.
//!
//! - impact score and mock current readings (small pure functions)
//! - the gradient-boosted tree regressor behind the delta-LST trainer

pub mod boosting;
pub mod readings;
pub mod score;
pub mod tree;

pub use boosting::*;
pub use readings::*;
pub use score::*;
pub use tree::*;
