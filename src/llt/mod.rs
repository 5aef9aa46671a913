//! llt - engine-agnostic lateral load transfer model (pure types + solver)

pub mod types;
pub mod error;
pub mod geometry;
pub mod stiffness;
pub mod transfer;
pub mod corners;
pub mod report;

pub use types::*;
pub use error::{LltError, LltResult};
pub use report::{compare, Comparison, GripModel, LoadReport};
