pub mod llt;
pub mod vehicle;
pub mod render;
pub mod state;
pub mod net;

pub use llt::{LltError, LltResult};
pub use vehicle::{Vehicle, VehicleConfig};
