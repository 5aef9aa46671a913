//! Static corner weights + axle LLT -> dynamic corner weights.
//!
//! Positive LLT moves load left -> right (left-hand turn); half of each axle's
//! transfer leaves the left wheel and lands on the right one. Negative results
//! mean the wheel has lifted and are returned as-is.

use crate::llt::types::{Axle, Corner, CornerWeights};

pub fn project_corner_loads(static_weights: &CornerWeights, front_llt: f64, rear_llt: f64) -> CornerWeights {
    let mut dynamic = *static_weights;
    for corner in Corner::ALL {
        let half = match corner.axle() {
            Axle::Front => front_llt,
            Axle::Rear => rear_llt,
        } / 2.0;
        dynamic[corner] += if corner.is_left() { -half } else { half };
    }
    dynamic
}

/// Corners carrying negative load.
pub fn lifted_corners(weights: &CornerWeights) -> Vec<Corner> {
    weights.iter().filter(|(_, w)| *w < 0.0).map(|(c, _)| c).collect()
}
