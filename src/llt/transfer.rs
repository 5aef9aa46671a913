// ==============================================================================
// transfer.rs — LATERAL LOAD TRANSFER (GEOMETRIC + ELASTIC SPLIT)
// ------------------------------------------------------------------------------
// Quasi-static, one operating point. Lengths in feet, loads in pounds.
//
//   Fy        = W * ay                      total lateral force
//   t_avg     = (t_front + t_rear) / 2
//   LLT       = Fy * h_cg / t_avg            total lateral load transfer
//
// Stage 1, geometric (through the roll centers, per axle, NOT stiffness-weighted):
//   LLT_geo,i = Fy * h_rc,i / t_avg
//
// Stage 2, elastic (the remainder, through springs + bar):
//   LLT_el    = LLT - LLT_geo,f - LLT_geo,r
//   LLT_el,i  = LLT_el * K_i / K_total
//
//   LLT_i     = LLT_geo,i + LLT_el,i         so LLT_f + LLT_r == LLT
//
// ay is signed: positive is a left-hand turn, negative a right-hand turn, and
// every term carries that sign. ay == 0 or t_avg <= 0 returns all zeros.
// ==============================================================================

use serde::Serialize;
use tracing::trace;

use crate::llt::stiffness::RollStiffness;

#[derive(Debug, Clone, Copy)]
pub struct TransferInput {
    pub total_weight: f64,       // lbs
    pub lateral_accel_g: f64,    // g, signed
    pub cg_height: f64,          // ft
    pub track_width_front: f64,  // ft
    pub track_width_rear: f64,   // ft
    pub roll_center_front: f64,  // ft
    pub roll_center_rear: f64,   // ft
}

impl TransferInput {
    pub fn total_lateral_force(&self) -> f64 {
        self.total_weight * self.lateral_accel_g
    }

    pub fn average_track_width(&self) -> f64 {
        (self.track_width_front + self.track_width_rear) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTransfer {
    pub total_lateral_force: f64,
    pub average_track_width: f64,
    pub front_geometric: f64,
    pub rear_geometric: f64,
    pub elastic: f64,
    pub front_elastic: f64,
    pub rear_elastic: f64,
    pub front: f64,
    pub rear: f64,
    pub total: f64,
}

pub fn lateral_load_transfer(input: &TransferInput, stiffness: &RollStiffness) -> LoadTransfer {
    let total_lateral_force = input.total_lateral_force();
    let average_track_width = input.average_track_width();

    if input.lateral_accel_g == 0.0 || !(average_track_width > 0.0) {
        return LoadTransfer {
            total_lateral_force,
            average_track_width,
            ..LoadTransfer::default()
        };
    }

    let total = total_lateral_force * input.cg_height / average_track_width;

    let front_geometric = total_lateral_force * input.roll_center_front / average_track_width;
    let rear_geometric = total_lateral_force * input.roll_center_rear / average_track_width;

    let elastic = total - front_geometric - rear_geometric;
    let front_elastic = elastic * stiffness.front_share();
    let rear_elastic = elastic * stiffness.rear_share();

    let front = front_geometric + front_elastic;
    let rear = rear_geometric + rear_elastic;

    trace!(total, front, rear, elastic, "lateral load transfer");

    LoadTransfer {
        total_lateral_force,
        average_track_width,
        front_geometric,
        rear_geometric,
        elastic,
        front_elastic,
        rear_elastic,
        front,
        rear,
        total,
    }
}
