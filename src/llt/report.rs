// ==============================================================================
// report.rs — WEIGHT REPORT, GRIP PROXY, TWO-VEHICLE COMPARISON
// ------------------------------------------------------------------------------
// Everything here is a pure function of static + dynamic corner weights.
//
// Per corner / axle:
//   change      = dynamic - static                     lbs
//   static %    = static / totalStatic * 100
//   dynamic %   = dynamic / totalDynamic * 100
//   pct change  = dynamic % - static %                 percentage points
//
// Grip proxy (relative only, never a force):
//   effectiveGrip = dynamic ^ tireLoadExponent          (0 for a lifted wheel)
//   gripDelta     = change / static * loadSensitivity * 100
//
// Comparison rows report baseline vs candidate, each as a share of its own
// dynamic total, and difference = candidate - baseline.
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::llt::stiffness::{ArbRate, RollStiffness};
use crate::llt::transfer::LoadTransfer;
use crate::llt::types::{Axle, Corner, CornerWeights};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GripModel {
    pub tire_load_exponent: f64,
    pub load_sensitivity: f64,
}

impl Default for GripModel {
    fn default() -> Self {
        Self { tire_load_exponent: 0.85, load_sensitivity: 0.90 }
    }
}

impl GripModel {
    pub fn effective_grip(&self, load: f64) -> f64 {
        if load <= 0.0 { 0.0 } else { load.powf(self.tire_load_exponent) }
    }

    pub fn grip_delta(&self, static_load: f64, dynamic_load: f64) -> f64 {
        (dynamic_load - static_load) / static_load * self.load_sensitivity * 100.0
    }
}

#[inline]
fn percent(part: f64, whole: f64) -> f64 {
    part / whole * 100.0
}

// ============================================
// Single-vehicle weight report
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GripDetail {
    pub effective_grip: f64,
    pub grip_delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerLoad {
    pub corner: Corner,
    pub static_weight: f64,
    pub dynamic_weight: f64,
    pub change: f64,
    pub static_pct: f64,
    pub dynamic_pct: f64,
    pub pct_change: f64,
    pub lifted: bool,
    pub grip: GripDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxleLoad {
    pub axle: Axle,
    pub static_weight: f64,
    pub dynamic_weight: f64,
    pub change: f64,
    pub static_pct: f64,
    pub dynamic_pct: f64,
    pub pct_change: f64,
    pub effective_grip: f64,
}

/// RF + LR share of the total, static vs dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossWeight {
    pub static_pct: f64,
    pub dynamic_pct: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightReport {
    pub total_static: f64,
    pub total_dynamic: f64,
    pub corners: Vec<CornerLoad>,
    pub axles: Vec<AxleLoad>,
    pub cross_weight: CrossWeight,
}

impl WeightReport {
    pub fn corner(&self, corner: Corner) -> &CornerLoad {
        &self.corners[corner as usize]
    }

    pub fn axle(&self, axle: Axle) -> &AxleLoad {
        &self.axles[axle as usize]
    }
}

pub fn build_weight_report(
    static_weights: &CornerWeights,
    dynamic_weights: &CornerWeights,
    grip: &GripModel,
) -> WeightReport {
    let total_static = static_weights.total();
    let total_dynamic = dynamic_weights.total();

    let corners = Corner::ALL
        .into_iter()
        .map(|c| {
            let s = static_weights[c];
            let d = dynamic_weights[c];
            let static_pct = percent(s, total_static);
            let dynamic_pct = percent(d, total_dynamic);
            CornerLoad {
                corner: c,
                static_weight: s,
                dynamic_weight: d,
                change: d - s,
                static_pct,
                dynamic_pct,
                pct_change: dynamic_pct - static_pct,
                lifted: d < 0.0,
                grip: GripDetail {
                    effective_grip: grip.effective_grip(d),
                    grip_delta: grip.grip_delta(s, d),
                },
            }
        })
        .collect::<Vec<_>>();

    let axles = Axle::ALL
        .into_iter()
        .map(|a| {
            let s = static_weights.axle(a);
            let d = dynamic_weights.axle(a);
            let static_pct = percent(s, total_static);
            let dynamic_pct = percent(d, total_dynamic);
            AxleLoad {
                axle: a,
                static_weight: s,
                dynamic_weight: d,
                change: d - s,
                static_pct,
                dynamic_pct,
                pct_change: dynamic_pct - static_pct,
                effective_grip: a
                    .corners()
                    .iter()
                    .map(|c| corners[*c as usize].grip.effective_grip)
                    .sum(),
            }
        })
        .collect();

    let static_cross = percent(static_weights.cross(), total_static);
    let dynamic_cross = percent(dynamic_weights.cross(), total_dynamic);

    WeightReport {
        total_static,
        total_dynamic,
        corners,
        axles,
        cross_weight: CrossWeight {
            static_pct: static_cross,
            dynamic_pct: dynamic_cross,
            change: dynamic_cross - static_cross,
        },
    }
}

// ============================================
// Full report for one vehicle
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub total_weight: f64,            // lbs
    pub front_weight_fraction: f64,   // 0..1
    pub mass: f64,                    // slugs
    pub lateral_acceleration_g: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionRatios {
    pub front_left: f64,
    pub front_right: f64,
    pub rear: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub vehicle: VehicleSummary,
    pub motion_ratios: MotionRatios,
    pub arb: ArbRate,
    pub roll_stiffness: RollStiffness,
    pub load_transfer: LoadTransfer,
    pub weights: WeightReport,
    pub lifted_corners: Vec<Corner>,
}

// ============================================
// Comparison
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow<K> {
    pub key: K,
    pub baseline: f64,
    pub baseline_pct: f64,
    pub candidate: f64,
    pub candidate_pct: f64,
    pub difference: f64,
    pub pct_difference: f64,
}

impl<K> ComparisonRow<K> {
    fn new(key: K, baseline: f64, baseline_total: f64, candidate: f64, candidate_total: f64) -> Self {
        let baseline_pct = percent(baseline, baseline_total);
        let candidate_pct = percent(candidate, candidate_total);
        Self {
            key,
            baseline,
            baseline_pct,
            candidate,
            candidate_pct,
            difference: candidate - baseline,
            pct_difference: candidate_pct - baseline_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub corners: Vec<ComparisonRow<Corner>>,
    pub axles: Vec<ComparisonRow<Axle>>,
}

impl Comparison {
    pub fn corner(&self, corner: Corner) -> &ComparisonRow<Corner> {
        &self.corners[corner as usize]
    }

    pub fn axle(&self, axle: Axle) -> &ComparisonRow<Axle> {
        &self.axles[axle as usize]
    }
}

pub fn compare(baseline: &CornerWeights, candidate: &CornerWeights) -> Comparison {
    let (bt, ct) = (baseline.total(), candidate.total());

    Comparison {
        corners: Corner::ALL
            .into_iter()
            .map(|c| ComparisonRow::new(c, baseline[c], bt, candidate[c], ct))
            .collect(),
        axles: Axle::ALL
            .into_iter()
            .map(|a| ComparisonRow::new(a, baseline.axle(a), bt, candidate.axle(a), ct))
            .collect(),
    }
}
