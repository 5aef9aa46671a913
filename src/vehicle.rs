// ==============================================================================
// vehicle.rs — VEHICLE CONFIG (DEFAULTS + DEEP MERGE) AND THE VEHICLE AGGREGATE
// ------------------------------------------------------------------------------
// VehicleConfig is one fully-resolved, immutable value. Every struct in it is
// #[serde(default)] against the reference car, so a partial JSON document
// merges field-by-field into the defaults at any nesting depth.
//
// Vehicle owns a config plus a transients cache (DerivedState). compute()
// always recomputes and replaces the cache; derived() fills it on first use.
// Two Vehicles never share a cache.
// ==============================================================================

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llt::corners::{lifted_corners, project_corner_loads};
use crate::llt::geometry::ControlArm;
use crate::llt::report::{
    build_weight_report, compare, Comparison, GripModel, LoadReport, MotionRatios, VehicleSummary,
};
use crate::llt::stiffness::{roll_stiffness, ArbGeometry, ArbRate, FrontAxleSprings, RearAxleSprings, RollStiffness};
use crate::llt::transfer::{lateral_load_transfer, LoadTransfer, TransferInput};
use crate::llt::{CornerWeights, LltError, LltResult, GRAVITY_FT_S2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SuspensionFront {
    pub spring_rate_left: f64,   // lb/in
    pub spring_rate_right: f64,  // lb/in
    pub roll_center_height: f64, // ft
    pub control_arm_left: ControlArm,
    pub control_arm_right: ControlArm,
    pub arb: ArbGeometry,
}

impl Default for SuspensionFront {
    fn default() -> Self {
        Self {
            spring_rate_left: 275.0,
            spring_rate_right: 400.0,
            roll_center_height: 2.5 / 12.0,
            control_arm_left: ControlArm::default(),
            control_arm_right: ControlArm::default(),
            arb: ArbGeometry::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SuspensionRear {
    pub spring_rate: f64,        // lb/in
    pub roll_center_height: f64, // ft
    pub motion_ratio: f64,
}

impl Default for SuspensionRear {
    fn default() -> Self {
        Self {
            spring_rate: 200.0,
            roll_center_height: 6.0 / 12.0,
            motion_ratio: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct VehicleConfig {
    pub cg_height: f64,         // ft
    pub track_width_front: f64, // ft
    pub track_width_rear: f64,  // ft
    pub wheelbase: f64,         // ft
    pub static_corner_weights: CornerWeights,
    pub suspension_front: SuspensionFront,
    pub suspension_rear: SuspensionRear,
    pub lateral_acceleration_g: f64, // + left turn, - right turn
    pub grip: GripModel,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            cg_height: 13.0 / 12.0,
            track_width_front: 65.0 / 12.0,
            track_width_rear: 65.0 / 12.0,
            wheelbase: 107.0 / 12.0,
            static_corner_weights: CornerWeights::default(),
            suspension_front: SuspensionFront::default(),
            suspension_rear: SuspensionRear::default(),
            lateral_acceleration_g: 2.0,
            grip: GripModel::default(),
        }
    }
}

/// Recursively merge `patch` into `base`. Objects merge key by key, anything
/// else replaces.
fn merge_json(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

impl VehicleConfig {
    /// The reference car.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Reference car with equal 300 lb/in front springs, a 1.125 in bar and
    /// re-scaled corners.
    pub fn stiffer_arb() -> Self {
        let mut cfg = Self::default();
        cfg.suspension_front.spring_rate_left = 300.0;
        cfg.suspension_front.spring_rate_right = 300.0;
        cfg.suspension_front.arb.outer_diameter = 1.125;
        cfg.static_corner_weights = CornerWeights::new(610.0, 640.0, 660.0, 690.0);
        cfg
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "reference" => Some(Self::reference()),
            "stiffer-arb" => Some(Self::stiffer_arb()),
            _ => None,
        }
    }

    pub fn from_value(overrides: Value) -> LltResult<Self> {
        Ok(serde_json::from_value(overrides)?)
    }

    pub fn from_json_str(json: &str) -> LltResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> LltResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Deep-merge an override document onto this config.
    pub fn merged(&self, overrides: &Value) -> LltResult<Self> {
        let mut base = serde_json::to_value(self)?;
        merge_json(&mut base, overrides);
        Self::from_value(base)
    }

    pub fn total_weight(&self) -> f64 {
        self.static_corner_weights.total()
    }

    pub fn front_weight_fraction(&self) -> f64 {
        self.static_corner_weights.front_fraction()
    }

    /// Slugs.
    pub fn mass(&self) -> f64 {
        self.total_weight() / GRAVITY_FT_S2
    }

    pub fn validate(&self) -> LltResult<()> {
        for (corner, weight) in self.static_corner_weights.iter() {
            if !(weight > 0.0) || !weight.is_finite() {
                return Err(LltError::InvalidWeight(format!(
                    "static corner weight {corner} must be positive, got {weight}"
                )));
            }
        }
        let total = self.total_weight();
        if !(total > 0.0) || !total.is_finite() {
            return Err(LltError::InvalidWeight(format!("total weight must be positive, got {total}")));
        }

        let front = &self.suspension_front;
        let rear = &self.suspension_rear;

        finite("cgHeight", self.cg_height)?;
        finite("trackWidthFront", self.track_width_front)?;
        finite("trackWidthRear", self.track_width_rear)?;
        finite("wheelbase", self.wheelbase)?;
        finite("suspensionFront.rollCenterHeight", front.roll_center_height)?;
        finite("suspensionRear.rollCenterHeight", rear.roll_center_height)?;
        finite("lateralAccelerationG", self.lateral_acceleration_g)?;
        finite("grip.tireLoadExponent", self.grip.tire_load_exponent)?;
        finite("grip.loadSensitivity", self.grip.load_sensitivity)?;

        positive("suspensionFront.springRateLeft", front.spring_rate_left)?;
        positive("suspensionFront.springRateRight", front.spring_rate_right)?;
        positive("suspensionRear.springRate", rear.spring_rate)?;
        positive("suspensionRear.motionRatio", rear.motion_ratio)?;

        front.control_arm_left.motion_ratio()?;
        front.control_arm_right.motion_ratio()?;
        front.arb.validate()?;
        Ok(())
    }
}

fn finite(field: &str, value: f64) -> LltResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LltError::InvalidGeometry(format!("{field} must be finite, got {value}")))
    }
}

fn positive(field: &str, value: f64) -> LltResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LltError::InvalidGeometry(format!("{field} must be positive, got {value}")))
    }
}

// ============================================
// Derived state
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedState {
    pub motion_ratios: MotionRatios,
    pub arb: ArbRate,
    pub roll_stiffness: RollStiffness,
    pub load_transfer: LoadTransfer,
    pub dynamic_corner_weights: CornerWeights,
}

/// Run the full model for one config: geometry -> stiffness -> LLT -> corners.
pub fn evaluate(cfg: &VehicleConfig) -> LltResult<DerivedState> {
    cfg.validate()?;

    let front = &cfg.suspension_front;
    let rear = &cfg.suspension_rear;

    let motion_ratios = MotionRatios {
        front_left: front.control_arm_left.motion_ratio()?,
        front_right: front.control_arm_right.motion_ratio()?,
        rear: rear.motion_ratio,
    };
    let arb = front.arb.rate()?;

    let roll_stiffness = roll_stiffness(
        &FrontAxleSprings {
            spring_rate_left: front.spring_rate_left,
            spring_rate_right: front.spring_rate_right,
            motion_ratio_left: motion_ratios.front_left,
            motion_ratio_right: motion_ratios.front_right,
            arb_rate: arb.wheel_rate,
            track_width: cfg.track_width_front,
        },
        &RearAxleSprings {
            spring_rate: rear.spring_rate,
            motion_ratio: rear.motion_ratio,
            track_width: cfg.track_width_rear,
        },
    )?;

    let load_transfer = lateral_load_transfer(
        &TransferInput {
            total_weight: cfg.total_weight(),
            lateral_accel_g: cfg.lateral_acceleration_g,
            cg_height: cfg.cg_height,
            track_width_front: cfg.track_width_front,
            track_width_rear: cfg.track_width_rear,
            roll_center_front: front.roll_center_height,
            roll_center_rear: rear.roll_center_height,
        },
        &roll_stiffness,
    );

    let dynamic_corner_weights =
        project_corner_loads(&cfg.static_corner_weights, load_transfer.front, load_transfer.rear);

    let transfers = [load_transfer.total, load_transfer.front, load_transfer.rear, roll_stiffness.total];
    if !transfers.iter().all(|v| v.is_finite()) || !dynamic_corner_weights.iter().all(|(_, w)| w.is_finite()) {
        return Err(LltError::NonFinite(format!(
            "load transfer overflowed (total {}, front {}, rear {})",
            load_transfer.total, load_transfer.front, load_transfer.rear
        )));
    }

    Ok(DerivedState {
        motion_ratios,
        arb,
        roll_stiffness,
        load_transfer,
        dynamic_corner_weights,
    })
}

// ============================================
// Vehicle aggregate
// ============================================

#[derive(Debug, Clone)]
pub struct Vehicle {
    config: VehicleConfig,
    transients: Option<DerivedState>,
}

impl Vehicle {
    pub fn new(config: VehicleConfig) -> LltResult<Self> {
        config.validate()?;
        Ok(Self { config, transients: None })
    }

    /// Reference car with `overrides` deep-merged in.
    pub fn with_overrides(overrides: &Value) -> LltResult<Self> {
        Self::new(VehicleConfig::default().merged(overrides)?)
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Cached derived state, if any computation has run.
    pub fn transients(&self) -> Option<&DerivedState> {
        self.transients.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.transients = None;
    }

    fn run_model(&self) -> LltResult<DerivedState> {
        let derived = evaluate(&self.config)?;
        debug!(
            total_llt = derived.load_transfer.total,
            front_llt = derived.load_transfer.front,
            rear_llt = derived.load_transfer.rear,
            "vehicle computed"
        );
        Ok(derived)
    }

    /// Recompute and replace the cache.
    pub fn compute(&mut self) -> LltResult<&DerivedState> {
        self.transients = None;
        let derived = self.run_model()?;
        Ok(&*self.transients.insert(derived))
    }

    /// Cached state, computing it first if missing.
    pub fn derived(&mut self) -> LltResult<&DerivedState> {
        let derived = match self.transients.take() {
            Some(derived) => derived,
            None => self.run_model()?,
        };
        Ok(&*self.transients.insert(derived))
    }

    pub fn dynamic_corner_weights(&mut self) -> LltResult<CornerWeights> {
        Ok(self.derived()?.dynamic_corner_weights)
    }

    pub fn report(&mut self) -> LltResult<LoadReport> {
        let cfg = self.config;
        let derived = self.derived()?;

        Ok(LoadReport {
            vehicle: VehicleSummary {
                total_weight: cfg.total_weight(),
                front_weight_fraction: cfg.front_weight_fraction(),
                mass: cfg.mass(),
                lateral_acceleration_g: cfg.lateral_acceleration_g,
            },
            motion_ratios: derived.motion_ratios,
            arb: derived.arb,
            roll_stiffness: derived.roll_stiffness,
            load_transfer: derived.load_transfer,
            weights: build_weight_report(
                &cfg.static_corner_weights,
                &derived.dynamic_corner_weights,
                &cfg.grip,
            ),
            lifted_corners: lifted_corners(&derived.dynamic_corner_weights),
        })
    }

    /// Baseline = self, candidate = other. Computes either side lazily.
    pub fn compare_to(&mut self, other: &mut Vehicle) -> LltResult<Comparison> {
        let baseline = self.dynamic_corner_weights()?;
        let candidate = other.dynamic_corner_weights()?;
        Ok(compare(&baseline, &candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_is_reference_car() {
        assert_eq!(VehicleConfig::from_json_str("{}").unwrap(), VehicleConfig::reference());
    }

    #[test]
    fn nested_overrides_merge_field_by_field() {
        let cfg = VehicleConfig::from_value(json!({
            "suspensionFront": {
                "springRateLeft": 300,
                "arb": { "outerDiameter": 1.125 }
            },
            "staticCornerWeights": { "LF": 610 }
        }))
        .unwrap();

        assert_eq!(cfg.suspension_front.spring_rate_left, 300.0);
        assert_eq!(cfg.suspension_front.spring_rate_right, 400.0);
        assert_eq!(cfg.suspension_front.arb.outer_diameter, 1.125);
        assert_eq!(cfg.suspension_front.arb.inner_diameter, 0.75);
        assert_eq!(cfg.suspension_front.arb.bar_length, 25.5);
        assert_eq!(cfg.static_corner_weights, CornerWeights::new(610.0, 650.0, 650.0, 700.0));
        assert_eq!(cfg.suspension_rear, SuspensionRear::default());
    }

    #[test]
    fn merged_keeps_earlier_overrides() {
        let base = VehicleConfig::stiffer_arb();
        let cfg = base.merged(&json!({ "suspensionFront": { "arb": { "barLength": 30 } } })).unwrap();
        assert_eq!(cfg.suspension_front.arb.outer_diameter, 1.125);
        assert_eq!(cfg.suspension_front.arb.bar_length, 30.0);
        assert_eq!(cfg.suspension_front.spring_rate_right, 300.0);
        assert_eq!(cfg.static_corner_weights.lf, 610.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = VehicleConfig::from_value(json!({ "cgHieght": 1.0 })).unwrap_err();
        assert!(matches!(err, LltError::Config(_)));
    }

    #[test]
    fn derived_totals() {
        let cfg = VehicleConfig::reference();
        assert_eq!(cfg.total_weight(), 2600.0);
        assert!((cfg.front_weight_fraction() - 1250.0 / 2600.0).abs() < 1e-12);
        assert!((cfg.mass() - 2600.0 / 32.174).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_corner() {
        let mut cfg = VehicleConfig::reference();
        cfg.static_corner_weights.rr = 0.0;
        assert!(matches!(Vehicle::new(cfg), Err(LltError::InvalidWeight(_))));
    }

    #[test]
    fn rejects_bad_rear_motion_ratio() {
        let mut cfg = VehicleConfig::reference();
        cfg.suspension_rear.motion_ratio = 0.0;
        assert!(matches!(Vehicle::new(cfg), Err(LltError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_non_positive_spring_rates() {
        let overrides = [
            json!({ "suspensionFront": { "springRateLeft": -2000 } }),
            json!({ "suspensionFront": { "springRateRight": 0 } }),
            json!({ "suspensionRear": { "springRate": -1 } }),
        ];
        for o in overrides {
            assert!(matches!(Vehicle::with_overrides(&o), Err(LltError::InvalidGeometry(_))), "{o}");
        }
    }

    #[test]
    fn rejects_negative_shear_modulus() {
        let o = json!({ "suspensionFront": { "arb": { "shearModulus": -11.5e6 } } });
        assert!(matches!(Vehicle::with_overrides(&o), Err(LltError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_non_finite_inputs() {
        let mut cfg = VehicleConfig::reference();
        cfg.cg_height = f64::INFINITY;
        assert!(matches!(Vehicle::new(cfg), Err(LltError::InvalidGeometry(_))));

        let mut cfg = VehicleConfig::reference();
        cfg.lateral_acceleration_g = f64::NAN;
        assert!(matches!(Vehicle::new(cfg), Err(LltError::InvalidGeometry(_))));

        let mut cfg = VehicleConfig::reference();
        cfg.static_corner_weights.lf = f64::INFINITY;
        assert!(matches!(Vehicle::new(cfg), Err(LltError::InvalidWeight(_))));
    }

    #[test]
    fn overflowing_transfer_is_an_error() {
        let o = json!({ "cgHeight": 1e306, "lateralAccelerationG": 1000 });
        let mut car = Vehicle::with_overrides(&o).unwrap();
        assert!(matches!(car.report(), Err(LltError::NonFinite(_))));
        assert!(car.transients().is_none());
    }

    #[test]
    fn cache_fills_lazily_and_resets() {
        let mut car = Vehicle::new(VehicleConfig::reference()).unwrap();
        assert!(car.transients().is_none());

        let first = car.derived().unwrap().clone();
        assert_eq!(car.transients(), Some(&first));

        car.invalidate();
        assert!(car.transients().is_none());
        assert_eq!(car.compute().unwrap(), &first);
    }

    #[test]
    fn compare_computes_both_sides() {
        let mut a = Vehicle::new(VehicleConfig::reference()).unwrap();
        let mut b = Vehicle::new(VehicleConfig::stiffer_arb()).unwrap();
        let cmp = a.compare_to(&mut b).unwrap();
        assert!(a.transients().is_some());
        assert!(b.transients().is_some());
        assert_eq!(cmp.corners.len(), 4);
        assert_eq!(cmp.axles.len(), 2);
    }

    #[test]
    fn report_carries_summary() {
        let mut car = Vehicle::new(VehicleConfig::reference()).unwrap();
        let report = car.report().unwrap();
        assert_eq!(report.vehicle.total_weight, 2600.0);
        assert_eq!(report.vehicle.lateral_acceleration_g, 2.0);
        assert!(report.lifted_corners.is_empty());
        assert!((report.weights.total_dynamic - 2600.0).abs() < 1e-9);
    }
}
