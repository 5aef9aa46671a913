// ==============================================================================
// geometry.rs — CONTROL-ARM GEOMETRY -> MOTION RATIO
// ------------------------------------------------------------------------------
// The shock sits shockMountDistance inboard of the arm pivot along an arm of
// controlArmLength, leaning shockAngle degrees off vertical:
//
//     MR = (shockMountDistance / controlArmLength) * cos(shockAngle)
//
// Angles outside [-90, 90] are accepted; cos() then goes negative and so does
// the ratio. Wheel rates square it, so only the sign of the reported ratio
// changes. Keeping the angle sane is the caller's job.
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::llt::error::{LltError, LltResult};
use crate::llt::types::deg_to_rad;

/// One front control arm (inches, degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ControlArm {
    pub control_arm_length: f64,    // in
    pub shock_mount_distance: f64,  // in, from pivot
    pub shock_angle: f64,           // deg off vertical
}

impl Default for ControlArm {
    fn default() -> Self {
        Self {
            control_arm_length: 15.0,
            shock_mount_distance: 12.375,
            shock_angle: 21.0,
        }
    }
}

impl ControlArm {
    pub fn motion_ratio(&self) -> LltResult<f64> {
        motion_ratio(self.control_arm_length, self.shock_mount_distance, self.shock_angle)
    }
}

pub fn motion_ratio(arm_length: f64, shock_mount_distance: f64, shock_angle_deg: f64) -> LltResult<f64> {
    if !(arm_length > 0.0) {
        return Err(LltError::InvalidGeometry(format!(
            "control arm length must be positive, got {arm_length}"
        )));
    }
    let ratio = (shock_mount_distance / arm_length) * deg_to_rad(shock_angle_deg).cos();
    if !ratio.is_finite() {
        return Err(LltError::InvalidGeometry(format!(
            "motion ratio is not finite (shock mount {shock_mount_distance}, angle {shock_angle_deg})"
        )));
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_shock_is_lever_ratio() {
        let mr = motion_ratio(15.0, 12.0, 0.0).unwrap();
        assert!((mr - 0.8).abs() < 1e-12);
    }

    #[test]
    fn reference_arm() {
        let mr = ControlArm::default().motion_ratio().unwrap();
        assert!((mr - 0.770_203_851_860_191_4).abs() < 1e-12);
    }

    #[test]
    fn angle_past_vertical_flips_sign() {
        let mr = motion_ratio(15.0, 12.0, 180.0).unwrap();
        assert!((mr + 0.8).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_arm() {
        assert!(matches!(motion_ratio(0.0, 12.0, 10.0), Err(LltError::InvalidGeometry(_))));
        assert!(matches!(motion_ratio(-3.0, 12.0, 10.0), Err(LltError::InvalidGeometry(_))));
        assert!(matches!(motion_ratio(f64::NAN, 12.0, 10.0), Err(LltError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_unbounded_mount_or_angle() {
        assert!(matches!(motion_ratio(15.0, f64::INFINITY, 10.0), Err(LltError::InvalidGeometry(_))));
        assert!(matches!(motion_ratio(15.0, 12.0, f64::NAN), Err(LltError::InvalidGeometry(_))));
    }
}
