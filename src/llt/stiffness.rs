// ==============================================================================
// stiffness.rs — WHEEL RATES, ANTI-ROLL BAR RATE, ROLL STIFFNESS
// ------------------------------------------------------------------------------
// Wheel rate (lb/in):       k_w = k_spring * MR^2
//
// Anti-roll bar (hollow torsion bar):
//   J     = (pi/32) * (OD^4 - ID^4)          in^4
//   kT    = G * J / barLength                lb-in/rad
//   k_arb = kT / armLength^2                 lb/in at the arm end
//
// Roll stiffness of an axle with half-track t/2 (inches):
//   K = 2 * k * (t/2)^2                      lb-in/rad, reported /12 as lb-ft/rad
//
// The front axle carries springs (average of left/right wheel rates) plus the
// bar; the rear axle carries springs only. The ARB share of the front figure
// is reported on its own so setups can be compared by bar contribution.
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::llt::error::{LltError, LltResult};
use crate::llt::types::{ft_to_in, INCHES_PER_FOOT};

#[inline]
pub fn wheel_rate(spring_rate: f64, motion_ratio: f64) -> f64 {
    spring_rate * motion_ratio * motion_ratio
}

/// Roll stiffness (lb-ft/rad) of a wheel rate acting at both ends of a track (ft).
#[inline]
pub fn axle_roll_stiffness(rate: f64, track_width_ft: f64) -> f64 {
    let half_track_in = ft_to_in(track_width_ft) / 2.0;
    2.0 * rate * half_track_in * half_track_in / INCHES_PER_FOOT
}

// ============================================
// Anti-roll bar
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ArbGeometry {
    pub outer_diameter: f64, // in
    pub inner_diameter: f64, // in (0 for a solid bar)
    pub bar_length: f64,     // in
    pub arm_length: f64,     // in
    pub shear_modulus: f64,  // psi
}

impl Default for ArbGeometry {
    fn default() -> Self {
        Self {
            outer_diameter: 1.0,
            inner_diameter: 0.75,
            bar_length: 25.5,
            arm_length: 9.5,
            shear_modulus: 11.5e6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbRate {
    pub polar_moment: f64,        // in^4
    pub torsional_stiffness: f64, // lb-in/rad
    pub wheel_rate: f64,          // lb/in at the arm end
}

impl ArbGeometry {
    pub fn validate(&self) -> LltResult<()> {
        if !(self.inner_diameter >= 0.0)
            || !(self.outer_diameter > self.inner_diameter)
            || !self.outer_diameter.is_finite()
        {
            return Err(LltError::InvalidGeometry(format!(
                "ARB outer diameter {} must exceed inner diameter {} (inner >= 0)",
                self.outer_diameter, self.inner_diameter
            )));
        }
        if !(self.bar_length > 0.0) {
            return Err(LltError::InvalidGeometry(format!(
                "ARB bar length must be positive, got {}",
                self.bar_length
            )));
        }
        if !(self.arm_length > 0.0) {
            return Err(LltError::InvalidGeometry(format!(
                "ARB arm length must be positive, got {}",
                self.arm_length
            )));
        }
        if !(self.shear_modulus > 0.0) || !self.shear_modulus.is_finite() {
            return Err(LltError::InvalidGeometry(format!(
                "ARB shear modulus must be positive and finite, got {}",
                self.shear_modulus
            )));
        }
        Ok(())
    }

    pub fn rate(&self) -> LltResult<ArbRate> {
        self.validate()?;

        let polar_moment = (std::f64::consts::PI / 32.0)
            * (self.outer_diameter.powi(4) - self.inner_diameter.powi(4));
        let torsional_stiffness = self.shear_modulus * polar_moment / self.bar_length;
        let wheel_rate = torsional_stiffness / (self.arm_length * self.arm_length);

        Ok(ArbRate { polar_moment, torsional_stiffness, wheel_rate })
    }
}

// ============================================
// Roll stiffness aggregation
// ============================================

#[derive(Debug, Clone, Copy)]
pub struct FrontAxleSprings {
    pub spring_rate_left: f64,
    pub spring_rate_right: f64,
    pub motion_ratio_left: f64,
    pub motion_ratio_right: f64,
    pub arb_rate: f64,       // lb/in
    pub track_width: f64,    // ft
}

#[derive(Debug, Clone, Copy)]
pub struct RearAxleSprings {
    pub spring_rate: f64,
    pub motion_ratio: f64,
    pub track_width: f64,    // ft
}

/// All roll-stiffness figures are lb-ft/rad; rates are lb/in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollStiffness {
    pub wheel_rate_left: f64,
    pub wheel_rate_right: f64,
    pub front_wheel_rate_avg: f64,
    pub arb_wheel_rate: f64,
    pub front_spring_roll_stiffness: f64,
    pub front_arb_roll_stiffness: f64,
    pub front: f64,
    pub arb_percentage: f64,
    pub rear_wheel_rate: f64,
    pub rear: f64,
    pub total: f64,
}

impl RollStiffness {
    /// Fraction of the total carried by the front axle.
    pub fn front_share(&self) -> f64 {
        self.front / self.total
    }

    pub fn rear_share(&self) -> f64 {
        self.rear / self.total
    }
}

pub fn roll_stiffness(front: &FrontAxleSprings, rear: &RearAxleSprings) -> LltResult<RollStiffness> {
    let wheel_rate_left = wheel_rate(front.spring_rate_left, front.motion_ratio_left);
    let wheel_rate_right = wheel_rate(front.spring_rate_right, front.motion_ratio_right);
    let front_wheel_rate_avg = (wheel_rate_left + wheel_rate_right) / 2.0;

    let front_spring_roll_stiffness = axle_roll_stiffness(front_wheel_rate_avg, front.track_width);
    let front_arb_roll_stiffness = axle_roll_stiffness(front.arb_rate, front.track_width);
    let front_total = front_spring_roll_stiffness + front_arb_roll_stiffness;

    let arb_percentage = if front_total > 0.0 {
        front_arb_roll_stiffness / front_total * 100.0
    } else {
        0.0
    };

    let rear_wheel_rate = wheel_rate(rear.spring_rate, rear.motion_ratio);
    let rear_total = axle_roll_stiffness(rear_wheel_rate, rear.track_width);

    let total = front_total + rear_total;
    if !(total > 0.0) {
        return Err(LltError::DegenerateStiffness { total });
    }

    Ok(RollStiffness {
        wheel_rate_left,
        wheel_rate_right,
        front_wheel_rate_avg,
        arb_wheel_rate: front.arb_rate,
        front_spring_roll_stiffness,
        front_arb_roll_stiffness,
        front: front_total,
        arb_percentage,
        rear_wheel_rate,
        rear: rear_total,
        total,
    })
}
