//! Core shared types for `llt` (engine-agnostic).
// llt/types.rs
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

// ----- unit helpers -----
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const GRAVITY_FT_S2: f64 = 32.174;

#[inline] pub fn ft_to_in(ft: f64) -> f64 { ft * INCHES_PER_FOOT }
#[inline] pub fn deg_to_rad(deg: f64) -> f64 { deg * std::f64::consts::PI / 180.0 }

// ============================================
// Corner identification
// ============================================

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Corner { LF, RF, LR, RR }

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::LF, Corner::RF, Corner::LR, Corner::RR];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::LF => "LF",
            Corner::RF => "RF",
            Corner::LR => "LR",
            Corner::RR => "RR",
        }
    }

    pub fn axle(&self) -> Axle {
        match self {
            Corner::LF | Corner::RF => Axle::Front,
            Corner::LR | Corner::RR => Axle::Rear,
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Corner::LF | Corner::LR)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axle { Front, Rear }

impl Axle {
    pub const ALL: [Axle; 2] = [Axle::Front, Axle::Rear];

    pub fn corners(&self) -> [Corner; 2] {
        match self {
            Axle::Front => [Corner::LF, Corner::RF],
            Axle::Rear => [Corner::LR, Corner::RR],
        }
    }
}

impl fmt::Display for Axle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axle::Front => write!(f, "Front"),
            Axle::Rear => write!(f, "Rear"),
        }
    }
}

// ============================================
// ----- corner weights (lbs) -----------------
// ============================================

/// Normal load at each contact patch. Static or dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CornerWeights {
    #[serde(rename = "LF")]
    pub lf: f64,
    #[serde(rename = "RF")]
    pub rf: f64,
    #[serde(rename = "LR")]
    pub lr: f64,
    #[serde(rename = "RR")]
    pub rr: f64,
}

impl Default for CornerWeights {
    fn default() -> Self {
        Self { lf: 600.0, rf: 650.0, lr: 650.0, rr: 700.0 }
    }
}

impl CornerWeights {
    pub fn new(lf: f64, rf: f64, lr: f64, rr: f64) -> Self {
        Self { lf, rf, lr, rr }
    }

    pub fn total(&self) -> f64 {
        self.lf + self.rf + self.lr + self.rr
    }

    pub fn axle(&self, axle: Axle) -> f64 {
        let [l, r] = axle.corners();
        self[l] + self[r]
    }

    /// Front axle share of the total, 0..1.
    pub fn front_fraction(&self) -> f64 {
        self.axle(Axle::Front) / self.total()
    }

    /// RF + LR ("wedge").
    pub fn cross(&self) -> f64 {
        self.rf + self.lr
    }

    pub fn iter(&self) -> impl Iterator<Item = (Corner, f64)> + '_ {
        Corner::ALL.into_iter().map(move |c| (c, self[c]))
    }
}

impl Index<Corner> for CornerWeights {
    type Output = f64;

    fn index(&self, corner: Corner) -> &f64 {
        match corner {
            Corner::LF => &self.lf,
            Corner::RF => &self.rf,
            Corner::LR => &self.lr,
            Corner::RR => &self.rr,
        }
    }
}

impl IndexMut<Corner> for CornerWeights {
    fn index_mut(&mut self, corner: Corner) -> &mut f64 {
        match corner {
            Corner::LF => &mut self.lf,
            Corner::RF => &mut self.rf,
            Corner::LR => &mut self.lr,
            Corner::RR => &mut self.rr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axle_sums_and_fraction() {
        let w = CornerWeights::default();
        assert_eq!(w.total(), 2600.0);
        assert_eq!(w.axle(Axle::Front), 1250.0);
        assert_eq!(w.axle(Axle::Rear), 1350.0);
        assert!((w.front_fraction() - 1250.0 / 2600.0).abs() < 1e-12);
        assert_eq!(w.cross(), 1300.0);
    }

    #[test]
    fn index_by_corner() {
        let mut w = CornerWeights::new(1.0, 2.0, 3.0, 4.0);
        w[Corner::LR] = 30.0;
        let seen: Vec<_> = w.iter().map(|(c, v)| (c.as_str(), v)).collect();
        assert_eq!(seen, vec![("LF", 1.0), ("RF", 2.0), ("LR", 30.0), ("RR", 4.0)]);
        assert_eq!(Corner::RR.axle(), Axle::Rear);
        assert!(Corner::LF.is_left());
    }

    #[test]
    fn deserializes_partial_weights() {
        let w: CornerWeights = serde_json::from_str(r#"{"LF": 610}"#).unwrap();
        assert_eq!(w, CornerWeights::new(610.0, 650.0, 650.0, 700.0));
    }
}
