//! Velocity samples derived from consecutive poses.

use serde::{Deserialize, Serialize};

use crate::pose::TimestampNs;

/// Direction of travel. Either a unit vector or exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub x: f64,
    pub y: f64,
}

impl Heading {
    /// Direction is undefined (vehicle stationary).
    pub const ZERO: Heading = Heading { x: 0.0, y: 0.0 };

    /// Normalize `(dx, dy)` when its length exceeds `epsilon`, else `ZERO`.
    pub fn from_delta(dx: f64, dy: f64, epsilon: f64) -> Self {
        let norm = dx.hypot(dy);
        if norm > epsilon && norm > 0.0 {
            Self {
                x: dx / norm,
                y: dy / norm,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Speed and heading estimated from one pair of retained poses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocitySample {
    /// Timestamp of the earlier pose of the pair.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Displacement magnitude between the two poses (m per sampling step).
    pub speed: f64,

    pub heading: Heading,

    /// False when the pair spans a frame change or an untrusted time gap.
    pub valid: bool,
}

impl VelocitySample {
    /// Whether this sample counts as motion under `static_threshold`.
    pub fn is_moving(&self, static_threshold: f64) -> bool {
        self.valid && self.speed >= static_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_unit_length() {
        let h = Heading::from_delta(3.0, 4.0, 0.01);
        assert!((h.norm() - 1.0).abs() < 1e-12);
        assert!((h.x - 0.6).abs() < 1e-12);
        assert!((h.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_heading_below_epsilon_is_zero() {
        assert_eq!(Heading::from_delta(0.005, 0.0, 0.01), Heading::ZERO);
        assert_eq!(Heading::from_delta(0.0, 0.0, 0.0), Heading::ZERO);
        assert!(Heading::from_delta(0.0, 0.0, 0.0).is_zero());
    }

    #[test]
    fn test_invalid_sample_never_moving() {
        let sample = VelocitySample {
            timestamp_ns: 0,
            speed: 10.0,
            heading: Heading::ZERO,
            valid: false,
        };
        assert!(!sample.is_moving(0.05));
    }
}
