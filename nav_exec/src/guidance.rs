//! # Guidance
//!
//! Steering guidance derived from a navigation result: which way to turn,
//! which way to strafe and how far there is to go, plus proportional drive
//! demands for a holonomic drive base.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::nav::PoseResult;
use util::maths::{clamp, wrap_180_deg};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum TurnDirection {
    /// Clockwise
    Cw,
    /// Counter-clockwise
    Ccw
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum StrafeDirection {
    Left,
    Right
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Human readable steering guidance.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Guidance {
    pub turn: TurnDirection,

    /// Units: degrees
    pub turn_deg: f64,

    pub strafe: StrafeDirection,

    /// Units: millimeters
    pub strafe_mm: f64,

    /// Units: millimeters
    pub distance_mm: f64
}

/// Gains turning guidance errors into normalised drive demands.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveGains {
    /// Rate of response for heading error
    ///
    /// Units: 1/degrees
    pub yaw: f64,

    /// Rate of response for off-axis error
    ///
    /// Units: 1/millimeters
    pub lateral: f64,

    /// Rate of response for target distance errors
    ///
    /// Units: 1/millimeters
    pub axial: f64
}

/// Normalised drive demands, each in the range [-1, 1].
///
/// Axial and lateral demands act along FD_X and FD_Y respectively, yaw is
/// counter-clockwise positive.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct DriveDemand {
    pub axial: f64,
    pub lateral: f64,
    pub yaw: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Guidance {
    pub fn from_result(result: &PoseResult) -> Self {
        Self {
            turn: match result.relative_bearing_deg < 0.0 {
                true => TurnDirection::Cw,
                false => TurnDirection::Ccw
            },
            turn_deg: result.relative_bearing_deg.abs(),
            strafe: match result.robot_y_mm < 0.0 {
                true => StrafeDirection::Left,
                false => StrafeDirection::Right
            },
            strafe_mm: result.robot_y_mm.abs(),
            distance_mm: result.robot_x_mm.abs()
        }
    }
}

impl Default for DriveGains {
    fn default() -> Self {
        Self {
            yaw: 0.018,
            lateral: 0.0027,
            axial: 0.0017
        }
    }
}

impl DriveDemand {
    /// Proportional demands which drive the robot to the field origin while
    /// turning to face it.
    ///
    /// With no visible target all demands are zero, the robot holds position.
    pub fn from_result(result: &PoseResult, gains: &DriveGains) -> Self {
        if !result.visible {
            return Self::default();
        }

        Self {
            axial: clamp(&(-result.robot_x_mm * gains.axial), &-1.0, &1.0),
            lateral: clamp(&(-result.robot_y_mm * gains.lateral), &-1.0, &1.0),
            yaw: clamp(
                &(wrap_180_deg(result.relative_bearing_deg) * gains.yaw),
                &-1.0,
                &1.0
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;

    #[test]
    fn test_guidance() {
        let r = PoseResult::from_pose(true, &Pose::on_field(500.0, 1000.0, 150.0, 10.0));
        let g = Guidance::from_result(&r);

        assert_eq!(g.turn, TurnDirection::Cw);
        assert!((g.turn_deg - 73.43494882292201).abs() < 1e-6);
        assert_eq!(g.strafe, StrafeDirection::Right);
        assert_eq!(g.strafe_mm, 1000.0);
        assert_eq!(g.distance_mm, 500.0);

        let r = PoseResult::from_pose(true, &Pose::on_field(-300.0, -20.0, 0.0, -90.0));
        let g = Guidance::from_result(&r);
        assert_eq!(g.turn, TurnDirection::Ccw);
        assert_eq!(g.strafe, StrafeDirection::Left);
        assert_eq!(g.strafe_mm, 20.0);
        assert_eq!(g.distance_mm, 300.0);
    }

    #[test]
    fn test_drive_demand() {
        let gains = DriveGains::default();
        let r = PoseResult::from_pose(true, &Pose::on_field(100.0, -200.0, 0.0, 60.0));
        let d = DriveDemand::from_result(&r, &gains);

        assert!((d.axial - -0.17).abs() < 1e-12);
        assert!((d.lateral - 0.54).abs() < 1e-12);
        assert!((d.yaw - r.relative_bearing_deg * 0.018).abs() < 1e-12);
    }

    #[test]
    fn test_drive_demand_saturates() {
        let gains = DriveGains::default();
        let r = PoseResult::from_pose(true, &Pose::on_field(-1800.0, 1800.0, 0.0, 0.0));
        let d = DriveDemand::from_result(&r, &gains);

        assert_eq!(d.axial, 1.0);
        assert_eq!(d.lateral, -1.0);
    }

    #[test]
    fn test_drive_demand_wraps_heading_error() {
        let gains = DriveGains::default();
        // Relative bearing is about -233 deg, the short way round is +127 deg
        let r = PoseResult::from_pose(true, &Pose::on_field(500.0, 1000.0, 0.0, 170.0));
        let d = DriveDemand::from_result(&r, &gains);

        assert_eq!(d.yaw, 1.0);
    }

    #[test]
    fn test_drive_demand_not_visible() {
        let mut r = PoseResult::from_pose(true, &Pose::on_field(100.0, -200.0, 0.0, 0.0));
        r.visible = false;

        assert_eq!(
            DriveDemand::from_result(&r, &DriveGains::default()),
            DriveDemand::default()
        );
    }
}
