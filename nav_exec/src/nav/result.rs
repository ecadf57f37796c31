//! Navigation result and the guidance quantity calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::BTreeMap;
use serde::Serialize;

use super::Axis;
use crate::loc::Pose;
use util::maths::{clamp, hypot};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Everything the navigator knows after one update.
///
/// All quantities are computed together from the same pose.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct PoseResult {
    /// True if a landmark was visible during the update. The pose may still
    /// be one reported on an earlier cycle.
    pub visible: bool,

    /// Lateral offset from the target line.
    ///
    /// Units: millimeters
    pub robot_x_mm: f64,

    /// Forward/back offset.
    ///
    /// Units: millimeters
    pub robot_y_mm: f64,

    /// Height.
    ///
    /// Units: millimeters
    pub robot_z_mm: f64,

    /// Heading about FD_Z, counter-clockwise positive.
    ///
    /// Units: degrees
    pub robot_bearing_deg: f64,

    /// Horizontal distance from the robot to the field origin.
    ///
    /// Units: millimeters
    pub target_range_mm: f64,

    /// Angle from the FD_X axis to the line from the robot to the origin.
    ///
    /// Units: degrees
    pub target_bearing_deg: f64,

    /// Target bearing minus robot bearing, the heading error to null out to
    /// face the origin. Not wrapped, so may lie outside [-180, 180].
    ///
    /// Units: degrees
    pub relative_bearing_deg: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PoseResult {
    /// Calculate all guidance quantities from the given pose.
    pub fn from_pose(visible: bool, pose: &Pose) -> Self {
        let x = pose.position_mm_fd.x;
        let y = pose.position_mm_fd.y;
        let robot_bearing_deg = pose.get_heading_deg();

        let target_range_mm = hypot(x, y);
        let target_bearing_deg = target_bearing_deg(y, target_range_mm);

        Self {
            visible,
            robot_x_mm: x,
            robot_y_mm: y,
            robot_z_mm: pose.position_mm_fd.z,
            robot_bearing_deg,
            target_range_mm,
            target_bearing_deg,
            relative_bearing_deg: target_bearing_deg - robot_bearing_deg
        }
    }

    /// Position of the robot along the given axis.
    pub fn coordinate(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.robot_x_mm,
            Axis::Y => self.robot_y_mm,
            Axis::Z => self.robot_z_mm
        }
    }

    /// True if the robot is strictly within `tolerance_mm` of `target_mm`
    /// along `axis`.
    pub fn is_near(&self, axis: Axis, target_mm: f64, tolerance_mm: f64) -> bool {
        (self.coordinate(axis) - target_mm).abs() < tolerance_mm
    }

    /// Named guidance quantities for external consumers.
    pub fn to_named(&self) -> BTreeMap<&'static str, f64> {
        let mut map = BTreeMap::new();

        map.insert("robotX", self.robot_x_mm);
        map.insert("robotY", self.robot_y_mm);
        map.insert("robotZ", self.robot_z_mm);
        map.insert("robotBearing", self.robot_bearing_deg);
        map.insert("targetRange", self.target_range_mm);
        map.insert("targetBearing", self.target_bearing_deg);
        map.insert("relativeBearing", self.relative_bearing_deg);

        map
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Bearing of the origin from the FD_X axis for a robot `y_mm` off the X axis
/// and `range_mm` from the origin.
///
/// At zero range the bearing is undefined and is taken to be zero.
pub fn target_bearing_deg(y_mm: f64, range_mm: f64) -> f64 {
    if range_mm == 0.0 {
        return 0.0;
    }

    // Rounding can push the ratio just outside the domain of asin
    let ratio = clamp(&(y_mm / range_mm), &-1.0, &1.0);

    (-ratio.asin()).to_degrees()
}
