//! # Localisation types
//!
//! The robot pose in the field frame as reported by a pose source, along with
//! the Euler decomposition used to read heading out of it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and attitude in the field frame) of the robot.
///
/// More specifically this represents the Robot Body (RB) frame in the Field
/// (FD) frame. The field frame has its origin at the centre of the field, Z
/// pointing up.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {

    /// The position in the FD frame
    ///
    /// Units: millimeters
    pub position_mm_fd: Vector3<f64>,

    /// The attitude of the robot in the FD frame. This is a quaternion that 
    /// will rotate an object from the RB frame into the FD frame.
    pub attitude_q_fd: UnitQuaternion<f64>
}

/// Orientation expressed as extrinsic XYZ Euler angles, rotating first about
/// the fixed X axis, then the fixed Y axis, then the fixed Z axis.
///
/// Units: degrees
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Default)]
pub struct Orientation {
    /// First angle, about X
    pub roll_deg: f64,

    /// Second angle, about Y
    pub pitch_deg: f64,

    /// Third angle, about Z. For a robot on the field this is its heading.
    pub yaw_deg: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {

    /// Build a pose from a position and an extrinsic XYZ orientation.
    pub fn from_position_orientation(
        position_mm_fd: Vector3<f64>,
        orientation: Orientation
    ) -> Self {
        Self {
            position_mm_fd,
            attitude_q_fd: orientation.to_quaternion()
        }
    }

    /// Build a pose lying flat on the field, `heading_deg` from the FD_X axis.
    pub fn on_field(x_mm: f64, y_mm: f64, z_mm: f64, heading_deg: f64) -> Self {
        Self::from_position_orientation(
            Vector3::new(x_mm, y_mm, z_mm),
            Orientation { roll_deg: 0.0, pitch_deg: 0.0, yaw_deg: heading_deg }
        )
    }

    pub fn from_isometry(iso: &Isometry3<f64>) -> Self {
        Self {
            position_mm_fd: iso.translation.vector,
            attitude_q_fd: iso.rotation
        }
    }

    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.position_mm_fd),
            self.attitude_q_fd
        )
    }

    /// Return the attitude decomposed into extrinsic XYZ Euler angles.
    pub fn get_orientation(&self) -> Orientation {
        Orientation::from_quaternion(&self.attitude_q_fd)
    }

    /// Return the heading (angle to the positive FD_X axis, counter-clockwise
    /// positive) of the robot in degrees.
    ///
    /// Heading is the third angle of the extrinsic XYZ decomposition and lies
    /// in the range [-180, 180].
    pub fn get_heading_deg(&self) -> f64 {
        self.get_orientation().yaw_deg
    }

    /// True if every component of the pose is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position_mm_fd.iter().all(|v| v.is_finite())
            && self.attitude_q_fd.coords.iter().all(|v| v.is_finite())
    }
}

impl Orientation {

    /// Decompose a rotation into extrinsic XYZ angles.
    pub fn from_quaternion(q: &UnitQuaternion<f64>) -> Self {
        // nalgebra's (roll, pitch, yaw) are R = Rz(yaw) * Ry(pitch) * Rx(roll),
        // which is exactly the extrinsic XYZ sequence.
        let (roll, pitch, yaw) = q.euler_angles();

        Self {
            roll_deg: roll.to_degrees(),
            pitch_deg: pitch.to_degrees(),
            yaw_deg: yaw.to_degrees()
        }
    }

    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(
            self.roll_deg.to_radians(),
            self.pitch_deg.to_radians(),
            self.yaw_deg.to_radians()
        )
    }
}

impl From<[f64; 3]> for Orientation {
    fn from(angles_deg: [f64; 3]) -> Self {
        Self {
            roll_deg: angles_deg[0],
            pitch_deg: angles_deg[1],
            yaw_deg: angles_deg[2]
        }
    }
}
