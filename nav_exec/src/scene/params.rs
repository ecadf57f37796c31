//! Parameters structure for the scene

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use super::{CameraOffset, FIELD_HALF_WIDTH_MM, TARGET_HEIGHT_MM};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Placement of a landmark in the field frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Position of the landmark centre.
    ///
    /// Units: millimeters,
    /// Frame: Field
    pub translation_mm: [f64; 3],

    /// Orientation of the landmark as extrinsic XYZ Euler angles.
    ///
    /// Units: degrees
    pub rotation_deg: [f64; 3]
}

/// Parameters of a single landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkParams {
    /// Name of the landmark, unique within the scene
    pub id: String,

    pub placement: Placement
}

/// Parameters describing the whole scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    /// Landmarks in the order they shall be scanned
    pub landmarks: Vec<LandmarkParams>,

    /// Mounting of the camera on the robot
    pub camera: CameraOffset
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SceneParams {
    /// Parameters for the Rover Ruckus field.
    ///
    /// Looking from the red alliance station towards the centre, FD_X runs
    /// left to right, FD_Y runs from the red to the blue alliance station and
    /// FD_Z points up from the floor.
    pub fn rover_ruckus(camera: CameraOffset) -> Self {
        let w = FIELD_HALF_WIDTH_MM;
        let h = TARGET_HEIGHT_MM;

        let landmark = |id: &str, translation_mm: [f64; 3], yaw_deg: f64| LandmarkParams {
            id: id.to_string(),
            placement: Placement {
                translation_mm,
                rotation_deg: [90.0, 0.0, yaw_deg]
            }
        };

        Self {
            landmarks: vec![
                landmark("Blue-Rover", [0.0, w, h], 0.0),
                landmark("Red-Footprint", [0.0, -w, h], 180.0),
                landmark("Front-Craters", [-w, 0.0, h], 90.0),
                landmark("Back-Space", [w, 0.0, h], -90.0),
            ],
            camera
        }
    }
}
