//! # Scene model
//!
//! Holds the field-frame placement of every landmark and the fixed transform
//! from the robot body to the camera. The scene is built once during
//! initialisation and cannot be changed afterwards; pose sources read the
//! offsets from it when they are activated.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::HashSet;
use log::debug;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

// Internal
pub use params::*;
use crate::loc::Orientation;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of landmarks placed on the field.
pub const NUM_LANDMARKS: usize = 4;

/// Millimeters per inch, field dimensions are specified in inches.
pub const MM_PER_INCH: f64 = 25.4;

/// Distance from the centre of the field to each perimeter wall.
///
/// Units: millimeters
pub const FIELD_HALF_WIDTH_MM: f64 = (12.0 * 6.0) * MM_PER_INCH;

/// Height of the centre of each landmark above the floor.
///
/// Units: millimeters
pub const TARGET_HEIGHT_MM: f64 = 6.0 * MM_PER_INCH;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while building the scene.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("Expected {expected} landmarks but {found} were provided")]
    WrongLandmarkCount {
        expected: usize,
        found: usize
    },

    #[error("Landmark id \"{0}\" is used more than once")]
    DuplicateId(String),

    #[error("Landmark ids must not be empty")]
    EmptyId,

    #[error("Landmark \"{0}\" has not been placed on the field")]
    Unplaced(String),

    #[error("The placement of \"{0}\" contains non-finite values")]
    NonFinite(String),

    #[error("Landmark \"{0}\" has already been placed and cannot be moved")]
    Immutable(String)
}

/// The direction the camera faces on the robot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CameraFacing {
    Front,
    Back
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A visual marker with a known placement in the field frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    id: String,

    /// Pose of the landmark in the FD frame, `None` until placed
    placement: Option<Isometry3<f64>>
}

/// Position and facing of the camera on the robot body.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraOffset {
    /// Displacement forwards from the robot centre.
    ///
    /// Units: millimeters
    pub forward_mm: f64,

    /// Displacement to the left of the robot centre line.
    ///
    /// Units: millimeters
    pub left_mm: f64,

    /// Height above the floor.
    ///
    /// Units: millimeters
    pub vertical_mm: f64,

    pub facing: CameraFacing
}

/// The immutable scene: landmarks in their fixed scan order plus the camera
/// mounting.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    landmarks: Vec<Landmark>,

    camera_offset: CameraOffset,

    /// Camera (CM) frame in the robot body (RB) frame
    camera_rb: Isometry3<f64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Landmark {
    /// Create a new landmark which is not yet placed on the field.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            placement: None
        }
    }

    /// Create a landmark and place it at the given position and extrinsic XYZ
    /// orientation.
    pub fn placed(id: &str, placement: &Placement) -> Result<Self, SceneError> {
        let mut landmark = Self::new(id);
        landmark.place(placement)?;
        Ok(landmark)
    }

    /// Set the placement of the landmark in the field frame.
    ///
    /// A landmark can only be placed once.
    pub fn place(&mut self, placement: &Placement) -> Result<(), SceneError> {
        if self.placement.is_some() {
            return Err(SceneError::Immutable(self.id.clone()));
        }

        if !placement.is_finite() {
            return Err(SceneError::NonFinite(self.id.clone()));
        }

        self.placement = Some(placement.to_isometry());

        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The pose of the landmark in the field frame, or `None` if unplaced.
    pub fn placement(&self) -> Option<&Isometry3<f64>> {
        self.placement.as_ref()
    }
}

impl CameraOffset {
    /// Get the camera frame in the robot body frame.
    ///
    /// The camera is rotated about the robot's Y axis so that its optical
    /// (+Z) axis looks along +RB_X when front facing or -RB_X when back facing.
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let first_angle_deg: f64 = match self.facing {
            CameraFacing::Front => 90.0,
            CameraFacing::Back => -90.0
        };

        // Extrinsic YZX with the second and third angles zero reduces to a
        // single rotation about Y.
        let rotation = UnitQuaternion::from_axis_angle(
            &Vector3::y_axis(),
            first_angle_deg.to_radians()
        );

        Isometry3::from_parts(
            Translation3::new(self.forward_mm, self.left_mm, self.vertical_mm),
            rotation
        )
    }

    fn is_finite(&self) -> bool {
        self.forward_mm.is_finite() && self.left_mm.is_finite() && self.vertical_mm.is_finite()
    }
}

impl Default for CameraOffset {
    fn default() -> Self {
        Self {
            forward_mm: 110.0,
            left_mm: 0.0,
            vertical_mm: 200.0,
            facing: CameraFacing::Back
        }
    }
}

impl SceneConfig {

    /// Build the scene from an ordered list of landmarks and the camera
    /// offset.
    ///
    /// The order of `landmarks` is the order in which they are scanned for
    /// visibility.
    pub fn configure(
        landmarks: Vec<Landmark>,
        camera_offset: CameraOffset
    ) -> Result<Self, SceneError> {

        if landmarks.len() != NUM_LANDMARKS {
            return Err(SceneError::WrongLandmarkCount {
                expected: NUM_LANDMARKS,
                found: landmarks.len()
            });
        }

        let mut ids = HashSet::new();

        for landmark in landmarks.iter() {
            if landmark.id.is_empty() {
                return Err(SceneError::EmptyId);
            }
            if !ids.insert(landmark.id.as_str()) {
                return Err(SceneError::DuplicateId(landmark.id.clone()));
            }
            if landmark.placement.is_none() {
                return Err(SceneError::Unplaced(landmark.id.clone()));
            }
        }

        if !camera_offset.is_finite() {
            return Err(SceneError::NonFinite(String::from("camera")));
        }

        debug!(
            "Scene configured with landmarks {:?}",
            landmarks.iter().map(|l| l.id()).collect::<Vec<_>>()
        );

        Ok(Self {
            landmarks,
            camera_rb: camera_offset.to_isometry(),
            camera_offset
        })
    }

    /// Build the scene from loaded parameters.
    pub fn from_params(params: &SceneParams) -> Result<Self, SceneError> {
        let landmarks = params.landmarks
            .iter()
            .map(|l| Landmark::placed(&l.id, &l.placement))
            .collect::<Result<Vec<_>, _>>()?;

        Self::configure(landmarks, params.camera)
    }

    /// The Rover Ruckus field: one landmark in the middle of each perimeter
    /// wall, all facing into the field.
    pub fn rover_ruckus(camera_offset: CameraOffset) -> Result<Self, SceneError> {
        Self::from_params(&SceneParams::rover_ruckus(camera_offset))
    }

    /// The landmarks in scan order.
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn landmark(&self, id: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.id == id)
    }

    pub fn landmark_ids(&self) -> Vec<String> {
        self.landmarks.iter().map(|l| l.id.clone()).collect()
    }

    pub fn camera_offset(&self) -> &CameraOffset {
        &self.camera_offset
    }

    /// The camera frame in the robot body frame.
    pub fn camera_rb(&self) -> &Isometry3<f64> {
        &self.camera_rb
    }
}

impl Placement {
    pub fn new(translation_mm: [f64; 3], rotation_deg: [f64; 3]) -> Self {
        Self {
            translation_mm,
            rotation_deg
        }
    }

    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::new(
                self.translation_mm[0],
                self.translation_mm[1],
                self.translation_mm[2]
            ),
            Orientation::from(self.rotation_deg).to_quaternion()
        )
    }

    pub fn is_finite(&self) -> bool {
        self.translation_mm.iter().chain(self.rotation_deg.iter()).all(|v| v.is_finite())
    }
}
