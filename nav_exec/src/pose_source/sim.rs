//! Simulated pose source
//!
//! Given the true robot pose the simulation decides which landmarks the
//! camera can see and reconstructs the robot pose through the visible ones,
//! the same chain of transforms a real localisation engine would apply.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::HashSet;
use log::trace;
use nalgebra::{Isometry3, Vector3};
use serde::Deserialize;

use super::PoseSource;
use crate::loc::Pose;
use crate::scene::SceneConfig;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the simulated camera.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct SimParams {
    /// Half of the camera's field of view, measured from the optical axis.
    ///
    /// Units: degrees
    pub half_fov_deg: f64,

    /// Furthest distance at which a landmark can be detected.
    ///
    /// Units: millimeters
    pub max_range_mm: f64
}

/// Pose source driven by a simulated robot.
pub struct SimPoseSource {
    params: SimParams,

    scene: Option<SceneConfig>,

    /// True pose of the robot in the field frame
    robot_pose: Option<Pose>,

    /// Landmarks which have new data since they were last queried
    fresh: HashSet<String>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            half_fov_deg: 45.0,
            max_range_mm: 4000.0
        }
    }
}

impl SimPoseSource {
    pub fn new(params: SimParams) -> Self {
        Self {
            params,
            scene: None,
            robot_pose: None,
            fresh: HashSet::new()
        }
    }

    /// Move the simulated robot. Every landmark will report new data on its
    /// next query.
    pub fn set_robot_pose(&mut self, pose: Pose) {
        self.robot_pose = Some(pose);

        if let Some(ref scene) = self.scene {
            self.fresh = scene.landmark_ids().into_iter().collect();
        }
    }

    pub fn robot_pose(&self) -> Option<&Pose> {
        self.robot_pose.as_ref()
    }

    /// Get the landmark's pose in the camera frame, if both the scene and the
    /// robot are known.
    fn landmark_in_camera(&self, landmark: &str) -> Option<(Isometry3<f64>, Isometry3<f64>)> {
        let scene = self.scene.as_ref()?;
        let robot_fd = self.robot_pose?.to_isometry();
        let landmark_fd = *scene.landmark(landmark)?.placement()?;

        let camera_fd = robot_fd * scene.camera_rb();

        Some((camera_fd.inverse() * landmark_fd, landmark_fd))
    }
}

impl PoseSource for SimPoseSource {
    fn activate(&mut self, scene: &SceneConfig) {
        self.scene = Some(scene.clone());

        if self.robot_pose.is_some() {
            self.fresh = scene.landmark_ids().into_iter().collect();
        }
    }

    fn landmarks(&self) -> Vec<String> {
        match self.scene {
            Some(ref s) => s.landmark_ids(),
            None => vec![]
        }
    }

    fn is_visible(&self, landmark: &str) -> bool {
        let (landmark_cm, _) = match self.landmark_in_camera(landmark) {
            Some(l) => l,
            None => return false
        };

        let los_cm = landmark_cm.translation.vector;
        let range_mm = los_cm.norm();

        // Must be in front of the camera and within range
        if los_cm.z <= 0.0 || range_mm > self.params.max_range_mm {
            return false;
        }

        // Must be within the field of view
        let off_axis_deg = los_cm.angle(&Vector3::z()).to_degrees();
        if off_axis_deg > self.params.half_fov_deg {
            return false;
        }

        // The printed face (landmark +Z) must point back at the camera
        let face_normal_cm = landmark_cm.rotation * Vector3::z();
        let visible = face_normal_cm.dot(&los_cm) < 0.0;

        trace!(
            "{} at {:.0} mm, {:.1} deg off axis, visible: {}",
            landmark, range_mm, off_axis_deg, visible
        );

        visible
    }

    fn updated_robot_pose(&mut self, landmark: &str) -> Option<Pose> {
        if !self.is_visible(landmark) || !self.fresh.remove(landmark) {
            return None;
        }

        let scene = self.scene.as_ref()?;
        let (landmark_cm, landmark_fd) = self.landmark_in_camera(landmark)?;

        // Work back from the landmark to the camera and then to the robot
        // body.
        let camera_fd = landmark_fd * landmark_cm.inverse();
        let robot_fd = camera_fd * scene.camera_rb().inverse();

        Some(Pose::from_isometry(&robot_fd))
    }
}
