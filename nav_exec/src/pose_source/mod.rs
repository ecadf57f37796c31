//! # Pose sources
//!
//! A pose source is the localisation engine which detects landmarks and
//! reports the robot pose in the field frame computed through them. The
//! navigator only ever talks to it through the [`PoseSource`] trait.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod scripted;
mod sim;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use scripted::*;
pub use sim::*;

use crate::loc::Pose;
use crate::scene::SceneConfig;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Provider of robot poses computed from visible landmarks.
pub trait PoseSource {

    /// Called once when the navigator is activated. The source shall apply
    /// the scene's landmark placements and camera offset to the poses it
    /// reports.
    fn activate(&mut self, _scene: &SceneConfig) {}

    /// Called at the start of every navigator update, before any landmark is
    /// queried.
    fn begin_cycle(&mut self) {}

    /// The landmark ids in the order they shall be scanned.
    fn landmarks(&self) -> Vec<String>;

    /// Whether the landmark is currently in view.
    fn is_visible(&self, landmark: &str) -> bool;

    /// Robot pose in the field frame as measured through the landmark.
    ///
    /// Returns `None` if there is no new data since the last call for this
    /// landmark, which is different from the landmark not being visible.
    fn updated_robot_pose(&mut self, landmark: &str) -> Option<Pose>;
}
