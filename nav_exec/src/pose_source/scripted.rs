//! Scripted pose source, replays a fixed sequence of readings

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::VecDeque;

use super::PoseSource;
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// What the source sees during one cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    /// Ids of the landmarks in view
    pub visible: Vec<String>,

    /// New pose reported through whichever landmark is queried first, `None`
    /// for no new data
    pub pose: Option<Pose>
}

/// A pose source which replays one [`Reading`] per cycle.
///
/// Once the script is exhausted the last visibility is held with no new pose
/// data.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPoseSource {
    landmarks: Vec<String>,

    script: VecDeque<Reading>,

    current: Reading
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Reading {
    /// A cycle in which `landmark` is visible and reports `pose`.
    pub fn seen(landmark: &str, pose: Pose) -> Self {
        Self {
            visible: vec![landmark.to_string()],
            pose: Some(pose)
        }
    }

    /// A cycle in which `landmark` is visible but there is no new pose data.
    pub fn stale(landmark: &str) -> Self {
        Self {
            visible: vec![landmark.to_string()],
            pose: None
        }
    }

    /// A cycle in which nothing is visible.
    pub fn lost() -> Self {
        Self::default()
    }
}

impl ScriptedPoseSource {
    pub fn new<I, S>(landmarks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            landmarks: landmarks.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Queue a reading for a future cycle.
    pub fn push(&mut self, reading: Reading) {
        self.script.push_back(reading);
    }

    /// Number of readings still to be replayed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PoseSource for ScriptedPoseSource {
    fn begin_cycle(&mut self) {
        match self.script.pop_front() {
            Some(r) => self.current = r,
            None => self.current.pose = None
        }
    }

    fn landmarks(&self) -> Vec<String> {
        self.landmarks.clone()
    }

    fn is_visible(&self, landmark: &str) -> bool {
        self.current.visible.iter().any(|l| l == landmark)
    }

    fn updated_robot_pose(&mut self, landmark: &str) -> Option<Pose> {
        if self.is_visible(landmark) {
            self.current.pose.take()
        }
        else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_replay() {
        let mut src = ScriptedPoseSource::new(vec!["A", "B"]);
        let pose = Pose::on_field(1.0, 2.0, 3.0, 0.0);
        src.push(Reading::seen("B", pose));
        src.push(Reading::lost());

        src.begin_cycle();
        assert!(!src.is_visible("A"));
        assert!(src.is_visible("B"));
        assert_eq!(src.updated_robot_pose("A"), None);
        assert_eq!(src.updated_robot_pose("B"), Some(pose));
        // Pose data is only reported once
        assert_eq!(src.updated_robot_pose("B"), None);

        src.begin_cycle();
        assert!(!src.is_visible("B"));

        // Exhausted, holds the last visibility
        src.begin_cycle();
        assert!(!src.is_visible("B"));
        assert_eq!(src.remaining(), 0);
    }
}
