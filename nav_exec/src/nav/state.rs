//! Implementations for the navigator state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::BTreeMap;
use log::{debug, info, trace, warn};
use nalgebra::Vector3;

// Internal
use super::*;
use crate::loc::{Orientation, Pose};
use crate::pose_source::PoseSource;
use crate::scene::SceneConfig;
use util::{module::State, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Visual landmark navigator.
///
/// Every read-style accessor refreshes the navigation data from the pose
/// source before returning it. [`VisNav::last_result`] is the only accessor
/// which reads the cache without refreshing.
pub struct VisNav<S: PoseSource> {
    source: S,

    scene: Option<SceneConfig>,

    mode: Mode,

    /// Tolerance for `is_near`
    close_enough_mm: f64,

    /// The last pose reported by the source, kept while no landmark is
    /// visible
    last_location: Option<Pose>,

    /// Guidance quantities from the last update
    result: PoseResult,

    /// Name of the landmark used on the last update
    visible_landmark: Option<String>,

    /// True if the source reported a pose on the last update
    new_pose: bool
}

/// Status report from one navigator cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub mode: Mode,

    /// Name of the landmark the pose was taken through
    pub visible_landmark: Option<String>,

    /// True if the pose source reported new pose data this cycle
    pub new_pose: bool
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Modes of the navigator. `TargetVisible` and `TargetLost` are both
/// sub-states of being ready, the navigator toggles between them on every
/// update.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Uninitialised,
    Ready,
    TargetVisible,
    TargetLost
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: PoseSource> State for VisNav<S> {
    type InitData = NavParams;
    type InitError = NavError;

    type InputData = ();
    type OutputData = PoseResult;
    type StatusReport = StatusReport;
    type ProcError = NavError;

    /// Activate the navigator from its parameters.
    fn init(
        &mut self,
        init_data: Self::InitData,
        _session: &Session
    ) -> Result<(), Self::InitError> {
        self.activate_from_params(&init_data)
    }

    /// Run one navigation update.
    fn proc(
        &mut self,
        _input_data: &Self::InputData
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let result = self.update()?;

        Ok((result, StatusReport {
            mode: self.mode,
            visible_landmark: self.visible_landmark.clone(),
            new_pose: self.new_pose
        }))
    }
}

impl<S: PoseSource> VisNav<S> {

    /// Create a new navigator reading poses from `source`. The navigator must
    /// be activated before use.
    pub fn new(source: S) -> Self {
        Self {
            source,
            scene: None,
            mode: Mode::Uninitialised,
            close_enough_mm: CLOSE_ENOUGH_MM,
            last_location: None,
            result: PoseResult::default(),
            visible_landmark: None,
            new_pose: false
        }
    }

    /// Activate the navigator with the given scene.
    ///
    /// Activation can only happen once. The scene is passed on to the pose
    /// source.
    pub fn activate(&mut self, scene: SceneConfig) -> Result<(), NavError> {
        if self.mode != Mode::Uninitialised {
            return Err(NavError::AlreadyActive);
        }

        self.source.activate(&scene);
        self.scene = Some(scene);
        self.mode = Mode::Ready;

        info!("Navigation activated");

        Ok(())
    }

    /// Build the scene from parameters and activate the navigator with it.
    pub fn activate_from_params(&mut self, params: &NavParams) -> Result<(), NavError> {
        let scene = SceneConfig::from_params(&params.scene)?;

        self.close_enough_mm = params.close_enough_mm;

        self.activate(scene)
    }

    /// Refresh the navigation data from the pose source.
    ///
    /// Landmarks are scanned in order and the first visible one is used. If
    /// none are visible the previous pose is kept and the result is marked as
    /// not visible.
    ///
    /// If the source reports a non-finite pose the reading is discarded, the
    /// cached data is left untouched and `NavError::InvalidPose` is returned.
    pub fn update(&mut self) -> Result<PoseResult, NavError> {
        if self.scene.is_none() {
            return Err(NavError::NotInitialised);
        }

        self.source.begin_cycle();

        // Only the first visible landmark is used
        let mut visible_landmark = None;
        for landmark in self.source.landmarks() {
            if self.source.is_visible(&landmark) {
                visible_landmark = Some(landmark);
                break;
            }
        }

        // Take any new pose data from the visible landmark. No new data means
        // the previous pose is reused, but the target is still visible.
        let mut location = self.last_location;
        let mut new_pose = false;
        if let Some(ref landmark) = visible_landmark {
            if let Some(pose) = self.source.updated_robot_pose(landmark) {
                if !pose.is_finite() {
                    warn!("Discarding non-finite pose from \"{}\": {:?}", landmark, pose);
                    return Err(NavError::InvalidPose(landmark.clone()));
                }
                location = Some(pose);
                new_pose = true;
            }
        }

        let visible = visible_landmark.is_some();

        let result = match location {
            Some(ref pose) => PoseResult::from_pose(visible, pose),
            None => {
                if visible {
                    debug!("Landmark visible but no pose has been reported yet");
                }
                PoseResult { visible, ..self.result }
            }
        };

        let mode = match visible {
            true => Mode::TargetVisible,
            false => Mode::TargetLost
        };

        if mode != self.mode || visible_landmark != self.visible_landmark {
            match visible_landmark {
                Some(ref l) => info!("Target acquired: {}", l),
                None => info!("Target lost")
            }
        }

        // Publish everything together
        self.last_location = location;
        self.result = result;
        self.visible_landmark = visible_landmark;
        self.mode = mode;
        self.new_pose = new_pose;

        trace!("Navigation: {:?}", self.result);

        Ok(self.result)
    }

    /// Refresh before a read. An invalid pose is only advisory here, the
    /// read goes ahead on the cached data.
    fn refresh(&mut self) -> Result<&PoseResult, NavError> {
        match self.update() {
            Ok(_) | Err(NavError::InvalidPose(_)) => Ok(&self.result),
            Err(e) => Err(e)
        }
    }

    /// Refresh and return whether any landmark is visible.
    pub fn targets_visible(&mut self) -> Result<bool, NavError> {
        Ok(self.refresh()?.visible)
    }

    /// Refresh and check if the robot is within the configured tolerance of
    /// `target_mm` along `axis`.
    pub fn is_near(&mut self, axis: Axis, target_mm: f64) -> Result<bool, NavError> {
        let tolerance_mm = self.close_enough_mm;
        self.is_near_within(axis, target_mm, tolerance_mm)
    }

    /// Refresh and check if the robot is strictly within `tolerance_mm` of
    /// `target_mm` along `axis`.
    pub fn is_near_within(
        &mut self,
        axis: Axis,
        target_mm: f64,
        tolerance_mm: f64
    ) -> Result<bool, NavError> {
        Ok(self.refresh()?.is_near(axis, target_mm, tolerance_mm))
    }

    /// Refresh and return the robot position in the field frame.
    ///
    /// Units: millimeters
    pub fn current_translation(&mut self) -> Result<Vector3<f64>, NavError> {
        let r = self.refresh()?;
        Ok(Vector3::new(r.robot_x_mm, r.robot_y_mm, r.robot_z_mm))
    }

    /// Refresh and return the robot orientation as extrinsic XYZ angles.
    pub fn current_orientation(&mut self) -> Result<Orientation, NavError> {
        self.refresh()?;
        Ok(self.last_location
            .map(|p| p.get_orientation())
            .unwrap_or_default())
    }

    /// Refresh and return the named guidance quantities.
    pub fn snapshot(&mut self) -> Result<BTreeMap<&'static str, f64>, NavError> {
        Ok(self.refresh()?.to_named())
    }

    /// The result of the last update, without refreshing.
    pub fn last_result(&self) -> &PoseResult {
        &self.result
    }

    /// The landmark used on the last update.
    pub fn visible_landmark(&self) -> Option<&str> {
        self.visible_landmark.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scene(&self) -> Option<&SceneConfig> {
        self.scene.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pose_source::{Reading, ScriptedPoseSource};
    use crate::scene::{CameraOffset, SceneParams};

    const LANDMARKS: [&str; 4] = ["Blue-Rover", "Red-Footprint", "Front-Craters", "Back-Space"];

    fn nav_with(readings: Vec<Reading>) -> VisNav<ScriptedPoseSource> {
        let mut source = ScriptedPoseSource::new(LANDMARKS.iter().copied());
        for r in readings {
            source.push(r);
        }

        let mut nav = VisNav::new(source);
        nav.activate(SceneConfig::rover_ruckus(CameraOffset::default()).unwrap())
            .unwrap();
        nav
    }

    fn params() -> NavParams {
        NavParams {
            close_enough_mm: CLOSE_ENOUGH_MM,
            scene: SceneParams::rover_ruckus(CameraOffset::default()),
            gains: Default::default()
        }
    }

    #[test]
    fn test_not_initialised() {
        let mut nav = VisNav::new(ScriptedPoseSource::new(LANDMARKS.iter().copied()));

        assert_eq!(nav.mode(), Mode::Uninitialised);
        assert_eq!(nav.update(), Err(NavError::NotInitialised));
        assert_eq!(nav.current_translation(), Err(NavError::NotInitialised));
        assert_eq!(nav.is_near(Axis::X, 0.0), Err(NavError::NotInitialised));
        assert_eq!(nav.snapshot(), Err(NavError::NotInitialised));
    }

    #[test]
    fn test_activate_once() {
        let mut nav = VisNav::new(ScriptedPoseSource::new(LANDMARKS.iter().copied()));

        assert!(nav.scene().is_none());

        nav.activate_from_params(&params()).unwrap();
        assert_eq!(nav.mode(), Mode::Ready);
        assert_eq!(nav.activate_from_params(&params()), Err(NavError::AlreadyActive));

        let scene = nav.scene().unwrap();
        assert_eq!(scene.landmarks().len(), 4);
        assert_eq!(*scene.camera_offset(), CameraOffset::default());
    }

    #[test]
    fn test_activate_with_non_finite_camera() {
        let mut params = params();
        params.scene.camera.forward_mm = std::f64::NAN;

        let mut nav = VisNav::new(ScriptedPoseSource::new(LANDMARKS.iter().copied()));
        assert_eq!(
            nav.activate_from_params(&params),
            Err(NavError::Configuration(SceneError::NonFinite(String::from("camera"))))
        );
        assert_eq!(nav.mode(), Mode::Uninitialised);
        assert!(nav.scene().is_none());
    }

    #[test]
    fn test_activate_with_three_landmarks() {
        let mut params = params();
        params.scene.landmarks.truncate(3);

        let mut nav = VisNav::new(ScriptedPoseSource::new(LANDMARKS.iter().copied()));
        assert_eq!(
            nav.activate_from_params(&params),
            Err(NavError::Configuration(SceneError::WrongLandmarkCount {
                expected: 4,
                found: 3
            }))
        );
        assert_eq!(nav.mode(), Mode::Uninitialised);
    }

    #[test]
    fn test_visible_update() {
        let mut nav = nav_with(vec![
            Reading::seen("Front-Craters", Pose::on_field(500.0, 1000.0, 150.0, 10.0))
        ]);

        let r = nav.update().unwrap();

        assert!(r.visible);
        assert_eq!(nav.mode(), Mode::TargetVisible);
        assert_eq!(nav.visible_landmark(), Some("Front-Craters"));
        assert!((r.robot_bearing_deg - 10.0).abs() < 1e-9);
        assert!((r.target_range_mm - 1118.033988749895).abs() < 1e-6);
        assert!((r.target_bearing_deg - -63.43494882292201).abs() < 1e-6);
        assert!((r.relative_bearing_deg - -73.43494882292201).abs() < 1e-6);
    }

    #[test]
    fn test_first_visible_landmark_wins() {
        let mut both = Reading::seen("Back-Space", Pose::on_field(1.0, 2.0, 0.0, 0.0));
        both.visible.insert(0, String::from("Red-Footprint"));

        let mut nav = nav_with(vec![both]);
        nav.update().unwrap();

        // Red-Footprint is earlier in the scan order
        assert_eq!(nav.visible_landmark(), Some("Red-Footprint"));
        assert!((nav.last_result().robot_x_mm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_idempotent_without_new_data() {
        let mut nav = nav_with(vec![
            Reading::seen("Blue-Rover", Pose::on_field(-200.0, 700.0, 150.0, -35.0)),
            Reading::stale("Blue-Rover"),
        ]);

        let first = nav.update().unwrap();
        let second = nav.update().unwrap();
        let third = nav.update().unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert!(third.visible);
    }

    #[test]
    fn test_stale_retention_while_lost() {
        let mut nav = nav_with(vec![
            Reading::seen("Back-Space", Pose::on_field(500.0, 1000.0, 150.0, 10.0)),
            Reading::lost(),
            Reading::lost(),
            Reading::lost(),
        ]);

        let seen = nav.update().unwrap();
        assert!(seen.visible);

        for _ in 0..3 {
            let r = nav.update().unwrap();
            assert!(!r.visible);
            assert_eq!(nav.mode(), Mode::TargetLost);
            assert_eq!(nav.visible_landmark(), None);
            assert_eq!(r.robot_x_mm, 500.0);
            assert_eq!(r.target_range_mm, seen.target_range_mm);
        }

        // Script exhausted, still lost, still the pose seen before the loss
        let t = nav.current_translation().unwrap();
        assert_eq!(t, Vector3::new(500.0, 1000.0, 150.0));
        assert!(!nav.last_result().visible);
    }

    #[test]
    fn test_visible_but_stale_keeps_old_pose() {
        let mut nav = nav_with(vec![
            Reading::seen("Back-Space", Pose::on_field(100.0, 0.0, 0.0, 0.0)),
            Reading::lost(),
            Reading::stale("Front-Craters"),
        ]);

        nav.update().unwrap();
        assert!(!nav.update().unwrap().visible);

        let r = nav.update().unwrap();
        assert!(r.visible);
        assert_eq!(nav.visible_landmark(), Some("Front-Craters"));
        assert_eq!(r.robot_x_mm, 100.0);
    }

    #[test]
    fn test_visible_before_any_pose() {
        let mut nav = nav_with(vec![Reading::stale("Blue-Rover")]);

        let r = nav.update().unwrap();
        assert!(r.visible);
        assert_eq!(r, PoseResult { visible: true, ..Default::default() });
    }

    #[test]
    fn test_invalid_pose_discarded() {
        let mut bad = Pose::on_field(0.0, 0.0, 0.0, 0.0);
        bad.position_mm_fd.x = std::f64::INFINITY;

        let mut nav = nav_with(vec![
            Reading::seen("Blue-Rover", Pose::on_field(300.0, -400.0, 0.0, 90.0)),
            Reading::seen("Back-Space", bad),
        ]);

        let good = nav.update().unwrap();

        assert_eq!(
            nav.update(),
            Err(NavError::InvalidPose(String::from("Back-Space")))
        );
        assert_eq!(*nav.last_result(), good);
        assert_eq!(nav.visible_landmark(), Some("Blue-Rover"));
        assert_eq!(nav.mode(), Mode::TargetVisible);
    }

    #[test]
    fn test_is_near() {
        let mut nav = nav_with(vec![
            Reading::seen("Blue-Rover", Pose::on_field(510.0, 0.0, 0.0, 0.0)),
            Reading::seen("Blue-Rover", Pose::on_field(525.0, 0.0, 0.0, 0.0)),
        ]);

        assert_eq!(nav.is_near(Axis::X, 500.0), Ok(true));
        assert_eq!(nav.is_near_within(Axis::X, 500.0, 20.0), Ok(false));
        // Refreshes on every call
        assert_eq!(nav.last_result().robot_x_mm, 525.0);
        assert_eq!(nav.is_near_within(Axis::X, 500.0, 30.0), Ok(true));
    }

    #[test]
    fn test_accessors_refresh() {
        let mut nav = nav_with(vec![
            Reading::seen("Blue-Rover", Pose::on_field(1.0, 2.0, 3.0, 0.0)),
            Reading::seen("Blue-Rover", Pose::on_field(4.0, 5.0, 6.0, 45.0)),
            Reading::seen("Blue-Rover", Pose::on_field(7.0, 8.0, 9.0, 0.0)),
        ]);

        assert_eq!(nav.current_translation(), Ok(Vector3::new(1.0, 2.0, 3.0)));

        let o = nav.current_orientation().unwrap();
        assert!((o.yaw_deg - 45.0).abs() < 1e-9);
        assert!(o.roll_deg.abs() < 1e-9);

        let snapshot = nav.snapshot().unwrap();
        assert_eq!(snapshot["robotX"], 7.0);
        assert_eq!(snapshot["robotZ"], 9.0);
    }

    #[test]
    fn test_proc_report() {
        let mut nav = nav_with(vec![
            Reading::seen("Red-Footprint", Pose::on_field(0.0, -900.0, 0.0, 90.0)),
            Reading::stale("Red-Footprint"),
        ]);

        let (out, report) = nav.proc(&()).unwrap();
        assert!(out.visible);
        assert_eq!(report.mode, Mode::TargetVisible);
        assert_eq!(report.visible_landmark.as_deref(), Some("Red-Footprint"));
        assert!(report.new_pose);

        let (_, report) = nav.proc(&()).unwrap();
        assert!(!report.new_pose);
        assert_eq!(nav.source().remaining(), 0);
    }

    #[test]
    fn test_new_pose_for_repeated_reading() {
        let pose = Pose::on_field(-250.0, 400.0, 0.0, 30.0);
        let mut nav = nav_with(vec![
            Reading::seen("Blue-Rover", pose),
            Reading::seen("Blue-Rover", pose),
            Reading::stale("Blue-Rover"),
        ]);

        // The same pose reported twice is still new data both times
        let (first, report) = nav.proc(&()).unwrap();
        assert!(report.new_pose);

        let (second, report) = nav.proc(&()).unwrap();
        assert!(report.new_pose);
        assert_eq!(first, second);

        let (_, report) = nav.proc(&()).unwrap();
        assert!(!report.new_pose);
    }

    #[test]
    fn test_with_sim_source() {
        use crate::pose_source::{SimParams, SimPoseSource};

        let mut nav = VisNav::new(SimPoseSource::new(SimParams::default()));
        nav.activate(SceneConfig::rover_ruckus(CameraOffset::default()).unwrap())
            .unwrap();

        // Nothing to see until the robot is placed
        assert!(!nav.update().unwrap().visible);

        // Facing the origin, the back camera sees the front wall
        nav.source_mut().set_robot_pose(Pose::on_field(-1000.0, 300.0, 0.0, -16.7));
        let r = nav.update().unwrap();
        assert!(r.visible);
        assert_eq!(nav.visible_landmark(), Some("Front-Craters"));
        assert!((r.target_range_mm - 1044.030650891055).abs() < 1e-6);
        assert!((r.robot_bearing_deg - -16.7).abs() < 1e-6);

        // Turned around, the back camera sees the back wall
        nav.source_mut().set_robot_pose(Pose::on_field(-1000.0, 300.0, 0.0, 163.3));
        let r = nav.update().unwrap();
        assert_eq!(nav.visible_landmark(), Some("Back-Space"));
        assert!((r.robot_bearing_deg - 163.3).abs() < 1e-6);
        assert!((r.relative_bearing_deg - (r.target_bearing_deg - 163.3)).abs() < 1e-6);
    }
}
