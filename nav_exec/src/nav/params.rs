//! Parameters structure for the navigator

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::guidance::DriveGains;
use crate::scene::SceneParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the navigator, loaded from `nav.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct NavParams {
    /// Tolerance used by `is_near` when none is given.
    ///
    /// Units: millimeters
    #[serde(default = "default_close_enough_mm")]
    pub close_enough_mm: f64,

    /// Landmark placements and camera mounting
    pub scene: SceneParams,

    /// Gains used to turn guidance errors into drive demands
    #[serde(default)]
    pub gains: DriveGains
}

fn default_close_enough_mm() -> f64 {
    super::CLOSE_ENOUGH_MM
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scene::{CameraOffset, SceneConfig};

    #[test]
    fn test_param_file_matches_field() {
        let params: NavParams = util::params::from_str(
            include_str!("../../../params/nav.toml")
        ).unwrap();

        assert_eq!(params.close_enough_mm, 20.0);
        assert_eq!(params.gains, DriveGains::default());

        let expected = SceneParams::rover_ruckus(CameraOffset::default());
        assert_eq!(params.scene.camera, expected.camera);
        assert_eq!(params.scene.landmarks.len(), expected.landmarks.len());
        for (loaded, built) in params.scene.landmarks.iter().zip(expected.landmarks.iter()) {
            assert_eq!(loaded.id, built.id);
            for i in 0..3 {
                assert!((loaded.placement.translation_mm[i] - built.placement.translation_mm[i]).abs() < 1e-9);
                assert_eq!(loaded.placement.rotation_deg[i], built.placement.rotation_deg[i]);
            }
        }

        assert!(SceneConfig::from_params(&params.scene).is_ok());
    }

    #[test]
    fn test_defaults() {
        let params: NavParams = util::params::from_str(r#"
            [scene.camera]
            forward_mm = 0.0
            left_mm = 0.0
            vertical_mm = 0.0
            facing = "Front"

            [[scene.landmarks]]
            id = "Only"
            placement = { translation_mm = [0.0, 0.0, 0.0], rotation_deg = [0.0, 0.0, 0.0] }
        "#).unwrap();

        assert_eq!(params.close_enough_mm, 20.0);
        assert_eq!(params.gains, DriveGains::default());
        assert_eq!(params.scene.landmarks.len(), 1);
    }
}
