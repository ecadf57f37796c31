//! # Navigation telemetry
//!
//! Formats navigation results into caption/value lines for display. The sink
//! decides where the lines go.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;

use crate::guidance::{Guidance, StrafeDirection, TurnDirection};
use crate::nav::PoseResult;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Shown in place of the landmark name when nothing is visible.
pub const NOT_VISIBLE_PLACEHOLDER: &str = "- - - -";

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A display which accepts caption/value pairs and shows them on `update`.
pub trait TelemetrySink {
    fn add_data(&mut self, caption: &str, value: String);

    /// Show everything added since the last update.
    fn update(&mut self);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Sink which writes each frame of telemetry to the log.
#[derive(Debug, Default)]
pub struct LogSink {
    lines: Vec<(String, String)>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TelemetrySink for LogSink {
    fn add_data(&mut self, caption: &str, value: String) {
        self.lines.push((caption.to_string(), value));
    }

    fn update(&mut self) {
        for (caption, value) in self.lines.drain(..) {
            info!("{}: {}", caption, value);
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Add the navigation lines for `result` to the sink and update it.
pub fn publish_nav_telemetry<T: TelemetrySink + ?Sized>(
    sink: &mut T,
    visible_landmark: Option<&str>,
    result: &PoseResult
) {
    if result.visible {
        let guidance = Guidance::from_result(result);

        sink.add_data(
            "Visible",
            visible_landmark.unwrap_or(NOT_VISIBLE_PLACEHOLDER).to_string()
        );
        sink.add_data("Robot", format!(
            "[X]:[Y]:[Z] (B) [{:5.0}mm]:[{:5.0}mm]:[{:5.0}mm] ({:4.0}°)",
            result.robot_x_mm, result.robot_y_mm, result.robot_z_mm,
            result.robot_bearing_deg
        ));
        sink.add_data("Target", format!(
            "[R] (B):(RB) [{:5.0}mm] ({:4.0}°):({:4.0}°)",
            result.target_range_mm, result.target_bearing_deg,
            result.relative_bearing_deg
        ));
        sink.add_data("- Turn    ", format!(
            "{} {:4.0}°",
            match guidance.turn {
                TurnDirection::Cw => ">>> CW ",
                TurnDirection::Ccw => "<<< CCW"
            },
            guidance.turn_deg
        ));
        sink.add_data("- Strafe  ", format!(
            "{} {:5.0}mm",
            match guidance.strafe {
                StrafeDirection::Left => "LEFT",
                StrafeDirection::Right => "RIGHT"
            },
            guidance.strafe_mm
        ));
        sink.add_data("- Distance", format!("{:5.0}mm", guidance.distance_mm));
    }
    else {
        sink.add_data("Visible", NOT_VISIBLE_PLACEHOLDER.to_string());
    }

    sink.update();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;

    #[derive(Default)]
    struct RecordingSink {
        pending: Vec<(String, String)>,
        frames: Vec<Vec<(String, String)>>
    }

    impl TelemetrySink for RecordingSink {
        fn add_data(&mut self, caption: &str, value: String) {
            self.pending.push((caption.to_string(), value));
        }

        fn update(&mut self) {
            self.frames.push(std::mem::take(&mut self.pending));
        }
    }

    #[test]
    fn test_visible_telemetry() {
        let mut sink = RecordingSink::default();
        let r = PoseResult::from_pose(true, &Pose::on_field(500.0, 1000.0, 150.0, 10.0));

        publish_nav_telemetry(&mut sink, Some("Blue-Rover"), &r);

        assert_eq!(sink.frames.len(), 1);
        let frame = &sink.frames[0];
        assert_eq!(frame.len(), 6);
        assert_eq!(frame[0], (String::from("Visible"), String::from("Blue-Rover")));
        assert_eq!(
            frame[1].1,
            "[X]:[Y]:[Z] (B) [  500mm]:[ 1000mm]:[  150mm] (  10°)"
        );
        assert_eq!(frame[2].1, "[R] (B):(RB) [ 1118mm] ( -63°):( -73°)");
        assert_eq!(frame[3].1, ">>> CW    73°");
        assert_eq!(frame[4].1, "RIGHT  1000mm");
        assert_eq!(frame[5].1, "  500mm");
    }

    #[test]
    fn test_lost_telemetry() {
        let mut sink = RecordingSink::default();

        publish_nav_telemetry(&mut sink, None, &PoseResult::default());

        assert_eq!(
            sink.frames,
            vec![vec![(String::from("Visible"), String::from("- - - -"))]]
        );
    }
}
