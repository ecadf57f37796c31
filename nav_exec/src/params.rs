//! # Navigation Executable Parameters
//!
//! This module provide parameters for the simulated run of the navigation executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use nav_lib::pose_source::SimParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NavExecParams {

    /// Simulated camera
    pub camera: SimParams,

    /// Starting position of the robot on the field.
    ///
    /// Units: millimeters
    pub start_position_mm: [f64; 2],

    /// Starting heading of the robot.
    ///
    /// Units: degrees
    pub start_heading_deg: f64,

    /// Robot speed at a demand of 1.
    ///
    /// Units: millimeters/second
    pub max_speed_mm_s: f64,

    /// Robot turn rate at a yaw demand of 1.
    ///
    /// Units: degrees/second
    pub max_yaw_rate_deg_s: f64,

    /// Simulated time between cycles.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Stop after this many cycles if the robot hasn't arrived
    pub max_cycles: u64
}
