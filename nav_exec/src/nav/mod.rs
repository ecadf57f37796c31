//! # Navigation module
//!
//! Turns the robot pose reported through the first visible landmark into the
//! guidance quantities used by the control loop: position, heading, range and
//! bearing to the field origin, and the heading error to null out.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod result;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use result::*;
pub use state::*;

use crate::scene::SceneError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default tolerance used by the "arrived" predicates.
///
/// Units: millimeters
pub const CLOSE_ENOUGH_MM: f64 = 20.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during navigation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    #[error("The navigator has not been activated")]
    NotInitialised,

    #[error("The navigator has already been activated")]
    AlreadyActive,

    #[error("Invalid scene configuration: {0}")]
    Configuration(#[from] SceneError),

    #[error("Landmark \"{0}\" reported a non-finite robot pose, reading discarded")]
    InvalidPose(String)
}

/// A field axis along which the robot position can be tested.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z
}
