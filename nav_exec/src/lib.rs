//! # Navigation library.
//!
//! This library allows other crates in the workspace to access items defined inside the
//! navigation crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Guidance - steering directions and drive demands derived from navigation results
pub mod guidance;

/// Localisation types - robot pose in the field frame
pub mod loc;

/// Navigator - computes position, heading, range and bearings from the visible landmark
pub mod nav;

/// Pose sources - the localisation engines the navigator reads poses from
pub mod pose_source;

/// Scene model - landmark placements and camera mounting
pub mod scene;

/// Telemetry - formats navigation results for display
pub mod telemetry;
