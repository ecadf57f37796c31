//! Navigation executable entry point.
//! 
//! # Architecture
//! 
//! The executable drives a simulated robot to the centre of the field using
//! only the visual navigator:
//! 
//!     - Initialise session, logging and parameters
//!     - Activate the navigator with the scene
//!     - Main loop:
//!         - Navigator update through the simulated pose source
//!         - Telemetry and archiving of the result
//!         - Arrival check
//!         - Drive demand calculation and simulated robot motion
//! 

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::WrapErr};
use log::{info, warn};
use nalgebra::Vector3;

// Internal
use nav_lib::{
    guidance::DriveDemand,
    loc::Pose,
    nav::{Axis, NavError, NavParams, VisNav},
    pose_source::SimPoseSource,
    telemetry::{publish_nav_telemetry, LogSink}
};
use params::NavExecParams;
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new(
        "nav_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Visual Navigation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let nav_params: NavParams = util::params::load("nav.toml")
        .wrap_err("Could not load nav params")?;
    let exec_params: NavExecParams = util::params::load("nav_exec.toml")
        .wrap_err("Could not load exec params")?;

    info!("Parameters loaded");

    // ---- INITIALISE MODULES ----

    let gains = nav_params.gains;
    let mut nav = VisNav::new(SimPoseSource::new(exec_params.camera));
    nav.init(nav_params, &session)
        .wrap_err("Failed to initialise the navigator")?;

    let mut arch_result = Archiver::from_path(&session, "nav_result.csv")
        .wrap_err("Failed to create the navigation archive")?;
    let mut sink = LogSink::default();

    let mut robot_pose = Pose::on_field(
        exec_params.start_position_mm[0],
        exec_params.start_position_mm[1],
        0.0,
        exec_params.start_heading_deg
    );
    nav.source_mut().set_robot_pose(robot_pose);

    info!("Initialisation complete, starting from {:?}\n", robot_pose.position_mm_fd);

    // ---- MAIN LOOP ----

    let mut arrived = false;

    for cycle in 0..exec_params.max_cycles {

        let (result, report) = match nav.proc(&()) {
            Ok(r) => r,
            Err(NavError::InvalidPose(l)) => {
                warn!("Cycle {}: invalid pose through {}, holding", cycle, l);
                continue;
            },
            Err(e) => return Err(e).wrap_err("Navigation failed")
        };

        publish_nav_telemetry(&mut sink, report.visible_landmark.as_deref(), &result);

        arch_result.serialise(&result)
            .wrap_err("Failed to archive the navigation result")?;

        if result.visible 
            && nav.is_near(Axis::X, 0.0)? 
            && nav.is_near(Axis::Y, 0.0)? 
        {
            info!("Arrived at the field origin after {} cycles", cycle);
            arrived = true;
            break;
        }

        let demand = DriveDemand::from_result(&result, &gains);
        robot_pose = step_robot(&robot_pose, &demand, &exec_params);
        nav.source_mut().set_robot_pose(robot_pose);
    }

    if !arrived {
        warn!("Did not arrive within {} cycles", exec_params.max_cycles);
    }

    info!(
        "Final navigation data: {}", 
        serde_json::to_string(&nav.snapshot()?)?
    );

    Ok(())
}

/// Move the simulated robot under the given demand for one cycle.
fn step_robot(pose: &Pose, demand: &DriveDemand, params: &NavExecParams) -> Pose {
    let dt = params.cycle_period_s;

    let heading_deg = pose.get_heading_deg() 
        + demand.yaw * params.max_yaw_rate_deg_s * dt;
    let position_mm_fd = pose.position_mm_fd 
        + Vector3::new(demand.axial, demand.lateral, 0.0) * params.max_speed_mm_s * dt;

    Pose::on_field(
        position_mm_fd.x, 
        position_mm_fd.y, 
        position_mm_fd.z, 
        heading_deg
    )
}
