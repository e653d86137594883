//! Free-flight ballistic missile model.
//!
//! The arc is symmetric: constant horizontal velocity carries the missile
//! along the great circle toward the aimpoint while gravity decelerates an
//! initial vertical velocity sized to reach apogee at the midpoint of flight
//! and the ground again at the aimpoint.

use chrono::{DateTime, Utc};
use intercept_core::constants::PhysicalConstants;
use intercept_geo as geo;
use intercept_geo::GeoPoint;

use super::{
    FlightStaticData, Missile, Orientation, Phase, Position, Trajectory, TrajectoryError,
    check_escape_velocity, combined_velocity_km_s, launch_angle_deg, orientation_at, position_at,
    sample_flight, validate_coordinate, validate_horizontal_velocity, validate_timestep,
};

/// User-supplied launch parameters for a ballistic flight.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchParameters {
    pub launchpoint: GeoPoint,
    pub aimpoint: GeoPoint,
    pub horizontal_velocity_km_s: f64,
    /// Launch epoch; exported timestamps are offsets from this instant.
    pub launch_time: DateTime<Utc>,
    /// Sampling interval for `launch` (seconds).
    pub timestep_sec: f64,
}

/// Missile flying a free ballistic arc from launchpoint to aimpoint.
#[derive(Debug, Clone)]
pub struct BallisticMissile {
    params: LaunchParameters,
    constants: PhysicalConstants,
    phase: Phase,
    static_data: Option<FlightStaticData>,
    trajectory: Option<Trajectory>,
}

impl BallisticMissile {
    pub fn new(params: LaunchParameters, constants: PhysicalConstants) -> Self {
        Self {
            params,
            constants,
            phase: Phase::Unbuilt,
            static_data: None,
            trajectory: None,
        }
    }

    pub fn params(&self) -> &LaunchParameters {
        &self.params
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Sample the flight up to `stoptime_sec` instead of the full duration.
    pub fn launch_until(&mut self, stoptime_sec: f64) -> Result<(), TrajectoryError> {
        match self.phase {
            Phase::Unbuilt => return Err(TrajectoryError::NotBuilt("launch")),
            Phase::Launched => return Err(TrajectoryError::AlreadyLaunched),
            Phase::Built => {}
        }
        let trajectory = sample_flight(self, stoptime_sec, self.params.timestep_sec)?;
        self.trajectory = Some(trajectory);
        self.phase = Phase::Launched;
        Ok(())
    }

    /// Vertical velocity at launch for a symmetric arc landing at altitude 0:
    /// gravity times the time to apogee, which is half the flight.
    fn initial_vertical_velocity_km_s(&self, time_to_target_sec: f64) -> f64 {
        0.5 * time_to_target_sec * self.constants.gravity_accel_km_s2.abs()
    }
}

impl Missile for BallisticMissile {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn launchpoint(&self) -> GeoPoint {
        self.params.launchpoint
    }

    fn aimpoint(&self) -> Option<GeoPoint> {
        Some(self.params.aimpoint)
    }

    fn static_data(&self) -> Result<&FlightStaticData, TrajectoryError> {
        self.static_data
            .as_ref()
            .ok_or(TrajectoryError::NotBuilt("static_data"))
    }

    fn trajectory(&self) -> Result<&Trajectory, TrajectoryError> {
        self.trajectory
            .as_ref()
            .ok_or(TrajectoryError::NotLaunched("trajectory"))
    }

    fn build(&mut self) -> Result<(), TrajectoryError> {
        if self.phase != Phase::Unbuilt {
            return Err(TrajectoryError::AlreadyBuilt);
        }
        validate_coordinate("launchpoint", self.params.launchpoint)?;
        validate_coordinate("aimpoint", self.params.aimpoint)?;
        validate_horizontal_velocity(self.params.horizontal_velocity_km_s)?;
        validate_timestep(self.params.timestep_sec)?;

        let dist_to_target_km =
            geo::great_circle_distance_km(self.params.launchpoint, self.params.aimpoint);
        let launch_bearing_deg =
            geo::initial_bearing_deg(self.params.launchpoint, self.params.aimpoint);
        let time_to_target_sec = dist_to_target_km / self.params.horizontal_velocity_km_s;
        let initial_vertical_velocity_km_s =
            self.initial_vertical_velocity_km_s(time_to_target_sec);
        let initial_launch_velocity_km_s = combined_velocity_km_s(
            self.params.horizontal_velocity_km_s,
            initial_vertical_velocity_km_s,
        );
        check_escape_velocity(initial_launch_velocity_km_s, &self.constants)?;
        let initial_launch_angle_deg = launch_angle_deg(
            self.params.horizontal_velocity_km_s,
            initial_vertical_velocity_km_s,
        );

        self.static_data = Some(FlightStaticData {
            dist_to_target_km,
            launch_bearing_deg,
            time_to_target_sec,
            horizontal_velocity_km_s: self.params.horizontal_velocity_km_s,
            initial_vertical_velocity_km_s,
            initial_launch_velocity_km_s,
            initial_launch_angle_deg,
        });
        self.phase = Phase::Built;
        Ok(())
    }

    fn launch(&mut self) -> Result<(), TrajectoryError> {
        if self.phase == Phase::Unbuilt {
            return Err(TrajectoryError::NotBuilt("launch"));
        }
        let stoptime_sec = self.static_data()?.time_to_target_sec;
        self.launch_until(stoptime_sec)
    }

    fn current_position(&self, elapsed_time_sec: f64) -> Result<Position, TrajectoryError> {
        let data = self
            .static_data
            .as_ref()
            .ok_or(TrajectoryError::NotBuilt("current_position"))?;
        Ok(position_at(
            self.params.launchpoint,
            data,
            self.constants.gravity_accel_km_s2,
            elapsed_time_sec,
        ))
    }

    fn current_orientation(&self, elapsed_time_sec: f64) -> Result<Orientation, TrajectoryError> {
        let data = self
            .static_data
            .as_ref()
            .ok_or(TrajectoryError::NotBuilt("current_orientation"))?;
        let position = position_at(
            self.params.launchpoint,
            data,
            self.constants.gravity_accel_km_s2,
            elapsed_time_sec,
        );
        Ok(orientation_at(
            position,
            self.params.aimpoint,
            data,
            self.constants.gravity_accel_km_s2,
            elapsed_time_sec,
        ))
    }
}
