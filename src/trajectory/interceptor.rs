//! Terminal-phase interceptor solved against a built ballistic flight.
//!
//! The solver picks the point on the targeted missile's ground track a chosen
//! distance short of its aimpoint, reads the target's position there, and
//! derives the launch geometry and epoch that put the interceptor at that
//! point at the same instant. Unlike the ballistic arc, the vertical velocity
//! comes from inverting the altitude formula so the arc ends exactly at the
//! target's altitude rather than at the ground.

use chrono::{DateTime, Utc};
use intercept_core::constants::PhysicalConstants;
use intercept_core::units;
use intercept_geo as geo;
use intercept_geo::GeoPoint;
use serde::Serialize;
use thiserror::Error;

use super::ballistic::BallisticMissile;
use super::{
    FlightStaticData, Missile, Orientation, Phase, Position, Trajectory, TrajectoryError,
    check_escape_velocity, combined_velocity_km_s, epoch_plus_seconds, launch_angle_deg,
    orientation_at, position_at, sample_flight, validate_coordinate,
    validate_horizontal_velocity, validate_timestep,
};

/// User-supplied parameters for a terminal-phase intercept solve.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptorParameters {
    pub launchpoint: GeoPoint,
    pub horizontal_velocity_km_s: f64,
    /// Ground distance short of the target's aimpoint at which to intercept
    /// (km).
    pub intercept_ground_dist_from_aimpoint_km: f64,
    /// Sampling interval for `launch` (seconds).
    pub timestep_sec: f64,
}

/// Where and when the intercept happens, derived during `build`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterceptGeometry {
    /// Seconds after the *target's* launch at which both missiles arrive.
    pub time_after_target_launch_sec: f64,
    /// Intercept point, including the target's altitude there.
    pub position: Position,
    /// Straight-line distance from the interceptor launchpoint to the
    /// intercept point (km).
    pub slant_range_km: f64,
}

impl InterceptGeometry {
    /// Copy for the export boundary, with distances in metres.
    pub fn export_summary(&self) -> intercept_export::summary::InterceptSummary {
        intercept_export::summary::InterceptSummary {
            time_after_target_launch_sec: self.time_after_target_launch_sec,
            lat_deg: self.position.lat_deg,
            lon_deg: self.position.lon_deg,
            alt_m: units::km_to_m(self.position.alt_km),
            slant_range_m: units::km_to_m(self.slant_range_km),
        }
    }
}

/// Geometrically impossible intercept solves, distinct from lifecycle
/// precondition violations.
#[derive(Debug, Error)]
pub enum InterceptError {
    #[error("targeted missile must be built before the intercept solve")]
    TargetNotBuilt,
    #[error(
        "intercept distance {intercept_km:.3} km from the aimpoint is at or beyond the \
         target's {target_range_km:.3} km ground range"
    )]
    BeyondTargetRange {
        intercept_km: f64,
        target_range_km: f64,
    },
    #[error(
        "interceptor launchpoint sits on the intercept ground track; no flight time remains \
         to gain {alt_km:.3} km of altitude"
    )]
    ZeroTimeToIntercept { alt_km: f64 },
    #[error(
        "interceptor needs {required_sec:.1} s of flight but the target reaches the intercept \
         point {available_sec:.1} s after its own launch; it would have to launch before the \
         target"
    )]
    ArrivesTooLate {
        required_sec: f64,
        available_sec: f64,
    },
}

/// Interceptor timed to meet a targeted ballistic missile mid-flight.
#[derive(Debug, Clone)]
pub struct TerminalInterceptor<'t> {
    params: InterceptorParameters,
    target: &'t BallisticMissile,
    constants: PhysicalConstants,
    phase: Phase,
    intercept: Option<InterceptGeometry>,
    launch_time: Option<DateTime<Utc>>,
    static_data: Option<FlightStaticData>,
    trajectory: Option<Trajectory>,
}

impl<'t> TerminalInterceptor<'t> {
    pub fn new(
        params: InterceptorParameters,
        target: &'t BallisticMissile,
        constants: PhysicalConstants,
    ) -> Self {
        Self {
            params,
            target,
            constants,
            phase: Phase::Unbuilt,
            intercept: None,
            launch_time: None,
            static_data: None,
            trajectory: None,
        }
    }

    pub fn params(&self) -> &InterceptorParameters {
        &self.params
    }

    pub fn target(&self) -> &BallisticMissile {
        self.target
    }

    /// Intercept geometry; errors before `build` completes.
    pub fn intercept_geometry(&self) -> Result<&InterceptGeometry, TrajectoryError> {
        self.intercept
            .as_ref()
            .ok_or(TrajectoryError::NotBuilt("intercept_geometry"))
    }

    /// Launch epoch solved so that missile and interceptor arrive together;
    /// errors before `build` completes.
    pub fn launch_time(&self) -> Result<DateTime<Utc>, TrajectoryError> {
        self.launch_time
            .ok_or(TrajectoryError::NotBuilt("launch_time"))
    }

    /// Sample the flight up to `stoptime_sec` instead of the full time to
    /// intercept.
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
}

impl Missile for TerminalInterceptor<'_> {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn launchpoint(&self) -> GeoPoint {
        self.params.launchpoint
    }

    fn aimpoint(&self) -> Option<GeoPoint> {
        self.intercept
            .map(|geometry| GeoPoint::new(geometry.position.lat_deg, geometry.position.lon_deg))
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
        validate_horizontal_velocity(self.params.horizontal_velocity_km_s)?;
        validate_timestep(self.params.timestep_sec)?;
        let intercept_km = self.params.intercept_ground_dist_from_aimpoint_km;
        if !intercept_km.is_finite() || intercept_km < 0.0 {
            return Err(TrajectoryError::InvalidInterceptDistance(intercept_km));
        }
        if self.target.phase() == Phase::Unbuilt {
            return Err(InterceptError::TargetNotBuilt.into());
        }
        let target_data = self.target.static_data()?;

        // Where and when along the target's ground track the intercept happens.
        let target_range_km = target_data.dist_to_target_km;
        if intercept_km >= target_range_km {
            return Err(InterceptError::BeyondTargetRange {
                intercept_km,
                target_range_km,
            }
            .into());
        }
        let dist_from_target_lp_km = target_range_km - intercept_km;
        let time_after_target_launch_sec =
            dist_from_target_lp_km / target_data.horizontal_velocity_km_s;
        let intercept_position = self
            .target
            .current_position(time_after_target_launch_sec)?;
        let intercept_point =
            GeoPoint::new(intercept_position.lat_deg, intercept_position.lon_deg);

        // Own geometry toward that point.
        let ground_dist_km =
            geo::great_circle_distance_km(self.params.launchpoint, intercept_point);
        let slant_range_km = ground_dist_km.hypot(intercept_position.alt_km);
        let time_to_intercept_sec = ground_dist_km / self.params.horizontal_velocity_km_s;
        if time_to_intercept_sec <= 0.0 {
            return Err(InterceptError::ZeroTimeToIntercept {
                alt_km: intercept_position.alt_km,
            }
            .into());
        }
        if time_to_intercept_sec > time_after_target_launch_sec {
            return Err(InterceptError::ArrivesTooLate {
                required_sec: time_to_intercept_sec,
                available_sec: time_after_target_launch_sec,
            }
            .into());
        }

        // Vertical velocity that puts the arc at exactly the intercept
        // altitude at exactly the time to intercept (altitude formula solved
        // for the initial velocity).
        let gravity_km_s2 = self.constants.gravity_accel_km_s2;
        let gravity_drop_km = 0.5 * gravity_km_s2 * time_to_intercept_sec * time_to_intercept_sec;
        let initial_vertical_velocity_km_s =
            (intercept_position.alt_km - gravity_drop_km) / time_to_intercept_sec;

        let initial_launch_velocity_km_s = combined_velocity_km_s(
            self.params.horizontal_velocity_km_s,
            initial_vertical_velocity_km_s,
        );
        check_escape_velocity(initial_launch_velocity_km_s, &self.constants)?;
        let initial_launch_angle_deg = launch_angle_deg(
            self.params.horizontal_velocity_km_s,
            initial_vertical_velocity_km_s,
        );
        let launch_bearing_deg =
            geo::initial_bearing_deg(self.params.launchpoint, intercept_point);

        // The interceptor leaves early enough that both arrive together.
        let lead_sec = time_after_target_launch_sec - time_to_intercept_sec;
        let launch_time = epoch_plus_seconds(self.target.params().launch_time, lead_sec);

        self.intercept = Some(InterceptGeometry {
            time_after_target_launch_sec,
            position: intercept_position,
            slant_range_km,
        });
        self.static_data = Some(FlightStaticData {
            dist_to_target_km: ground_dist_km,
            launch_bearing_deg,
            time_to_target_sec: time_to_intercept_sec,
            horizontal_velocity_km_s: self.params.horizontal_velocity_km_s,
            initial_vertical_velocity_km_s,
            initial_launch_velocity_km_s,
            initial_launch_angle_deg,
        });
        self.launch_time = Some(launch_time);
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
        let aimpoint = self.aimpoint().ok_or(TrajectoryError::MissingAimpoint)?;
        let position = position_at(
            self.params.launchpoint,
            data,
            self.constants.gravity_accel_km_s2,
            elapsed_time_sec,
        );
        Ok(orientation_at(
            position,
            aimpoint,
            data,
            self.constants.gravity_accel_km_s2,
            elapsed_time_sec,
        ))
    }
}
