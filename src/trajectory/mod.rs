//! Missile trajectory contract shared by the ballistic and interceptor models.
//!
//! A missile moves through a one-directional lifecycle: Unbuilt → Built
//! (static flight characteristics derived) → Launched (trajectory sampled).
//! The lifecycle is checked explicitly at the start of every operation;
//! recomputing with different inputs means constructing a new instance.

pub mod ballistic;
pub mod interceptor;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use intercept_core::constants::PhysicalConstants;
use intercept_core::units;
use intercept_geo as geo;
use intercept_geo::GeoPoint;
use serde::Serialize;
use thiserror::Error;

pub use ballistic::{BallisticMissile, LaunchParameters};
pub use interceptor::{InterceptError, InterceptGeometry, InterceptorParameters, TerminalInterceptor};

/// Lifecycle phase of a missile instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unbuilt,
    Built,
    Launched,
}

/// Static flight characteristics, computed once by `build` and immutable
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightStaticData {
    /// Ground distance from launchpoint to aimpoint (km).
    pub dist_to_target_km: f64,
    /// Forward azimuth from launchpoint to aimpoint (degrees clockwise from
    /// North).
    pub launch_bearing_deg: f64,
    /// Total flight duration from launch to target (seconds).
    pub time_to_target_sec: f64,
    /// Constant horizontal velocity (km/s).
    pub horizontal_velocity_km_s: f64,
    /// Vertical velocity at launch (km/s).
    pub initial_vertical_velocity_km_s: f64,
    /// Launch velocity magnitude (km/s).
    pub initial_launch_velocity_km_s: f64,
    /// Launch angle above the horizontal (degrees).
    pub initial_launch_angle_deg: f64,
}

impl FlightStaticData {
    /// Copy for the export boundary.
    pub fn export_characteristics(&self) -> intercept_export::summary::FlightCharacteristics {
        intercept_export::summary::FlightCharacteristics {
            dist_to_target_km: self.dist_to_target_km,
            launch_bearing_deg: self.launch_bearing_deg,
            time_to_target_sec: self.time_to_target_sec,
            horizontal_velocity_km_s: self.horizontal_velocity_km_s,
            initial_vertical_velocity_km_s: self.initial_vertical_velocity_km_s,
            initial_launch_velocity_km_s: self.initial_launch_velocity_km_s,
            initial_launch_angle_deg: self.initial_launch_angle_deg,
        }
    }
}

/// Latitude, longitude, and altitude of a missile at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat_deg: f64,
    pub lon_deg: f64,
    /// Altitude above the surface, floored at 0 (km).
    pub alt_km: f64,
}

/// Heading, tilt, and roll of a missile at one instant, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orientation {
    pub bearing_deg: f64,
    pub tilt_deg: f64,
    /// Always 0 for the symmetric airframes modelled here.
    pub roll_deg: f64,
}

/// One timestamped trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryState {
    pub time_sec: f64,
    pub position: Position,
    pub orientation: Orientation,
}

/// Ordered sequence of trajectory samples: the first at elapsed time 0, the
/// last exactly at the sampled stop time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    states: Vec<TrajectoryState>,
}

impl Trajectory {
    pub fn states(&self) -> &[TrajectoryState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Elapsed time covered by the sampled flight (seconds).
    pub fn duration_sec(&self) -> f64 {
        self.states.last().map(|s| s.time_sec).unwrap_or(0.0)
    }

    /// Convert the samples for the export boundary: altitude in metres and
    /// absolute UTC timestamps offset from the launch epoch.
    pub fn export_samples(&self, launch_time: DateTime<Utc>) -> Vec<intercept_export::trajectory::Sample> {
        self.states
            .iter()
            .map(|state| intercept_export::trajectory::Sample {
                time_utc: epoch_plus_seconds(launch_time, state.time_sec)
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                time_sec: state.time_sec,
                lat_deg: state.position.lat_deg,
                lon_deg: state.position.lon_deg,
                alt_m: units::km_to_m(state.position.alt_km),
                bearing_deg: state.orientation.bearing_deg,
                tilt_deg: state.orientation.tilt_deg,
                roll_deg: state.orientation.roll_deg,
            })
            .collect()
    }
}

/// Absolute timestamp for an elapsed-time offset from a launch epoch.
pub fn epoch_plus_seconds(epoch: DateTime<Utc>, elapsed_sec: f64) -> DateTime<Utc> {
    epoch + Duration::milliseconds((elapsed_sec * 1_000.0).round() as i64)
}

/// Failures raised by the build, launch, and query operations.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("{0} requires a built flight profile; call build() first")]
    NotBuilt(&'static str),
    #[error("{0} requires a sampled trajectory; call launch() first")]
    NotLaunched(&'static str),
    #[error("flight profile already built; construct a new instance to rebuild")]
    AlreadyBuilt,
    #[error("trajectory already sampled; construct a new instance to relaunch")]
    AlreadyLaunched,
    #[error("no aimpoint is set for this missile")]
    MissingAimpoint,
    #[error("horizontal velocity must be positive and finite, got {0} km/s")]
    InvalidHorizontalVelocity(f64),
    #[error("timestep must be positive and finite, got {0} s")]
    InvalidTimestep(f64),
    #[error("stop time must be non-negative and finite, got {0} s")]
    InvalidStopTime(f64),
    #[error("intercept distance from aimpoint must be non-negative and finite, got {0} km")]
    InvalidInterceptDistance(f64),
    #[error("{name} ({lat_deg}, {lon_deg}) is outside the valid latitude/longitude domain")]
    CoordinateOutOfRange {
        name: &'static str,
        lat_deg: f64,
        lon_deg: f64,
    },
    #[error(
        "launch velocity {velocity_km_s:.3} km/s reaches Earth escape velocity \
         {escape_km_s:.3} km/s"
    )]
    ExceedsEscapeVelocity {
        velocity_km_s: f64,
        escape_km_s: f64,
    },
    #[error("intercept solve failed: {0}")]
    Intercept(#[from] InterceptError),
}

/// Capability contract shared by every missile variant.
pub trait Missile {
    /// Current lifecycle phase.
    fn phase(&self) -> Phase;
    /// Launchpoint coordinates.
    fn launchpoint(&self) -> GeoPoint;
    /// Aimpoint coordinates; `None` until an interceptor derives its own.
    fn aimpoint(&self) -> Option<GeoPoint>;
    /// Static flight characteristics; errors before `build` completes.
    fn static_data(&self) -> Result<&FlightStaticData, TrajectoryError>;
    /// Sampled trajectory; errors before `launch` completes.
    fn trajectory(&self) -> Result<&Trajectory, TrajectoryError>;
    /// Derive the static flight characteristics (Unbuilt → Built).
    fn build(&mut self) -> Result<(), TrajectoryError>;
    /// Sample the full flight into a trajectory (Built → Launched).
    fn launch(&mut self) -> Result<(), TrajectoryError>;
    /// Position after `elapsed_time_sec` seconds of flight.
    fn current_position(&self, elapsed_time_sec: f64) -> Result<Position, TrajectoryError>;
    /// Orientation after `elapsed_time_sec` seconds of flight.
    fn current_orientation(&self, elapsed_time_sec: f64) -> Result<Orientation, TrajectoryError>;

    /// Great-circle distance from an arbitrary position to the aimpoint (km).
    fn distance_to_target_km(&self, from: GeoPoint) -> Result<f64, TrajectoryError> {
        let aimpoint = self.aimpoint().ok_or(TrajectoryError::MissingAimpoint)?;
        Ok(geo::great_circle_distance_km(from, aimpoint))
    }

    /// Initial bearing from an arbitrary position to the aimpoint (degrees).
    fn bearing_to_target_deg(&self, from: GeoPoint) -> Result<f64, TrajectoryError> {
        let aimpoint = self.aimpoint().ok_or(TrajectoryError::MissingAimpoint)?;
        Ok(geo::initial_bearing_deg(from, aimpoint))
    }
}

/// Velocity magnitude from horizontal and vertical components (km/s).
pub fn combined_velocity_km_s(horizontal_km_s: f64, vertical_km_s: f64) -> f64 {
    horizontal_km_s.hypot(vertical_km_s)
}

/// Launch angle above the horizontal from velocity components (degrees).
pub fn launch_angle_deg(horizontal_km_s: f64, vertical_km_s: f64) -> f64 {
    (vertical_km_s / horizontal_km_s).atan().to_degrees()
}

/// Vertical velocity after `elapsed_time_sec`, linear under constant gravity
/// (km/s).
pub(crate) fn vertical_velocity_at(
    data: &FlightStaticData,
    gravity_km_s2: f64,
    elapsed_time_sec: f64,
) -> f64 {
    data.initial_vertical_velocity_km_s + gravity_km_s2 * elapsed_time_sec
}

/// Closed-form position along the launch bearing with parabolic altitude.
pub(crate) fn position_at(
    launchpoint: GeoPoint,
    data: &FlightStaticData,
    gravity_km_s2: f64,
    elapsed_time_sec: f64,
) -> Position {
    let ground_dist_km = data.horizontal_velocity_km_s * elapsed_time_sec;
    let surface = geo::destination_point(launchpoint, ground_dist_km, data.launch_bearing_deg);
    let alt_km = data.initial_vertical_velocity_km_s * elapsed_time_sec
        + 0.5 * gravity_km_s2 * elapsed_time_sec * elapsed_time_sec;
    Position {
        lat_deg: surface.lat_deg,
        lon_deg: surface.lon_deg,
        alt_km: alt_km.max(0.0),
    }
}

/// Heading continuously re-aimed at the aimpoint, with the flight-path angle
/// converted into a compass-style tilt.
pub(crate) fn orientation_at(
    position: Position,
    aimpoint: GeoPoint,
    data: &FlightStaticData,
    gravity_km_s2: f64,
    elapsed_time_sec: f64,
) -> Orientation {
    let here = GeoPoint::new(position.lat_deg, position.lon_deg);
    let bearing_deg = geo::initial_bearing_deg(here, aimpoint);
    let vertical_km_s = vertical_velocity_at(data, gravity_km_s2, elapsed_time_sec);
    let tilt_deg = geo::rad_to_deg(geo::trig_to_compass_rad(
        vertical_km_s.atan2(data.horizontal_velocity_km_s),
    ));
    Orientation {
        bearing_deg,
        tilt_deg,
        roll_deg: 0.0,
    }
}

/// Sample positions and orientations on the fixed timestep grid, always
/// closing with an exact sample at `stoptime_sec`.
pub(crate) fn sample_flight<M: Missile + ?Sized>(
    missile: &M,
    stoptime_sec: f64,
    timestep_sec: f64,
) -> Result<Trajectory, TrajectoryError> {
    if !stoptime_sec.is_finite() || stoptime_sec < 0.0 {
        return Err(TrajectoryError::InvalidStopTime(stoptime_sec));
    }
    let mut states = Vec::new();
    for step in 0_u64.. {
        let time_sec = step as f64 * timestep_sec;
        if time_sec >= stoptime_sec {
            break;
        }
        states.push(state_at(missile, time_sec)?);
    }
    states.push(state_at(missile, stoptime_sec)?);
    Ok(Trajectory { states })
}

fn state_at<M: Missile + ?Sized>(
    missile: &M,
    time_sec: f64,
) -> Result<TrajectoryState, TrajectoryError> {
    Ok(TrajectoryState {
        time_sec,
        position: missile.current_position(time_sec)?,
        orientation: missile.current_orientation(time_sec)?,
    })
}

pub(crate) fn validate_coordinate(
    name: &'static str,
    point: GeoPoint,
) -> Result<(), TrajectoryError> {
    let lat_ok = point.lat_deg.is_finite() && (-90.0..=90.0).contains(&point.lat_deg);
    let lon_ok = point.lon_deg.is_finite() && point.lon_deg > -180.0 && point.lon_deg <= 180.0;
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(TrajectoryError::CoordinateOutOfRange {
            name,
            lat_deg: point.lat_deg,
            lon_deg: point.lon_deg,
        })
    }
}

pub(crate) fn validate_horizontal_velocity(velocity_km_s: f64) -> Result<(), TrajectoryError> {
    if velocity_km_s.is_finite() && velocity_km_s > 0.0 {
        Ok(())
    } else {
        Err(TrajectoryError::InvalidHorizontalVelocity(velocity_km_s))
    }
}

pub(crate) fn validate_timestep(timestep_sec: f64) -> Result<(), TrajectoryError> {
    if timestep_sec.is_finite() && timestep_sec > 0.0 {
        Ok(())
    } else {
        Err(TrajectoryError::InvalidTimestep(timestep_sec))
    }
}

pub(crate) fn check_escape_velocity(
    velocity_km_s: f64,
    constants: &PhysicalConstants,
) -> Result<(), TrajectoryError> {
    if velocity_km_s < constants.escape_velocity_km_s {
        Ok(())
    } else {
        Err(TrajectoryError::ExceedsEscapeVelocity {
            velocity_km_s,
            escape_km_s: constants.escape_velocity_km_s,
        })
    }
}
