//! Scenario configuration models and loaders.
//!
//! Raw records mirror the on-disk shape of scenario files (YAML, TOML, or a
//! directory of TOML files); `TryFrom` conversions produce the validated
//! domain parameter types consumed by the trajectory solvers.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use intercept_geo::{GeoPoint, wrap_lon_deg};
use serde::Deserialize;
use thiserror::Error;

use crate::trajectory::{InterceptorParameters, LaunchParameters};

fn default_timestep_sec() -> f64 {
    1.0
}

/// Coordinate pair as written in scenario files.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CoordinateConfig {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

/// Ballistic missile record in a scenario file.
#[derive(Debug, Deserialize, Clone)]
pub struct MissileConfig {
    pub name: String,
    pub launchpoint: CoordinateConfig,
    pub aimpoint: CoordinateConfig,
    pub horizontal_velocity_km_s: f64,
    pub launch_time: DateTime<Utc>,
    #[serde(default = "default_timestep_sec")]
    pub timestep_sec: f64,
}

/// Optional interceptor record attached to a missile.
#[derive(Debug, Deserialize, Clone)]
pub struct InterceptorConfig {
    pub name: String,
    pub launchpoint: CoordinateConfig,
    pub horizontal_velocity_km_s: f64,
    pub intercept_ground_dist_from_aimpoint_km: f64,
    #[serde(default = "default_timestep_sec")]
    pub timestep_sec: f64,
}

/// One simulation: a missile and optionally the interceptor sent against it.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub missile: MissileConfig,
    #[serde(default)]
    pub interceptor: Option<InterceptorConfig>,
}

/// Errors that can occur while loading scenario files.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{name} latitude {lat_deg} is outside [-90, 90]")]
    LatitudeOutOfRange { name: String, lat_deg: f64 },
    #[error("{name} longitude {lon_deg} is not a finite coordinate")]
    LongitudeNotFinite { name: String, lon_deg: f64 },
}

/// Load simulation records from a YAML file, a TOML file, or a directory of
/// TOML files (sorted by path).
pub fn load_simulations<P: AsRef<Path>>(path: P) -> Result<Vec<SimulationConfig>, ScenarioError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ScenarioError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ScenarioError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

impl CoordinateConfig {
    fn into_point(self, name: &str) -> Result<GeoPoint, ScenarioError> {
        if !self.lat_deg.is_finite() || !(-90.0..=90.0).contains(&self.lat_deg) {
            return Err(ScenarioError::LatitudeOutOfRange {
                name: name.to_string(),
                lat_deg: self.lat_deg,
            });
        }
        if !self.lon_deg.is_finite() {
            return Err(ScenarioError::LongitudeNotFinite {
                name: name.to_string(),
                lon_deg: self.lon_deg,
            });
        }
        Ok(GeoPoint::new(self.lat_deg, wrap_lon_deg(self.lon_deg)))
    }
}

impl TryFrom<MissileConfig> for LaunchParameters {
    type Error = ScenarioError;

    fn try_from(value: MissileConfig) -> Result<Self, Self::Error> {
        Ok(LaunchParameters {
            launchpoint: value
                .launchpoint
                .into_point(&format!("{} launchpoint", value.name))?,
            aimpoint: value
                .aimpoint
                .into_point(&format!("{} aimpoint", value.name))?,
            horizontal_velocity_km_s: value.horizontal_velocity_km_s,
            launch_time: value.launch_time,
            timestep_sec: value.timestep_sec,
        })
    }
}

impl TryFrom<InterceptorConfig> for InterceptorParameters {
    type Error = ScenarioError;

    fn try_from(value: InterceptorConfig) -> Result<Self, Self::Error> {
        Ok(InterceptorParameters {
            launchpoint: value
                .launchpoint
                .into_point(&format!("{} launchpoint", value.name))?,
            horizontal_velocity_km_s: value.horizontal_velocity_km_s,
            intercept_ground_dist_from_aimpoint_km: value.intercept_ground_dist_from_aimpoint_km,
            timestep_sec: value.timestep_sec,
        })
    }
}
