use chrono::{TimeZone, Utc};
use intercept_core::constants::PhysicalConstants;
use missile_intercept::geo::{GeoPoint, great_circle_distance_km};
use missile_intercept::trajectory::{
    BallisticMissile, LaunchParameters, Missile, Phase, TrajectoryError,
};

fn front_range_params() -> LaunchParameters {
    LaunchParameters {
        launchpoint: GeoPoint::new(39.7392, -104.9903),
        aimpoint: GeoPoint::new(41.1400, -104.8202),
        horizontal_velocity_km_s: 0.75,
        launch_time: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        timestep_sec: 1.0,
    }
}

fn built_missile() -> BallisticMissile {
    let mut missile = BallisticMissile::new(front_range_params(), PhysicalConstants::earth());
    missile.build().expect("build should succeed");
    missile
}

#[test]
fn build_derives_reasonable_front_range_numbers() {
    let missile = built_missile();
    let data = missile.static_data().expect("static data");
    assert!(
        (155.0..=160.0).contains(&data.dist_to_target_km),
        "dist = {}",
        data.dist_to_target_km
    );
    assert!(
        (207.0..=213.0).contains(&data.time_to_target_sec),
        "time to target = {}",
        data.time_to_target_sec
    );
    assert!(data.initial_launch_angle_deg >= 0.0);
    assert!(data.initial_launch_velocity_km_s >= data.horizontal_velocity_km_s);
}

#[test]
fn launch_before_build_fails_fast() {
    let mut missile = BallisticMissile::new(front_range_params(), PhysicalConstants::earth());
    assert!(matches!(
        missile.launch(),
        Err(TrajectoryError::NotBuilt(_))
    ));
    assert!(matches!(
        missile.current_position(10.0),
        Err(TrajectoryError::NotBuilt(_))
    ));
}

#[test]
fn zero_horizontal_velocity_is_rejected() {
    let mut params = front_range_params();
    params.horizontal_velocity_km_s = 0.0;
    let mut missile = BallisticMissile::new(params, PhysicalConstants::earth());
    assert!(matches!(
        missile.build(),
        Err(TrajectoryError::InvalidHorizontalVelocity(v)) if v == 0.0
    ));
    assert!(missile.static_data().is_err());
}

#[test]
fn flight_starts_at_the_launchpoint_on_the_ground() {
    let missile = built_missile();
    let position = missile.current_position(0.0).expect("position at launch");
    assert!((position.lat_deg - 39.7392).abs() < 1e-9);
    assert!((position.lon_deg - -104.9903).abs() < 1e-9);
    assert_eq!(position.alt_km, 0.0);
}

#[test]
fn flight_ends_at_the_aimpoint_on_the_ground() {
    let missile = built_missile();
    let data = missile.static_data().expect("static data");
    let terminal = missile
        .current_position(data.time_to_target_sec)
        .expect("terminal position");
    let miss_km = great_circle_distance_km(
        GeoPoint::new(terminal.lat_deg, terminal.lon_deg),
        missile.aimpoint().expect("aimpoint"),
    );
    assert!(
        miss_km / data.dist_to_target_km < 0.005,
        "terminal miss = {miss_km} km"
    );
    assert_eq!(terminal.alt_km, 0.0);
}

#[test]
fn apogee_sits_at_the_midpoint_of_flight() {
    let mut missile = built_missile();
    let data = *missile.static_data().expect("static data");
    let halfway_sec = data.time_to_target_sec / 2.0;
    let apogee = missile.current_position(halfway_sec).expect("apogee");
    let gravity = missile.constants().gravity_accel_km_s2.abs();
    let expected_apogee_km = gravity * data.time_to_target_sec.powi(2) / 8.0;
    assert!(
        (apogee.alt_km - expected_apogee_km).abs() < 1e-6,
        "apogee = {} vs {}",
        apogee.alt_km,
        expected_apogee_km
    );

    missile.launch().expect("launch");
    let max_sampled_alt = missile
        .trajectory()
        .expect("trajectory")
        .states()
        .iter()
        .map(|s| s.position.alt_km)
        .fold(f64::MIN, f64::max);
    assert!(max_sampled_alt <= apogee.alt_km + 1e-9);
}

#[test]
fn sampled_trajectory_brackets_the_flight() {
    let mut missile = built_missile();
    missile.launch().expect("launch");
    assert_eq!(missile.phase(), Phase::Launched);

    let trajectory = missile.trajectory().expect("trajectory");
    let states = trajectory.states();
    let data = missile.static_data().expect("static data");
    assert_eq!(states.first().expect("first state").time_sec, 0.0);
    assert_eq!(
        states.last().expect("last state").time_sec,
        data.time_to_target_sec
    );
    for pair in states.windows(2) {
        assert!(pair[0].time_sec < pair[1].time_sec, "times must increase");
    }
    for state in states {
        assert!(state.position.alt_km >= 0.0);
        assert_eq!(state.orientation.roll_deg, 0.0);
    }
}

#[test]
fn relaunch_and_rebuild_are_rejected() {
    let mut missile = built_missile();
    missile.launch().expect("launch");
    assert!(matches!(missile.launch(), Err(TrajectoryError::AlreadyLaunched)));
    assert!(matches!(missile.build(), Err(TrajectoryError::AlreadyBuilt)));
}

#[test]
fn launch_until_always_samples_the_exact_stop_time() {
    let mut params = front_range_params();
    params.timestep_sec = 10.0;
    let mut missile = BallisticMissile::new(params, PhysicalConstants::earth());
    missile.build().expect("build");
    missile.launch_until(42.5).expect("truncated launch");

    let states = missile.trajectory().expect("trajectory").states();
    assert_eq!(states.len(), 6); // 0, 10, 20, 30, 40, 42.5
    assert_eq!(states.last().expect("last state").time_sec, 42.5);
}

#[test]
fn tilt_is_level_at_apogee() {
    let missile = built_missile();
    let data = missile.static_data().expect("static data");
    let orientation = missile
        .current_orientation(data.time_to_target_sec / 2.0)
        .expect("orientation");
    assert!(
        (orientation.tilt_deg - 90.0).abs() < 1e-9,
        "tilt = {}",
        orientation.tilt_deg
    );
}

#[test]
fn heading_tracks_the_aimpoint() {
    let missile = built_missile();
    let data = missile.static_data().expect("static data");
    let orientation = missile.current_orientation(0.0).expect("orientation");
    assert!(
        (orientation.bearing_deg - data.launch_bearing_deg).abs() < 1e-6,
        "launch heading {} vs bearing {}",
        orientation.bearing_deg,
        data.launch_bearing_deg
    );
}

#[test]
fn escape_velocity_guard_rejects_extreme_flights() {
    let params = LaunchParameters {
        launchpoint: GeoPoint::new(0.0, 0.0),
        aimpoint: GeoPoint::new(0.0, 179.0),
        horizontal_velocity_km_s: 0.2,
        launch_time: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        timestep_sec: 1.0,
    };
    let mut missile = BallisticMissile::new(params, PhysicalConstants::earth());
    assert!(matches!(
        missile.build(),
        Err(TrajectoryError::ExceedsEscapeVelocity { .. })
    ));
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let mut params = front_range_params();
    params.aimpoint = GeoPoint::new(95.0, 10.0);
    let mut missile = BallisticMissile::new(params, PhysicalConstants::earth());
    assert!(matches!(
        missile.build(),
        Err(TrajectoryError::CoordinateOutOfRange { name: "aimpoint", .. })
    ));
}
