use missile_intercept::geo::{
    GeoPoint, cross_track_distance_km, destination_point, great_circle_distance_km,
    great_circle_distance_nvector_km, initial_bearing_deg,
};

fn cities() -> [(&'static str, GeoPoint); 4] {
    [
        ("Denver", GeoPoint::new(39.7392, -104.9903)),
        ("Amman", GeoPoint::new(31.9539, 35.9106)),
        ("Sydney", GeoPoint::new(-33.8688, 151.2093)),
        ("Santiago", GeoPoint::new(-33.4489, -70.6693)),
    ]
}

fn known_distance_km(a: &str, b: &str) -> f64 {
    match (a, b) {
        ("Denver", "Amman") | ("Amman", "Denver") => 11_076.0,
        ("Denver", "Sydney") | ("Sydney", "Denver") => 13_398.0,
        ("Denver", "Santiago") | ("Santiago", "Denver") => 8_865.0,
        ("Amman", "Sydney") | ("Sydney", "Amman") => 14_067.0,
        ("Amman", "Santiago") | ("Santiago", "Amman") => 13_289.0,
        ("Sydney", "Santiago") | ("Santiago", "Sydney") => 11_340.0,
        _ => unreachable!("unknown route {a} -> {b}"),
    }
}

#[test]
fn haversine_matches_city_table() {
    for (origin_name, origin) in cities() {
        for (dest_name, dest) in cities() {
            if origin_name == dest_name {
                continue;
            }
            let calculated = great_circle_distance_km(origin, dest);
            let expected = known_distance_km(origin_name, dest_name);
            let margin = (calculated - expected).abs() / expected;
            assert!(
                margin < 0.002,
                "{origin_name} -> {dest_name}: {calculated} km vs {expected} km"
            );
        }
    }
}

#[test]
fn nvector_distance_matches_city_table() {
    for (origin_name, origin) in cities() {
        for (dest_name, dest) in cities() {
            if origin_name == dest_name {
                continue;
            }
            let calculated = great_circle_distance_nvector_km(origin, dest);
            let expected = known_distance_km(origin_name, dest_name);
            let margin = (calculated - expected).abs() / expected;
            assert!(
                margin < 0.002,
                "{origin_name} -> {dest_name}: {calculated} km vs {expected} km"
            );
        }
    }
}

#[test]
fn both_distance_formulations_agree() {
    for (_, origin) in cities() {
        for (_, dest) in cities() {
            let haversine = great_circle_distance_km(origin, dest);
            let nvector = great_circle_distance_nvector_km(origin, dest);
            if haversine == 0.0 {
                assert!(nvector.abs() < 1e-9);
                continue;
            }
            let margin = (haversine - nvector).abs() / haversine;
            assert!(margin < 0.001, "haversine {haversine} vs n-vector {nvector}");
        }
    }
}

#[test]
fn distance_is_symmetric() {
    for (_, origin) in cities() {
        for (_, dest) in cities() {
            let forward = great_circle_distance_km(origin, dest);
            let backward = great_circle_distance_km(dest, origin);
            assert!((forward - backward).abs() < 1e-9);
        }
    }
}

#[test]
fn bearings_stay_within_compass_range() {
    for (_, origin) in cities() {
        for (_, dest) in cities() {
            let bearing = initial_bearing_deg(origin, dest);
            assert!((0.0..360.0).contains(&bearing), "bearing = {bearing}");
        }
    }
}

#[test]
fn destination_projection_inverts_distance_and_bearing() {
    for (origin_name, origin) in cities() {
        for (dest_name, dest) in cities() {
            if origin_name == dest_name {
                continue;
            }
            let distance = great_circle_distance_km(origin, dest);
            let bearing = initial_bearing_deg(origin, dest);
            let projected = destination_point(origin, distance, bearing);
            assert!(
                (projected.lat_deg - dest.lat_deg).abs() < 1e-6,
                "{origin_name} -> {dest_name}: lat {} vs {}",
                projected.lat_deg,
                dest.lat_deg
            );
            assert!(
                (projected.lon_deg - dest.lon_deg).abs() < 1e-6,
                "{origin_name} -> {dest_name}: lon {} vs {}",
                projected.lon_deg,
                dest.lon_deg
            );
        }
    }
}

#[test]
fn points_on_the_path_have_no_cross_track_offset() {
    let denver = GeoPoint::new(39.7392, -104.9903);
    let amman = GeoPoint::new(31.9539, 35.9106);
    let distance = great_circle_distance_km(denver, amman);
    let bearing = initial_bearing_deg(denver, amman);
    let midpoint = destination_point(denver, distance / 2.0, bearing);
    let offset = cross_track_distance_km(denver, amman, midpoint);
    assert!(offset.abs() < 1e-3, "offset = {offset} km");
}
