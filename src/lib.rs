//! Ballistic trajectory and terminal-intercept solvers over a spherical Earth.
//!
//! The library models free-flight ballistic missiles with closed-form
//! kinematics and solves the launch geometry of interceptors timed to meet
//! them mid-flight. Keeping the solvers in a library crate lets the scenario
//! and export boundaries stay thin front-ends.

pub mod scenario;
pub mod trajectory;

pub use intercept_export as export;
pub use intercept_geo as geo;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
