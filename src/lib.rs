//! Orbit-mutating maneuvers on two-body Keplerian orbits.
//!
//! The physics lives in the workspace crates re-exported here; this crate adds
//! the `scenario` layer that turns configuration files into orbits and
//! maneuvers, and the `report` layer that turns applied maneuvers into export
//! records. Keeping both in a library lets the CLI and tests share them.

pub mod report;
pub mod scenario;

pub use orbital_config as config;
pub use orbital_core::{constants, time, units, vector};
pub use orbital_export as export;
pub use orbital_maneuver as maneuver;
pub use orbital_orbits as orbits;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
