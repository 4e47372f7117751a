//! AEQ Core - Backend logic for the AEQueue mock harness
//!
//! This crate contains all simulation and decoding logic with zero UI
//! dependencies. It can be used by the harness binary or a test driver.

pub mod config;
pub mod links;
pub mod logging;
pub mod models;
pub mod sim;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
