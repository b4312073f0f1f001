//! Test fixtures for courier-planner.
//!
//! Provides shared order builders and named Lake Chad basin locations for
//! the routing scenarios.

pub mod lake_chad_locations;

pub use lake_chad_locations::*;
