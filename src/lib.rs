//! courier-planner core
//!
//! Minimal-time pickup-and-delivery routing for a single courier: a shared
//! travel-time cost model and two interchangeable exact search strategies.

pub mod traits;
pub mod order;
pub mod travel;
pub mod haversine;
pub mod brute_force;
pub mod dynamic;
pub mod planner;
