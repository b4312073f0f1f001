//! Core seams for the courier planner.
//!
//! These are intentionally minimal. The distance function and the search
//! algorithm are the two points callers are expected to swap out.

use thiserror::Error;

use crate::order::{GeoLocation, Order, Route};

/// Distance between two points, in the unit the configured speed is
/// expressed over (kilometers for the canonical haversine implementation).
pub trait DistanceCalculator: Send + Sync {
    fn distance(&self, from: GeoLocation, to: GeoLocation) -> f64;
}

/// An interchangeable route-search algorithm.
///
/// Every implementation solves the same problem: visit each order's
/// restaurant strictly before its consumer, minimizing total elapsed time
/// from `start`. Strategies hold no per-call mutable state, so a configured
/// instance may be reused across computations.
pub trait RouteStrategy: Send + Sync {
    fn calculate_route(&self, orders: &[Order], start: GeoLocation) -> Result<Route, RouteError>;
}

/// Call-time failures shared by the planner and the strategies.
#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("no orders to process")]
    EmptyOrders,
    #[error("start location can't be empty")]
    MissingStartLocation,
    #[error("order {index} is missing a restaurant or consumer location")]
    MissingOrderLocation { index: usize },
    /// Every candidate route exceeded the feasibility ceiling. Both
    /// strategies report this uniformly; there is no silent empty result.
    #[error("no route stays within {ceiling_minutes} minutes")]
    RouteImpossible { ceiling_minutes: f64 },
}
