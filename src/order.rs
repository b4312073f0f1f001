//! Domain model for courier delivery orders.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A latitude/longitude pair in degrees.
///
/// Absence of a location is expressed with `Option<GeoLocation>` at the
/// field or argument that may lack one, never with sentinel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// One customer order: a restaurant pickup paired with a consumer drop-off.
///
/// Raw records may lack coordinates until they pass [`validate_orders`].
/// Orders are read-only inputs; the search strategies never mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub consumer_name: String,
    pub restaurant_name: String,
    pub consumer: Option<GeoLocation>,
    pub restaurant: Option<GeoLocation>,
    /// Food preparation time at the restaurant, in minutes.
    pub prep_minutes: f64,
}

/// What the courier does at one stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    /// Pick up the order from the named restaurant.
    Pickup(String),
    /// Hand the order to the named consumer.
    Delivery(String),
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Pickup(restaurant) => write!(f, "Pick up from {restaurant}"),
            StepAction::Delivery(consumer) => write!(f, "Deliver to {consumer}"),
        }
    }
}

/// One atomic action and the location where it happens. The position of a
/// step within a [`Route`] is the visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub action: StepAction,
    pub location: GeoLocation,
}

/// A computed delivery route, owned by the caller after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub total_minutes: f64,
    pub steps: Vec<RouteStep>,
}

/// Rejection reasons for raw order batches.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("no orders provided")]
    EmptyBatch,
    #[error("order {index} is missing a consumer or restaurant name")]
    MissingName { index: usize },
    #[error("order {index} is missing a restaurant or consumer location")]
    MissingLocation { index: usize },
    #[error("order {index} has a non-positive preparation time")]
    NonPositivePrepTime { index: usize },
}

/// Field-level validation for raw order batches.
///
/// Callers run this before handing orders to a [`crate::planner::RoutePlanner`];
/// the planner itself re-checks only the empty batch.
pub fn validate_orders(orders: &[Order]) -> Result<(), ValidationError> {
    if orders.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }

    for (index, order) in orders.iter().enumerate() {
        if order.consumer_name.is_empty() || order.restaurant_name.is_empty() {
            return Err(ValidationError::MissingName { index });
        }
        if order.restaurant.is_none() || order.consumer.is_none() {
            return Err(ValidationError::MissingLocation { index });
        }
        // comparison is false for NaN as well
        if !(order.prep_minutes > 0.0) {
            return Err(ValidationError::NonPositivePrepTime { index });
        }
    }

    Ok(())
}
