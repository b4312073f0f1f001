//! Route orchestration: builder-validated configuration and strategy
//! dispatch.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::brute_force::BruteForceStrategy;
use crate::order::{GeoLocation, Order, Route};
use crate::traits::{DistanceCalculator, RouteError, RouteStrategy};
use crate::travel::{MAX_REASONABLE_ROUTE_MINUTES, TravelTimeCalculator};

/// Configuration failures; no planner is produced.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("invalid speed: {speed_kmh} km/h")]
    InvalidSpeed { speed_kmh: f64 },
    #[error("distance calculator is not set")]
    MissingDistanceCalculator,
}

/// Computes best delivery routes through a swappable search strategy.
pub struct RoutePlanner {
    travel: TravelTimeCalculator,
    strategy: Box<dyn RouteStrategy>,
}

impl RoutePlanner {
    /// Replaces the active search algorithm, the planner's only mutable
    /// state. The new strategy serves every subsequent computation.
    pub fn set_strategy(&mut self, strategy: Box<dyn RouteStrategy>) {
        debug!("route strategy swapped");
        self.strategy = strategy;
    }

    /// The configured cost model, for wiring up a replacement strategy.
    pub fn travel_time_calculator(&self) -> &TravelTimeCalculator {
        &self.travel
    }

    /// Validates call preconditions and delegates to the active strategy,
    /// returning its result verbatim. Full field-level order validation is
    /// [`crate::order::validate_orders`]'s job; only the empty batch and
    /// the absent start are re-checked here.
    pub fn compute_best_route(
        &self,
        orders: &[Order],
        start: Option<GeoLocation>,
    ) -> Result<Route, RouteError> {
        if orders.is_empty() {
            return Err(RouteError::EmptyOrders);
        }
        let Some(start) = start else {
            return Err(RouteError::MissingStartLocation);
        };

        self.strategy.calculate_route(orders, start)
    }
}

/// Assembles a validated [`RoutePlanner`].
///
/// The planner comes pre-configured with the brute-force strategy; callers
/// may swap in [`crate::dynamic::DynamicProgrammingStrategy`] afterwards.
#[derive(Default)]
pub struct RoutePlannerBuilder {
    distance: Option<Arc<dyn DistanceCalculator>>,
    speed_kmh: Option<f64>,
    max_route_minutes: Option<f64>,
}

impl RoutePlannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance_calculator(mut self, calculator: impl DistanceCalculator + 'static) -> Self {
        self.distance = Some(Arc::new(calculator));
        self
    }

    /// Courier speed in distance-units per hour.
    pub fn speed_kmh(mut self, speed: f64) -> Self {
        self.speed_kmh = Some(speed);
        self
    }

    /// Overrides the default 24-hour feasibility ceiling.
    pub fn max_route_minutes(mut self, minutes: f64) -> Self {
        self.max_route_minutes = Some(minutes);
        self
    }

    pub fn build(self) -> Result<RoutePlanner, BuildError> {
        let speed_kmh = self.speed_kmh.unwrap_or(0.0);
        // comparison is false for NaN as well
        if !(speed_kmh > 0.0) {
            return Err(BuildError::InvalidSpeed { speed_kmh });
        }
        let Some(distance) = self.distance else {
            return Err(BuildError::MissingDistanceCalculator);
        };

        let travel = TravelTimeCalculator::new(distance, speed_kmh);
        let ceiling = self.max_route_minutes.unwrap_or(MAX_REASONABLE_ROUTE_MINUTES);
        let strategy = BruteForceStrategy::new(travel.clone()).with_ceiling(ceiling);

        Ok(RoutePlanner {
            travel,
            strategy: Box::new(strategy),
        })
    }
}
