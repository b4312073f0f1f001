//! Travel-time cost model shared by both search strategies.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::order::{GeoLocation, Order, RouteStep, StepAction};
use crate::traits::{DistanceCalculator, RouteError};

/// Ceiling on acceptable total route time: 24 hours in minutes. Routes that
/// cross it are discarded as infeasible.
pub const MAX_REASONABLE_ROUTE_MINUTES: f64 = 24.0 * 60.0;

/// Converts a pair of coordinates into travel minutes at a constant speed.
///
/// Pure and deterministic; holds no per-call state, so one instance is
/// shared by the planner and every strategy wired up from it. Only
/// constructible through [`crate::planner::RoutePlannerBuilder`], which
/// rejects non-positive speeds before this type is reachable.
#[derive(Clone)]
pub struct TravelTimeCalculator {
    distance: Arc<dyn DistanceCalculator>,
    speed_kmh: f64,
}

impl TravelTimeCalculator {
    pub(crate) fn new(distance: Arc<dyn DistanceCalculator>, speed_kmh: f64) -> Self {
        Self { distance, speed_kmh }
    }

    /// Travel time in minutes between two points.
    pub fn minutes_between(&self, from: GeoLocation, to: GeoLocation) -> f64 {
        self.distance.distance(from, to) / self.speed_kmh * 60.0
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

impl fmt::Debug for TravelTimeCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravelTimeCalculator")
            .field("speed_kmh", &self.speed_kmh)
            .finish()
    }
}

/// Per-search precomputed travel legs.
///
/// Both strategies evaluate candidate visiting orders against these tables
/// instead of recomputing point-to-point times inside their search loops.
/// Building the matrix is also where absent order coordinates surface as an
/// error, so the searches themselves only ever see resolvable legs.
#[derive(Debug, Clone)]
pub(crate) struct TravelMatrix {
    /// start -> restaurant of order i.
    depart: Vec<f64>,
    /// consumer of order j -> restaurant of order i, indexed `[j][i]`.
    transfer: Vec<Vec<f64>>,
    /// restaurant of order i -> consumer of order i.
    service: Vec<f64>,
    /// Preparation minutes for order i.
    prep: Vec<f64>,
    pickups: Vec<GeoLocation>,
    dropoffs: Vec<GeoLocation>,
}

impl TravelMatrix {
    pub fn build(
        orders: &[Order],
        start: GeoLocation,
        travel: &TravelTimeCalculator,
    ) -> Result<Self, RouteError> {
        let mut pickups = Vec::with_capacity(orders.len());
        let mut dropoffs = Vec::with_capacity(orders.len());
        for (index, order) in orders.iter().enumerate() {
            let (Some(restaurant), Some(consumer)) = (order.restaurant, order.consumer) else {
                return Err(RouteError::MissingOrderLocation { index });
            };
            pickups.push(restaurant);
            dropoffs.push(consumer);
        }

        let depart = pickups
            .iter()
            .map(|&restaurant| travel.minutes_between(start, restaurant))
            .collect();
        let service = pickups
            .iter()
            .zip(&dropoffs)
            .map(|(&restaurant, &consumer)| travel.minutes_between(restaurant, consumer))
            .collect();
        let transfer = dropoffs
            .iter()
            .map(|&consumer| {
                pickups
                    .iter()
                    .map(|&restaurant| travel.minutes_between(consumer, restaurant))
                    .collect()
            })
            .collect();
        let prep = orders.iter().map(|order| order.prep_minutes).collect();

        trace!(orders = orders.len(), "travel matrix built");

        Ok(Self {
            depart,
            transfer,
            service,
            prep,
            pickups,
            dropoffs,
        })
    }

    pub fn len(&self) -> usize {
        self.depart.len()
    }

    /// Leg into order `next`: from the start, or from the previous order's
    /// consumer.
    pub fn arrival(&self, prev: Option<usize>, next: usize) -> f64 {
        match prev {
            None => self.depart[next],
            Some(j) => self.transfer[j][next],
        }
    }

    /// Cost of one order once the courier is at its restaurant: wait out
    /// the prep, then drive to the consumer.
    pub fn handoff(&self, i: usize) -> f64 {
        self.prep[i] + self.service[i]
    }

    /// Expands a visiting order into the pickup/delivery step sequence.
    pub fn steps_for(&self, orders: &[Order], visiting: &[usize]) -> Vec<RouteStep> {
        let mut steps = Vec::with_capacity(visiting.len() * 2);
        for &i in visiting {
            steps.push(RouteStep {
                action: StepAction::Pickup(orders[i].restaurant_name.clone()),
                location: self.pickups[i],
            });
            steps.push(RouteStep {
                action: StepAction::Delivery(orders[i].consumer_name.clone()),
                location: self.dropoffs[i],
            });
        }
        steps
    }
}
