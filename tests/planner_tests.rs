//! Builder, orchestrator, and order-validation tests.

mod fixtures;

use courier_planner::dynamic::DynamicProgrammingStrategy;
use courier_planner::haversine::HaversineDistance;
use courier_planner::order::{GeoLocation, Order, ValidationError, validate_orders};
use courier_planner::planner::{BuildError, RoutePlanner, RoutePlannerBuilder};
use courier_planner::traits::RouteError;

use fixtures::lake_chad_locations::{CONSUMERS, DEPOT, RESTAURANTS, order_between, scenario_orders};

fn haversine_planner(speed_kmh: f64) -> RoutePlanner {
    RoutePlannerBuilder::new()
        .distance_calculator(HaversineDistance)
        .speed_kmh(speed_kmh)
        .build()
        .expect("valid configuration")
}

fn swap_to_dp(planner: &mut RoutePlanner) {
    let travel = planner.travel_time_calculator().clone();
    planner.set_strategy(Box::new(DynamicProgrammingStrategy::new(travel)));
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn build_rejects_zero_speed() {
    let result = RoutePlannerBuilder::new()
        .distance_calculator(HaversineDistance)
        .speed_kmh(0.0)
        .build();
    assert_eq!(result.err(), Some(BuildError::InvalidSpeed { speed_kmh: 0.0 }));
}

#[test]
fn build_rejects_negative_speed() {
    let result = RoutePlannerBuilder::new()
        .distance_calculator(HaversineDistance)
        .speed_kmh(-10.0)
        .build();
    assert_eq!(result.err(), Some(BuildError::InvalidSpeed { speed_kmh: -10.0 }));
}

#[test]
fn build_rejects_unset_speed() {
    let result = RoutePlannerBuilder::new()
        .distance_calculator(HaversineDistance)
        .build();
    assert!(matches!(result, Err(BuildError::InvalidSpeed { .. })));
}

#[test]
fn build_rejects_missing_distance_calculator() {
    let result = RoutePlannerBuilder::new().speed_kmh(20.0).build();
    assert_eq!(result.err(), Some(BuildError::MissingDistanceCalculator));
}

#[test]
fn build_defaults_to_a_working_strategy() {
    // No set_strategy call: the builder's brute-force default serves the
    // computation.
    let planner = haversine_planner(20.0);
    let route = planner
        .compute_best_route(&scenario_orders(), Some(DEPOT.point()))
        .expect("route");
    assert!(route.total_minutes > 0.0);
    assert_eq!(route.steps.len(), 4);
}

// ============================================================================
// Orchestrator preconditions
// ============================================================================

#[test]
fn empty_order_list_is_rejected_by_both_strategies() {
    let mut planner = haversine_planner(20.0);
    let result = planner.compute_best_route(&[], Some(DEPOT.point()));
    assert_eq!(result.err(), Some(RouteError::EmptyOrders));

    swap_to_dp(&mut planner);
    let result = planner.compute_best_route(&[], Some(DEPOT.point()));
    assert_eq!(result.err(), Some(RouteError::EmptyOrders));
}

#[test]
fn missing_start_location_is_rejected_by_both_strategies() {
    let mut planner = haversine_planner(20.0);
    let orders = scenario_orders();

    let result = planner.compute_best_route(&orders, None);
    assert_eq!(result.err(), Some(RouteError::MissingStartLocation));

    swap_to_dp(&mut planner);
    let result = planner.compute_best_route(&orders, None);
    assert_eq!(result.err(), Some(RouteError::MissingStartLocation));
}

#[test]
fn unvalidated_order_without_location_surfaces_as_route_error() {
    let planner = haversine_planner(20.0);
    let mut orders = scenario_orders();
    orders[1].restaurant = None;

    let result = planner.compute_best_route(&orders, Some(DEPOT.point()));
    assert_eq!(result.err(), Some(RouteError::MissingOrderLocation { index: 1 }));
}

// ============================================================================
// Order validation
// ============================================================================

#[test]
fn validate_rejects_empty_batch() {
    assert_eq!(validate_orders(&[]), Err(ValidationError::EmptyBatch));
}

#[test]
fn validate_rejects_blank_names() {
    let mut orders = scenario_orders();
    orders[0].restaurant_name = String::new();
    assert_eq!(
        validate_orders(&orders),
        Err(ValidationError::MissingName { index: 0 })
    );
}

#[test]
fn validate_rejects_missing_locations() {
    let mut orders = scenario_orders();
    orders[1].consumer = None;
    assert_eq!(
        validate_orders(&orders),
        Err(ValidationError::MissingLocation { index: 1 })
    );
}

#[test]
fn validate_rejects_non_positive_prep_time() {
    let mut orders = scenario_orders();
    orders[0].prep_minutes = -5.0;
    assert_eq!(
        validate_orders(&orders),
        Err(ValidationError::NonPositivePrepTime { index: 0 })
    );

    orders[0].prep_minutes = 0.0;
    assert_eq!(
        validate_orders(&orders),
        Err(ValidationError::NonPositivePrepTime { index: 0 })
    );
}

#[test]
fn validate_accepts_well_formed_batch() {
    assert_eq!(validate_orders(&scenario_orders()), Ok(()));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn orders_deserialize_from_json() {
    let json = r#"[
        {
            "consumer_name": "Aisha Bello",
            "restaurant_name": "Kanem Grill",
            "consumer": { "lat": 12.916, "lon": 12.594 },
            "restaurant": { "lat": 12.082, "lon": 13.270 },
            "prep_minutes": 10.0
        },
        {
            "consumer_name": "Bukar Modu",
            "restaurant_name": "Yerwa Kitchen",
            "consumer": { "lat": 12.937, "lon": 12.894 },
            "restaurant": { "lat": 12.982, "lon": 13.670 },
            "prep_minutes": 8.0
        }
    ]"#;

    let orders: Vec<Order> = serde_json::from_str(json).expect("well-formed orders");
    assert_eq!(orders, scenario_orders());
    assert_eq!(validate_orders(&orders), Ok(()));

    let planner = haversine_planner(20.0);
    let route = planner
        .compute_best_route(&orders, Some(GeoLocation::new(12.9249, 13.6205)))
        .expect("route");
    assert!(route.total_minutes > 0.0);
}

#[test]
fn routes_serialize_to_json() {
    let planner = haversine_planner(20.0);
    let orders = vec![order_between(RESTAURANTS[0], CONSUMERS[0], 10.0)];
    let route = planner
        .compute_best_route(&orders, Some(DEPOT.point()))
        .expect("route");

    let json = serde_json::to_value(&route).expect("serializable route");
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(2));
    assert!(json["total_minutes"].as_f64().unwrap() > 0.0);
}
