//! Named locations around the Lake Chad basin for routing scenarios.
//!
//! The depot and the first two restaurant/consumer pairs are the reference
//! coordinates used by the distance and end-to-end scenario tests.

use courier_planner::order::{GeoLocation, Order};

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct NamedLocation {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl NamedLocation {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn point(&self) -> GeoLocation {
        GeoLocation::new(self.lat, self.lon)
    }
}

/// Courier start location.
pub const DEPOT: NamedLocation = NamedLocation::new("Kukawa depot", 12.9249, 13.6205);

pub const RESTAURANTS: &[NamedLocation] = &[
    NamedLocation::new("Kanem Grill", 12.082, 13.270),
    NamedLocation::new("Yerwa Kitchen", 12.982, 13.670),
    NamedLocation::new("Komadugu Fish House", 12.655, 13.305),
    NamedLocation::new("Sahel Suya Spot", 12.480, 13.110),
    NamedLocation::new("Dargala Cafe", 12.210, 13.505),
    NamedLocation::new("Baga Road Canteen", 12.840, 13.880),
];

pub const CONSUMERS: &[NamedLocation] = &[
    NamedLocation::new("Aisha Bello", 12.916, 12.594),
    NamedLocation::new("Bukar Modu", 12.937, 12.894),
    NamedLocation::new("Falmata Ali", 12.760, 13.420),
    NamedLocation::new("Musa Goni", 12.340, 13.640),
    NamedLocation::new("Hauwa Tijani", 12.555, 12.980),
    NamedLocation::new("Ibrahim Shettima", 12.700, 13.760),
];

/// An order from a restaurant to a consumer with the given prep time.
pub fn order_between(restaurant: NamedLocation, consumer: NamedLocation, prep_minutes: f64) -> Order {
    Order {
        consumer_name: consumer.name.to_string(),
        restaurant_name: restaurant.name.to_string(),
        consumer: Some(consumer.point()),
        restaurant: Some(restaurant.point()),
        prep_minutes,
    }
}

/// The first `count` restaurant/consumer pairs, with staggered prep times.
pub fn sample_orders(count: usize) -> Vec<Order> {
    assert!(count <= RESTAURANTS.len());
    (0..count)
        .map(|i| order_between(RESTAURANTS[i], CONSUMERS[i], 5.0 + 3.0 * i as f64))
        .collect()
}

/// The two-order scenario the step-sequence assertions are written against:
/// order A (Kanem Grill -> Aisha Bello, prep 10) and order B
/// (Yerwa Kitchen -> Bukar Modu, prep 8).
pub fn scenario_orders() -> Vec<Order> {
    vec![
        order_between(RESTAURANTS[0], CONSUMERS[0], 10.0),
        order_between(RESTAURANTS[1], CONSUMERS[1], 8.0),
    ]
}
