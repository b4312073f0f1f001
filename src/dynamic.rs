//! Bitmask dynamic-programming route search.

use tracing::debug;

use crate::order::{GeoLocation, Order, Route};
use crate::traits::{RouteError, RouteStrategy};
use crate::travel::{MAX_REASONABLE_ROUTE_MINUTES, TravelMatrix, TravelTimeCalculator};

/// Solves the same problem as [`crate::brute_force::BruteForceStrategy`] in
/// `O(2^n * n^2)` instead of `O(n!)`.
///
/// `dp[mask][last]` is the minimal remaining time to deliver every order
/// outside `mask`, given the courier just delivered order `last`. That
/// value does not depend on how `mask` was reached, which is the optimal
/// substructure the table exploits. Single-threaded: the fill order is the
/// correctness argument, so there is nothing to parallelize at the target
/// scale.
#[derive(Debug, Clone)]
pub struct DynamicProgrammingStrategy {
    travel: TravelTimeCalculator,
    max_route_minutes: f64,
}

impl DynamicProgrammingStrategy {
    pub fn new(travel: TravelTimeCalculator) -> Self {
        Self {
            travel,
            max_route_minutes: MAX_REASONABLE_ROUTE_MINUTES,
        }
    }

    /// Replaces the feasibility ceiling, mainly for tests.
    pub fn with_ceiling(mut self, minutes: f64) -> Self {
        self.max_route_minutes = minutes;
        self
    }
}

impl RouteStrategy for DynamicProgrammingStrategy {
    fn calculate_route(&self, orders: &[Order], start: GeoLocation) -> Result<Route, RouteError> {
        if orders.is_empty() {
            return Err(RouteError::EmptyOrders);
        }

        let matrix = TravelMatrix::build(orders, start, &self.travel)?;
        let n = orders.len();
        let full = (1usize << n) - 1;

        // Iterative fill in decreasing mask order: every dependency
        // `mask | bit` is numerically larger than `mask`, so it is already
        // final when read. `dp[full][..]` stays at the 0.0 base case.
        let mut dp = vec![vec![0.0_f64; n]; full + 1];
        for mask in (1..full).rev() {
            for last in 0..n {
                if mask & (1 << last) == 0 {
                    continue;
                }
                let mut best = f64::INFINITY;
                for next in 0..n {
                    if mask & (1 << next) != 0 {
                        continue;
                    }
                    let cost = dp[mask | (1 << next)][next]
                        + matrix.arrival(Some(last), next)
                        + matrix.handoff(next);
                    if cost < best {
                        best = cost;
                    }
                }
                dp[mask][last] = best;
            }
        }

        // Try each candidate first order; the minimum fixes both the
        // optimal total and where the route begins.
        let mut first = None;
        let mut best_total = f64::INFINITY;
        for i in 0..n {
            let total = dp[1 << i][i] + matrix.arrival(None, i) + matrix.handoff(i);
            if total < best_total {
                best_total = total;
                first = Some(i);
            }
        }
        let Some(first) = first else {
            return Err(RouteError::RouteImpossible {
                ceiling_minutes: self.max_route_minutes,
            });
        };

        debug!(
            orders = n,
            states = (full + 1) * n,
            total_minutes = best_total,
            "dp table filled"
        );

        if best_total > self.max_route_minutes {
            return Err(RouteError::RouteImpossible {
                ceiling_minutes: self.max_route_minutes,
            });
        }

        // Greedy reconstruction: re-derive each next order by re-evaluating
        // the recurrence instead of storing backpointers.
        let mut visiting = Vec::with_capacity(n);
        visiting.push(first);
        let mut visited = 1usize << first;
        let mut last = first;
        while visiting.len() < n {
            let mut choice: Option<(usize, f64)> = None;
            for next in 0..n {
                if visited & (1 << next) != 0 {
                    continue;
                }
                let cost = dp[visited | (1 << next)][next]
                    + matrix.arrival(Some(last), next)
                    + matrix.handoff(next);
                if choice.is_none_or(|(_, best)| cost < best) {
                    choice = Some((next, cost));
                }
            }
            // The unvisited set is non-empty here, so with a fully filled
            // table a minimum always exists.
            let Some((next, _)) = choice else { break };
            visiting.push(next);
            visited |= 1 << next;
            last = next;
        }

        Ok(Route {
            total_minutes: best_total,
            steps: matrix.steps_for(orders, &visiting),
        })
    }
}
