//! Exhaustive route search across a fixed worker pool.

use std::sync::mpsc;
use std::thread;

use tracing::{debug, trace};

use crate::order::{GeoLocation, Order, Route};
use crate::traits::{RouteError, RouteStrategy};
use crate::travel::{MAX_REASONABLE_ROUTE_MINUTES, TravelMatrix, TravelTimeCalculator};

/// Size of the search worker pool. A tuning constant, deliberately
/// independent of the order count.
const BRUTE_FORCE_WORKERS: usize = 5;

/// Evaluates every permutation of the order list and keeps the fastest
/// feasible route.
///
/// The permutation rank space `0..n!` is split into contiguous per-worker
/// ranges; each worker decodes its first permutation from its starting rank
/// and then steps lexicographically, sending every feasible candidate into
/// a shared channel. The channel closes once the last worker's sender
/// drops, which is the sole signal that lets the reducing loop on the
/// calling thread terminate.
///
/// Factorial in the order count; intended for single-digit batches. The
/// dynamic-programming strategy covers larger ones.
#[derive(Debug, Clone)]
pub struct BruteForceStrategy {
    travel: TravelTimeCalculator,
    max_route_minutes: f64,
}

impl BruteForceStrategy {
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

struct Candidate {
    total_minutes: f64,
    visiting: Vec<usize>,
}

impl RouteStrategy for BruteForceStrategy {
    fn calculate_route(&self, orders: &[Order], start: GeoLocation) -> Result<Route, RouteError> {
        if orders.is_empty() {
            return Err(RouteError::EmptyOrders);
        }

        let matrix = TravelMatrix::build(orders, start, &self.travel)?;
        let n = orders.len();
        let permutations = factorial(n);
        debug!(
            orders = n,
            permutations = %permutations,
            workers = BRUTE_FORCE_WORKERS,
            "starting exhaustive search"
        );

        // Sized to the permutation count so producers never block on the
        // reducer.
        let capacity = usize::try_from(permutations).unwrap_or(usize::MAX);
        let (tx, rx) = mpsc::sync_channel::<Candidate>(capacity);
        let ceiling = self.max_route_minutes;

        let best = thread::scope(|scope| {
            for (worker, range) in rank_ranges(permutations, BRUTE_FORCE_WORKERS)
                .into_iter()
                .enumerate()
            {
                if range.start >= range.end {
                    continue;
                }
                let tx = tx.clone();
                let matrix = &matrix;
                scope.spawn(move || {
                    trace!(worker, first = %range.start, end = %range.end, "worker range");
                    let mut visiting = nth_permutation(range.start, n);
                    let mut rank = range.start;
                    while rank < range.end {
                        if let Some(total_minutes) = walk_route(matrix, &visiting, ceiling) {
                            // send only fails once the receiver is gone, and
                            // the reducer below outlives every worker
                            let _ = tx.send(Candidate {
                                total_minutes,
                                visiting: visiting.clone(),
                            });
                        }
                        rank += 1;
                        if !next_permutation(&mut visiting) {
                            break;
                        }
                    }
                });
            }
            // Workers hold clones; dropping the original sender means the
            // receive loop ends exactly when the last worker finishes.
            drop(tx);

            let mut best: Option<Candidate> = None;
            for candidate in rx {
                if best
                    .as_ref()
                    .is_none_or(|current| candidate.total_minutes < current.total_minutes)
                {
                    best = Some(candidate);
                }
            }
            best
        });

        match best {
            Some(candidate) => {
                debug!(total_minutes = candidate.total_minutes, "exhaustive search complete");
                Ok(Route {
                    total_minutes: candidate.total_minutes,
                    steps: matrix.steps_for(orders, &candidate.visiting),
                })
            }
            None => Err(RouteError::RouteImpossible {
                ceiling_minutes: self.max_route_minutes,
            }),
        }
    }
}

/// Accumulates one visiting order leg by leg: arrive at the restaurant,
/// wait out the prep, deliver. Returns `None` the moment the running total
/// crosses the ceiling.
fn walk_route(matrix: &TravelMatrix, visiting: &[usize], ceiling: f64) -> Option<f64> {
    let mut total = 0.0;
    let mut prev = None;
    for &next in visiting {
        total += matrix.arrival(prev, next);
        if total > ceiling {
            return None;
        }
        total += matrix.handoff(next);
        if total > ceiling {
            return None;
        }
        prev = Some(next);
    }
    Some(total)
}

fn factorial(n: usize) -> u128 {
    (1..=n as u128).product()
}

#[derive(Debug, Clone, Copy)]
struct RankRange {
    start: u128,
    end: u128,
}

/// Splits `0..total` into `workers` contiguous chunks; the leading chunks
/// absorb the remainder, so sizes differ by at most one.
fn rank_ranges(total: u128, workers: usize) -> Vec<RankRange> {
    let chunk = total / workers as u128;
    let remainder = total % workers as u128;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers as u128 {
        let len = chunk + u128::from(worker < remainder);
        ranges.push(RankRange {
            start,
            end: start + len,
        });
        start += len;
    }
    ranges
}

/// Decodes the lexicographically `rank`-th permutation of `0..n` via the
/// factorial number system.
fn nth_permutation(mut rank: u128, n: usize) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut perm = Vec::with_capacity(n);
    for remaining in (1..=n).rev() {
        let block = factorial(remaining - 1);
        let index = (rank / block) as usize;
        rank %= block;
        perm.push(pool.remove(index));
    }
    perm
}

/// Advances `perm` to its lexicographic successor in place. Returns `false`
/// once `perm` is the final (descending) permutation.
fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    let mut pivot = perm.len() - 1;
    while pivot > 0 && perm[pivot - 1] >= perm[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }
    let mut swap = perm.len() - 1;
    while perm[swap] <= perm[pivot - 1] {
        swap -= 1;
    }
    perm.swap(pivot - 1, swap);
    perm[pivot..].reverse();
    true
}
