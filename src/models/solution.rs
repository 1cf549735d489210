//! Solution type.

use super::Route;

/// A complete result of one solve call.
///
/// Always holds one route per vehicle (possibly empty), the total distance
/// across all routes, and the indices of nodes that could not be assigned.
/// Infeasibility is data, not an error: a solution with unvisited nodes is
/// still the best assignment found.
///
/// # Examples
///
/// ```
/// use fleet_router::models::{Route, Solution};
///
/// let sol = Solution::new(vec![Route::new(0, vec![0, 1, 0], 10)], 10, vec![2]);
/// assert_eq!(sol.total_distance(), 10);
/// assert!(!sol.is_complete());
/// assert_eq!(sol.unvisited(), &[2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    total_distance: i64,
    unvisited: Vec<usize>,
}

impl Solution {
    /// Creates a solution from extracted routes.
    pub fn new(routes: Vec<Route>, total_distance: i64, unvisited: Vec<usize>) -> Self {
        Self {
            routes,
            total_distance,
            unvisited,
        }
    }

    /// One route per vehicle, in vehicle order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Sum of all route distances, in meters.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Node indices left out of every route, in ascending order.
    pub fn unvisited(&self) -> &[usize] {
        &self.unvisited
    }

    /// Returns `true` if every non-depot node was assigned to a route.
    pub fn is_complete(&self) -> bool {
        self.unvisited.is_empty()
    }

    /// Total number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.num_customers()).sum()
    }
}
