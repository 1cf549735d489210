//! Route type.

/// An ordered walk assigned to a single vehicle.
///
/// Stops begin and end at the depot. An unused vehicle has the two-stop
/// route `[depot, depot]` with distance 0.
///
/// # Examples
///
/// ```
/// use fleet_router::models::Route;
///
/// let route = Route::new(0, vec![0, 2, 1, 0], 420);
/// assert_eq!(route.vehicle(), 0);
/// assert_eq!(route.customers(), &[2, 1]);
/// assert_eq!(route.distance(), 420);
/// assert!(!route.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle: usize,
    stops: Vec<usize>,
    distance: i64,
}

impl Route {
    /// Creates a route from a depot-bounded stop sequence.
    pub fn new(vehicle: usize, stops: Vec<usize>, distance: i64) -> Self {
        Self {
            vehicle,
            stops,
            distance,
        }
    }

    /// Index of the vehicle driving this route.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// All stops in visit order, including the depot at both ends.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// The customer stops, excluding the depot endpoints.
    pub fn customers(&self) -> &[usize] {
        if self.stops.len() <= 2 {
            &[]
        } else {
            &self.stops[1..self.stops.len() - 1]
        }
    }

    /// Number of customers served by this route.
    pub fn num_customers(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` if the vehicle serves no customers.
    pub fn is_empty(&self) -> bool {
        self.stops.len() <= 2
    }

    /// Total distance traversed, in meters.
    pub fn distance(&self) -> i64 {
        self.distance
    }
}
