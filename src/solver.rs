//! Solve orchestration: construction, guided search, extraction.

use std::time::Duration;

use tracing::{debug, info};

use crate::construction::cheapest_insertion;
use crate::models::{Route, RoutePlan, RoutingModel, Solution};
use crate::search::{Clock, GuidedLocalSearch, SystemClock};

/// Solver parameters.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Wall-clock budget for the whole solve.
    pub time_limit: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
        }
    }
}

/// Solves the model within the configured time budget.
///
/// Always produces a [`Solution`]; nodes that could not be feasibly routed
/// are reported in [`Solution::unvisited`], never as an error.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_router::distance::DistanceMatrix;
/// use fleet_router::models::RoutingModel;
/// use fleet_router::solver::{solve, SolverConfig};
///
/// let matrix = DistanceMatrix::from_data(2, vec![0, 40, 40, 0]).unwrap();
/// let model = RoutingModel::new(matrix, 1, 0, None, None).unwrap();
/// let config = SolverConfig { time_limit: Duration::from_secs(1) };
///
/// let solution = solve(&model, &config);
/// assert_eq!(solution.routes()[0].stops(), &[0, 1, 0]);
/// assert_eq!(solution.total_distance(), 80);
/// assert!(solution.is_complete());
/// ```
pub fn solve(model: &RoutingModel, config: &SolverConfig) -> Solution {
    let clock = SystemClock::start();
    solve_with_clock(model, config, &clock)
}

/// [`solve`] with an injected clock, for deterministic tests.
pub fn solve_with_clock<C: Clock>(
    model: &RoutingModel,
    config: &SolverConfig,
    clock: &C,
) -> Solution {
    info!(
        nodes = model.num_nodes(),
        vehicles = model.num_vehicles(),
        capacitated = model.has_capacity(),
        "starting solve"
    );

    let initial = cheapest_insertion(model);
    debug!(
        cost = initial.cost(model),
        unrouted = initial.unrouted().len(),
        "construction done"
    );

    let improved = GuidedLocalSearch::new(model, clock, config.time_limit).run(initial);
    let solution = extract_solution(model, &improved);

    info!(
        total_distance = solution.total_distance(),
        unvisited = solution.unvisited().len(),
        "solve finished"
    );
    solution
}

/// Renders the working plan into the public solution shape.
///
/// Each vehicle's route is walked depot to depot, summing arc costs; an
/// unused vehicle yields `[depot, depot]` with distance 0. Never fails.
pub fn extract_solution(model: &RoutingModel, plan: &RoutePlan) -> Solution {
    let depot = model.depot();
    let mut routes = Vec::with_capacity(model.num_vehicles());
    let mut total_distance = 0;

    for (vehicle, customers) in plan.routes().iter().enumerate() {
        let mut stops = Vec::with_capacity(customers.len() + 2);
        stops.push(depot);
        stops.extend_from_slice(customers);
        stops.push(depot);

        let mut distance = 0;
        for pair in stops.windows(2) {
            distance += model.arc_cost(pair[0], pair[1]);
        }
        total_distance += distance;
        routes.push(Route::new(vehicle, stops, distance));
    }

    Solution::new(routes, total_distance, plan.unrouted().to_vec())
}
