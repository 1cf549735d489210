//! Cheapest feasible insertion construction.
//!
//! # Algorithm
//!
//! All K routes start as depot→depot. Among every (unrouted node, route,
//! position) triple, pick the one with the smallest marginal cost
//!
//! ```text
//! d(prev, node) + d(node, next) - d(prev, next)
//! ```
//!
//! subject to the vehicle's remaining capacity, insert it, and repeat until
//! no unrouted node fits anywhere. Nodes that fit nowhere stay unrouted.
//! The scan order (ascending node, then vehicle, then position) combined
//! with strict improvement makes ties resolve to the lowest node index,
//! then the lowest vehicle index, so the result is deterministic.
//!
//! # Complexity
//!
//! O(n² · K · L) overall, L = route length.
//!
//! # Reference
//!
//! Mole, R.H. & Jameson, S.R. (1976). "A sequential route-building algorithm
//! employing a generalised savings criterion", *Operational Research
//! Quarterly* 27(2), 503-511.

use tracing::debug;

use crate::models::{RoutePlan, RoutingModel};

/// Builds an initial assignment by repeated cheapest feasible insertion.
///
/// # Examples
///
/// ```
/// use fleet_router::construction::cheapest_insertion;
/// use fleet_router::distance::DistanceMatrix;
/// use fleet_router::models::RoutingModel;
///
/// let matrix = DistanceMatrix::from_data(3, vec![0, 2, 5, 2, 0, 2, 5, 2, 0]).unwrap();
/// let model = RoutingModel::new(matrix, 1, 0, None, None).unwrap();
/// let plan = cheapest_insertion(&model);
/// assert_eq!(plan.unrouted().len(), 0);
/// assert_eq!(plan.num_assigned(), 2);
/// ```
pub fn cheapest_insertion(model: &RoutingModel) -> RoutePlan {
    let depot = model.depot();
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); model.num_vehicles()];
    let mut unrouted: Vec<usize> = (0..model.num_nodes()).filter(|&n| n != depot).collect();

    loop {
        let mut best: Option<(i64, usize, usize, usize)> = None; // (cost, node, route, pos)

        for &node in &unrouted {
            for (r, route) in routes.iter().enumerate() {
                if !model.is_feasible_insertion(r, route, node) {
                    continue;
                }
                for pos in 0..=route.len() {
                    let cost = insertion_cost(model, route, pos, node);
                    if best.is_none_or(|(c, _, _, _)| cost < c) {
                        best = Some((cost, node, r, pos));
                    }
                }
            }
        }

        match best {
            Some((_, node, r, pos)) => {
                routes[r].insert(pos, node);
                unrouted.retain(|&n| n != node);
            }
            None => break,
        }
    }

    debug!(
        assigned = routes.iter().map(|r| r.len()).sum::<usize>(),
        unrouted = unrouted.len(),
        "construction finished"
    );
    RoutePlan::new(routes, unrouted)
}

/// Marginal cost of inserting `node` at `pos` in `route`.
pub(crate) fn insertion_cost(
    model: &RoutingModel,
    route: &[usize],
    pos: usize,
    node: usize,
) -> i64 {
    let depot = model.depot();
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() { depot } else { route[pos] };
    model.arc_cost(prev, node) + model.arc_cost(node, next) - model.arc_cost(prev, next)
}

/// Cheapest feasible insertion point for `node` across all routes.
///
/// Returns `(route, pos, cost)`, or `None` if `node` fits nowhere. Used by
/// the search engine to re-try unrouted nodes opportunistically.
pub(crate) fn best_insertion(
    model: &RoutingModel,
    routes: &[Vec<usize>],
    node: usize,
) -> Option<(usize, usize, i64)> {
    let mut best: Option<(usize, usize, i64)> = None;
    for (r, route) in routes.iter().enumerate() {
        if !model.is_feasible_insertion(r, route, node) {
            continue;
        }
        for pos in 0..=route.len() {
            let cost = insertion_cost(model, route, pos, node);
            if best.is_none_or(|(_, _, c)| cost < c) {
                best = Some((r, pos, cost));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn line_model(num_vehicles: usize) -> RoutingModel {
        // Nodes on a line at x = 0, 1, 2, 3; depot at 0.
        let matrix = DistanceMatrix::from_rows(&[
            vec![0, 1, 2, 3],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![3, 2, 1, 0],
        ])
        .expect("valid");
        RoutingModel::new(matrix, num_vehicles, 0, None, None).expect("valid")
    }

    #[test]
    fn test_single_vehicle_walks_the_line() {
        let model = line_model(1);
        let plan = cheapest_insertion(&model);
        // Ties at equal marginal cost resolve to the earliest position, so
        // the line is built outward-in: [3, 2, 1]. Cost matches the optimal
        // sweep, 0->3->2->1->0 = 3 + 1 + 1 + 1.
        assert_eq!(plan.routes()[0], vec![3, 2, 1]);
        assert!(plan.unrouted().is_empty());
        assert_eq!(plan.cost(&model), 6);
    }

    #[test]
    fn test_deterministic() {
        let model = line_model(2);
        let a = cheapest_insertion(&model);
        let b = cheapest_insertion(&model);
        assert_eq!(a, b);
    }

    #[test]
    fn test_capacity_limits_routes() {
        let matrix = DistanceMatrix::from_rows(&[
            vec![0, 1, 2, 3],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![3, 2, 1, 0],
        ])
        .expect("valid");
        let model = RoutingModel::new(
            matrix,
            2,
            0,
            Some(vec![10, 10]),
            Some(vec![0, 5, 5, 5]),
        )
        .expect("valid");
        let plan = cheapest_insertion(&model);
        assert!(plan.unrouted().is_empty());
        for (r, route) in plan.routes().iter().enumerate() {
            assert!(model.route_load(route) <= model.capacity_of(r).expect("capacitated"));
        }
        assert_eq!(plan.num_assigned(), 3);
    }

    #[test]
    fn test_oversized_demands_left_unrouted() {
        let matrix = DistanceMatrix::from_data(3, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]).expect("valid");
        let model = RoutingModel::new(matrix, 1, 0, Some(vec![1]), Some(vec![0, 2, 2]))
            .expect("valid");
        let plan = cheapest_insertion(&model);
        assert_eq!(plan.unrouted(), &[1, 2]);
        assert_eq!(plan.num_assigned(), 0);
        assert_eq!(plan.cost(&model), 0);
    }

    #[test]
    fn test_insertion_cost_depot_edges() {
        let model = line_model(1);
        // Inserting node 2 into the empty route: 0->2->0 minus 0->0.
        assert_eq!(insertion_cost(&model, &[], 0, 2), 4);
        // Inserting node 2 between 1 and 3: d(1,2)+d(2,3)-d(1,3) = 1+1-2.
        assert_eq!(insertion_cost(&model, &[1, 3], 1, 2), 0);
    }

    #[test]
    fn test_best_insertion_respects_capacity() {
        let matrix = DistanceMatrix::from_data(3, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]).expect("valid");
        let model = RoutingModel::new(
            matrix,
            2,
            0,
            Some(vec![0, 5]),
            Some(vec![0, 3, 3]),
        )
        .expect("valid");
        // Vehicle 0 has zero capacity; everything must target vehicle 1.
        let found = best_insertion(&model, &[vec![], vec![]], 1).expect("fits vehicle 1");
        assert_eq!(found.0, 1);
        // With node 1 aboard, node 2 no longer fits anywhere.
        assert!(best_insertion(&model, &[vec![], vec![1]], 2).is_none());
    }

    #[test]
    fn test_depot_not_inserted() {
        let model = line_model(3);
        let plan = cheapest_insertion(&model);
        for route in plan.routes() {
            assert!(!route.contains(&0));
        }
    }
}
