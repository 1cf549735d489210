//! Relocate operator: move one node to a different position or route.
//!
//! # Algorithm
//!
//! For every routed node, evaluate moving it to every other position in
//! every route. Cross-route moves use O(1) removal/insertion arc deltas and
//! must pass the destination vehicle's capacity check; same-route moves
//! change no load and are evaluated by re-costing the affected route, which
//! stays correct for asymmetric matrices.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::models::{RoutePlan, RoutingModel};

use super::moves::{route_cost, Candidate, Move};
use super::penalty::SearchCost;

/// Finds the best accepting relocate move, or `None` if none accepts.
pub(crate) fn best_relocate(
    plan: &RoutePlan,
    model: &RoutingModel,
    cost: &SearchCost<'_>,
) -> Option<Candidate> {
    let routes = plan.routes();
    let depot = model.depot();
    let mut best: Option<Candidate> = None;

    for (from_r, from_route) in routes.iter().enumerate() {
        for from_pos in 0..from_route.len() {
            let node = from_route[from_pos];
            let raw_removal = removal_delta(from_route, from_pos, depot, &|i, j| cost.raw(i, j));
            let aug_removal =
                removal_delta(from_route, from_pos, depot, &|i, j| cost.augmented(i, j));

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r {
                    // Repositioning within the same route: simulate and
                    // re-cost, since removal shifts every later index.
                    let mut remaining = from_route.clone();
                    remaining.remove(from_pos);
                    let old_raw = route_cost(from_route, depot, |i, j| cost.raw(i, j));
                    let old_aug = route_cost(from_route, depot, |i, j| cost.augmented(i, j));
                    for to_pos in 0..=remaining.len() {
                        if to_pos == from_pos {
                            continue;
                        }
                        let mut next = remaining.clone();
                        next.insert(to_pos, node);
                        let candidate = Candidate {
                            mv: Move::Relocate {
                                from_route: from_r,
                                from_pos,
                                to_route: to_r,
                                to_pos,
                            },
                            raw_delta: route_cost(&next, depot, |i, j| cost.raw(i, j)) - old_raw,
                            aug_delta: route_cost(&next, depot, |i, j| cost.augmented(i, j))
                                - old_aug,
                        };
                        consider(&mut best, candidate);
                    }
                } else {
                    if !model.is_feasible_insertion(to_r, to_route, node) {
                        continue;
                    }
                    for to_pos in 0..=to_route.len() {
                        let candidate = Candidate {
                            mv: Move::Relocate {
                                from_route: from_r,
                                from_pos,
                                to_route: to_r,
                                to_pos,
                            },
                            raw_delta: raw_removal
                                + insertion_delta(to_route, to_pos, node, depot, &|i, j| {
                                    cost.raw(i, j)
                                }),
                            aug_delta: aug_removal
                                + insertion_delta(to_route, to_pos, node, depot, &|i, j| {
                                    cost.augmented(i, j)
                                }),
                        };
                        consider(&mut best, candidate);
                    }
                }
            }
        }
    }

    best
}

fn consider(best: &mut Option<Candidate>, candidate: Candidate) {
    if candidate.accepts() && best.as_ref().is_none_or(|b| candidate.better_than(b)) {
        *best = Some(candidate);
    }
}

/// Cost change from removing the node at `pos`: the bypass arc replaces the
/// two arcs through it.
fn removal_delta(
    route: &[usize],
    pos: usize,
    depot: usize,
    arc: &dyn Fn(usize, usize) -> i64,
) -> i64 {
    let node = route[pos];
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        depot
    } else {
        route[pos + 1]
    };
    arc(prev, next) - arc(prev, node) - arc(node, next)
}

/// Cost change from inserting `node` at `pos`.
fn insertion_delta(
    route: &[usize],
    pos: usize,
    node: usize,
    depot: usize,
    arc: &dyn Fn(usize, usize) -> i64,
) -> i64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() { depot } else { route[pos] };
    arc(prev, node) + arc(node, next) - arc(prev, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::search::moves::apply;
    use crate::search::penalty::Penalties;

    fn line_model(num_vehicles: usize) -> RoutingModel {
        let matrix = DistanceMatrix::from_rows(&[
            vec![0, 1, 2, 3],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![3, 2, 1, 0],
        ])
        .expect("valid");
        RoutingModel::new(matrix, num_vehicles, 0, None, None).expect("valid")
    }

    fn scan(model: &RoutingModel, plan: &RoutePlan) -> Option<Candidate> {
        let penalties = Penalties::new(model.num_nodes());
        let cost = SearchCost::new(model, &penalties, 1);
        best_relocate(plan, model, &cost)
    }

    #[test]
    fn test_relocate_merges_detour() {
        let model = line_model(2);
        // Node 2 stranded alone on vehicle 1 costs an extra round trip.
        let plan = RoutePlan::new(vec![vec![1, 3], vec![2]], vec![]);
        let found = scan(&model, &plan).expect("improvement exists");
        assert!(found.raw_delta < 0);

        let mut improved = plan.clone();
        apply(&mut improved, &found.mv);
        assert!(improved.cost(&model) < plan.cost(&model));
    }

    #[test]
    fn test_relocate_none_at_optimum() {
        let model = line_model(1);
        let plan = RoutePlan::new(vec![vec![1, 2, 3]], vec![]);
        assert!(scan(&model, &plan).is_none());
    }

    #[test]
    fn test_relocate_same_route_reorders() {
        let model = line_model(1);
        // 0->2->1->3->0 = 2 + 1 + 2 + 3 = 8; optimum 1,2,3 costs 6.
        let plan = RoutePlan::new(vec![vec![2, 1, 3]], vec![]);
        let found = scan(&model, &plan).expect("improvement exists");
        let mut improved = plan.clone();
        apply(&mut improved, &found.mv);
        assert!(improved.cost(&model) < 8);
    }

    #[test]
    fn test_relocate_respects_capacity() {
        let matrix = DistanceMatrix::from_rows(&[
            vec![0, 1, 2, 3],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![3, 2, 1, 0],
        ])
        .expect("valid");
        // Each vehicle can hold exactly one unit-demand node; no relocate is
        // feasible even though merging would cut distance.
        let model = RoutingModel::new(
            matrix,
            3,
            0,
            Some(vec![1, 1, 1]),
            Some(vec![0, 1, 1, 1]),
        )
        .expect("valid");
        let plan = RoutePlan::new(vec![vec![1], vec![2], vec![3]], vec![]);
        assert!(scan(&model, &plan).is_none());
    }

    #[test]
    fn test_removal_and_insertion_deltas_cancel() {
        let model = line_model(1);
        let arc = |i: usize, j: usize| model.arc_cost(i, j);
        let route = vec![1, 2, 3];
        // Removing node 2 then reinserting it at the same spot is a wash.
        let removal = removal_delta(&route, 1, 0, &arc);
        let remaining = vec![1, 3];
        let insertion = insertion_delta(&remaining, 1, 2, 0, &arc);
        assert_eq!(removal + insertion, 0);
    }
}
