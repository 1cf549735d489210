//! Exchange operator: swap two nodes between positions or routes.
//!
//! # Algorithm
//!
//! For every ordered pair of positions (scanned once, lexicographically),
//! evaluate swapping the two nodes. Cross-route swaps use O(1) neighborhood
//! deltas and must keep both vehicles within capacity; same-route swaps
//! change no load and are re-costed in full, since the two neighborhoods
//! overlap when the nodes are adjacent.
//!
//! # Reference
//!
//! Waters, C.D.J. (1987). "A solution procedure for the vehicle-scheduling
//! problem based on iterative route improvement", *Journal of the
//! Operational Research Society* 38(9), 833-839.

use crate::models::{RoutePlan, RoutingModel};

use super::moves::{route_cost, Candidate, Move};
use super::penalty::SearchCost;

/// Finds the best accepting exchange move, or `None` if none accepts.
pub(crate) fn best_exchange(
    plan: &RoutePlan,
    model: &RoutingModel,
    cost: &SearchCost<'_>,
) -> Option<Candidate> {
    let routes = plan.routes();
    let depot = model.depot();
    let mut best: Option<Candidate> = None;

    for (first_r, first_route) in routes.iter().enumerate() {
        for first_pos in 0..first_route.len() {
            for (second_r, second_route) in routes.iter().enumerate().skip(first_r) {
                let start = if second_r == first_r { first_pos + 1 } else { 0 };
                for second_pos in start..second_route.len() {
                    let candidate = if first_r == second_r {
                        same_route_swap(first_route, first_r, first_pos, second_pos, depot, cost)
                    } else {
                        cross_route_swap(
                            model,
                            (first_r, first_route.as_slice(), first_pos),
                            (second_r, second_route.as_slice(), second_pos),
                            depot,
                            cost,
                        )
                    };
                    if let Some(candidate) = candidate {
                        if candidate.accepts()
                            && best.as_ref().is_none_or(|b| candidate.better_than(b))
                        {
                            best = Some(candidate);
                        }
                    }
                }
            }
        }
    }

    best
}

fn same_route_swap(
    route: &[usize],
    r: usize,
    first_pos: usize,
    second_pos: usize,
    depot: usize,
    cost: &SearchCost<'_>,
) -> Option<Candidate> {
    let mut swapped = route.to_vec();
    swapped.swap(first_pos, second_pos);
    Some(Candidate {
        mv: Move::Exchange {
            first_route: r,
            first_pos,
            second_route: r,
            second_pos,
        },
        raw_delta: route_cost(&swapped, depot, |i, j| cost.raw(i, j))
            - route_cost(route, depot, |i, j| cost.raw(i, j)),
        aug_delta: route_cost(&swapped, depot, |i, j| cost.augmented(i, j))
            - route_cost(route, depot, |i, j| cost.augmented(i, j)),
    })
}

fn cross_route_swap(
    model: &RoutingModel,
    (first_r, first_route, first_pos): (usize, &[usize], usize),
    (second_r, second_route, second_pos): (usize, &[usize], usize),
    depot: usize,
    cost: &SearchCost<'_>,
) -> Option<Candidate> {
    let a = first_route[first_pos];
    let b = second_route[second_pos];

    if !swap_fits(model, first_r, first_route, a, b)
        || !swap_fits(model, second_r, second_route, b, a)
    {
        return None;
    }

    let raw = replace_delta(first_route, first_pos, b, depot, &|i, j| cost.raw(i, j))
        + replace_delta(second_route, second_pos, a, depot, &|i, j| cost.raw(i, j));
    let aug = replace_delta(first_route, first_pos, b, depot, &|i, j| cost.augmented(i, j))
        + replace_delta(second_route, second_pos, a, depot, &|i, j| {
            cost.augmented(i, j)
        });

    Some(Candidate {
        mv: Move::Exchange {
            first_route: first_r,
            first_pos,
            second_route: second_r,
            second_pos,
        },
        raw_delta: raw,
        aug_delta: aug,
    })
}

/// Whether a route stays within capacity after trading `out` for `in_`.
fn swap_fits(model: &RoutingModel, vehicle: usize, route: &[usize], out: usize, in_: usize) -> bool {
    match model.capacity_of(vehicle) {
        Some(capacity) => {
            model.route_load(route) - model.demand_of(out) + model.demand_of(in_) <= capacity
        }
        None => true,
    }
}

/// Cost change from substituting `node` at `pos` while neighbors stay put.
fn replace_delta(
    route: &[usize],
    pos: usize,
    node: usize,
    depot: usize,
    arc: &dyn Fn(usize, usize) -> i64,
) -> i64 {
    let old = route[pos];
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        depot
    } else {
        route[pos + 1]
    };
    arc(prev, node) + arc(node, next) - arc(prev, old) - arc(old, next)
}
