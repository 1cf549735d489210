//! Intra-route 2-opt operator: reverse a segment of one route.
//!
//! # Algorithm
//!
//! For each route and each segment `[start..=end]`, compute the cost change
//! of reversing it. The two boundary arcs are replaced and every internal
//! arc flips direction; the internal arcs are re-summed rather than assumed
//! free, so the operator stays correct on asymmetric matrices.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::models::{RoutePlan, RoutingModel};

use super::moves::{Candidate, Move};
use super::penalty::SearchCost;

/// Finds the best accepting 2-opt move, or `None` if none accepts.
pub(crate) fn best_two_opt(
    plan: &RoutePlan,
    model: &RoutingModel,
    cost: &SearchCost<'_>,
) -> Option<Candidate> {
    let depot = model.depot();
    let mut best: Option<Candidate> = None;

    for (r, route) in plan.routes().iter().enumerate() {
        if route.len() < 2 {
            continue;
        }
        for start in 0..route.len() - 1 {
            for end in start + 1..route.len() {
                let candidate = Candidate {
                    mv: Move::TwoOpt { route: r, start, end },
                    raw_delta: reversal_delta(route, start, end, depot, &|i, j| cost.raw(i, j)),
                    aug_delta: reversal_delta(route, start, end, depot, &|i, j| {
                        cost.augmented(i, j)
                    }),
                };
                if candidate.accepts() && best.as_ref().is_none_or(|b| candidate.better_than(b)) {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}

/// Cost change from reversing `route[start..=end]`.
fn reversal_delta(
    route: &[usize],
    start: usize,
    end: usize,
    depot: usize,
    arc: &dyn Fn(usize, usize) -> i64,
) -> i64 {
    let prev = if start == 0 { depot } else { route[start - 1] };
    let next = if end == route.len() - 1 {
        depot
    } else {
        route[end + 1]
    };

    let mut old = arc(prev, route[start]) + arc(route[end], next);
    let mut new = arc(prev, route[end]) + arc(route[start], next);
    for k in start..end {
        old += arc(route[k], route[k + 1]);
        new += arc(route[k + 1], route[k]);
    }
    new - old
}
