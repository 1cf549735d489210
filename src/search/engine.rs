//! Guided local search driver.
//!
//! # Algorithm
//!
//! Best-improvement sweeps over the relocate, exchange, and 2-opt
//! neighborhoods. A move is accepted if it strictly decreases the raw cost
//! or the penalty-augmented cost. When a sweep finds no accepting move the
//! current solution is a raw-cost local optimum: the arcs it uses with the
//! highest utility `cost / (1 + penalty)` get their penalty incremented,
//! reshaping the augmented landscape, and the sweep is retried once. If even
//! then nothing accepts, the search has converged.
//!
//! The engine is anytime: the elapsed-time budget is polled at every sweep
//! boundary through the injected [`Clock`], and the best feasible plan seen
//! so far (most nodes covered, then cheapest) is what gets returned.
//! Unrouted nodes left over from construction are re-tried for cheapest
//! feasible insertion at the start of every sweep.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use std::time::Duration;

use tracing::debug;

use crate::construction::best_insertion;
use crate::models::{RoutePlan, RoutingModel};

use super::clock::Clock;
use super::exchange::best_exchange;
use super::moves::{self, Candidate};
use super::penalty::{derive_lambda, Penalties, SearchCost};
use super::relocate::best_relocate;
use super::two_opt::best_two_opt;

/// Time-budgeted guided local search over a route plan.
pub struct GuidedLocalSearch<'a, C: Clock> {
    model: &'a RoutingModel,
    clock: &'a C,
    time_limit: Duration,
    penalties: Penalties,
    lambda: i64,
}

impl<'a, C: Clock> GuidedLocalSearch<'a, C> {
    /// Creates an engine bound to one model, clock, and time budget.
    pub fn new(model: &'a RoutingModel, clock: &'a C, time_limit: Duration) -> Self {
        Self {
            model,
            clock,
            time_limit,
            penalties: Penalties::new(model.num_nodes()),
            lambda: 1,
        }
    }

    /// Improves `initial` until convergence or until the budget expires,
    /// returning the best plan observed.
    pub fn run(mut self, initial: RoutePlan) -> RoutePlan {
        let mut current = initial;
        self.lambda = derive_lambda(&current, self.model);
        self.insert_unrouted(&mut current);
        let mut best = current.clone();
        let mut sweeps: u64 = 0;

        loop {
            if self.clock.elapsed() >= self.time_limit {
                debug!(sweeps, "time budget exhausted");
                break;
            }

            if self.insert_unrouted(&mut current) && is_better(&current, &best, self.model) {
                best = current.clone();
            }

            let mut candidate = self.best_candidate(&current);
            if candidate.is_none() {
                // Raw-cost local optimum. Keep it if it is the best so far,
                // then penalize its heaviest arcs and rescan under the new
                // augmented landscape.
                if is_better(&current, &best, self.model) {
                    best = current.clone();
                }
                self.penalize(&current);
                candidate = self.best_candidate(&current);
            }

            match candidate {
                Some(c) => {
                    moves::apply(&mut current, &c.mv);
                    if is_better(&current, &best, self.model) {
                        best = current.clone();
                    }
                }
                None => {
                    debug!(sweeps, "search converged");
                    break;
                }
            }
            sweeps += 1;
        }

        best
    }

    /// Best accepting move across all three neighborhoods.
    fn best_candidate(&self, plan: &RoutePlan) -> Option<Candidate> {
        let cost = SearchCost::new(self.model, &self.penalties, self.lambda);
        let mut best: Option<Candidate> = None;
        for found in [
            best_relocate(plan, self.model, &cost),
            best_exchange(plan, self.model, &cost),
            best_two_opt(plan, self.model, &cost),
        ]
        .into_iter()
        .flatten()
        {
            if best.as_ref().is_none_or(|b| found.better_than(b)) {
                best = Some(found);
            }
        }
        best
    }

    /// Re-tries cheapest feasible insertion for every unrouted node.
    /// Returns `true` if coverage improved.
    fn insert_unrouted(&self, plan: &mut RoutePlan) -> bool {
        let mut inserted_any = false;
        loop {
            let mut found = None;
            for &node in plan.unrouted() {
                if let Some((r, pos, _)) = best_insertion(self.model, plan.routes(), node) {
                    found = Some((node, r, pos));
                    break;
                }
            }
            match found {
                Some((node, r, pos)) => {
                    plan.routes_mut()[r].insert(pos, node);
                    plan.mark_routed(node);
                    inserted_any = true;
                }
                None => break,
            }
        }
        inserted_any
    }

    /// Increments the penalty of every maximum-utility arc in the plan.
    fn penalize(&mut self, plan: &RoutePlan) {
        let depot = self.model.depot();
        let mut arcs: Vec<(usize, usize)> = Vec::new();
        for route in plan.routes().iter().filter(|r| !r.is_empty()) {
            arcs.push((depot, route[0]));
            for pair in route.windows(2) {
                arcs.push((pair[0], pair[1]));
            }
            arcs.push((route[route.len() - 1], depot));
        }
        if arcs.is_empty() {
            return;
        }

        // utility(a) = cost(a) / (1 + penalty(a)), compared exactly by
        // cross-multiplication to stay in integers.
        let weights: Vec<(i64, i64)> = arcs
            .iter()
            .map(|&(i, j)| (self.model.arc_cost(i, j), 1 + self.penalties.get(i, j)))
            .collect();
        let mut max = weights[0];
        for &w in &weights[1..] {
            if w.0 * max.1 > max.0 * w.1 {
                max = w;
            }
        }
        let mut penalized = 0usize;
        for (&(i, j), &w) in arcs.iter().zip(&weights) {
            if w.0 * max.1 == max.0 * w.1 {
                self.penalties.increment(i, j);
                penalized += 1;
            }
        }
        debug!(penalized, "penalized maximum-utility arcs");
    }
}

/// Coverage first, then raw cost.
fn is_better(a: &RoutePlan, b: &RoutePlan, model: &RoutingModel) -> bool {
    (a.unrouted().len(), a.cost(model)) < (b.unrouted().len(), b.cost(model))
}
