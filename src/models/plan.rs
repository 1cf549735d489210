//! Working route assignment mutated during construction and search.

use super::RoutingModel;

/// The mutable per-vehicle route state the solver operates on.
///
/// Each route holds only customer indices; the depot endpoints are implicit
/// and re-attached at extraction. `unrouted` lists the nodes not currently
/// assigned to any route, kept in ascending order for deterministic scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    routes: Vec<Vec<usize>>,
    unrouted: Vec<usize>,
}

impl RoutePlan {
    /// Creates a plan from route sequences and leftover nodes.
    pub fn new(routes: Vec<Vec<usize>>, mut unrouted: Vec<usize>) -> Self {
        unrouted.sort_unstable();
        Self { routes, unrouted }
    }

    /// Customer sequences, one per vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Mutable access for move application.
    pub fn routes_mut(&mut self) -> &mut [Vec<usize>] {
        &mut self.routes
    }

    /// Nodes not assigned to any route, ascending.
    pub fn unrouted(&self) -> &[usize] {
        &self.unrouted
    }

    /// Moves `node` out of the unrouted set after a successful insertion.
    pub fn mark_routed(&mut self, node: usize) {
        self.unrouted.retain(|&n| n != node);
    }

    /// Total number of customers currently assigned to routes.
    pub fn num_assigned(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Total raw cost of the plan: every route's depot-to-depot arc sum.
    pub fn cost(&self, model: &RoutingModel) -> i64 {
        let depot = model.depot();
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| {
                let mut dist = model.arc_cost(depot, r[0]);
                for pair in r.windows(2) {
                    dist += model.arc_cost(pair[0], pair[1]);
                }
                dist + model.arc_cost(r[r.len() - 1], depot)
            })
            .sum()
    }

    /// Number of arcs traversed by non-empty routes.
    pub fn arc_count(&self) -> usize {
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.len() + 1)
            .sum()
    }
}
