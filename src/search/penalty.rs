//! Arc penalties and the augmented cost view.

use crate::models::{RoutePlan, RoutingModel};

/// Per-arc penalty counters, row-major like the distance matrix.
#[derive(Debug, Clone)]
pub(crate) struct Penalties {
    data: Vec<i64>,
    size: usize,
}

impl Penalties {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    pub fn increment(&mut self, from: usize, to: usize) {
        self.data[from * self.size + to] += 1;
    }
}

/// Raw and penalty-augmented arc costs used by the move scans.
///
/// The augmented cost of an arc is `base + lambda * penalty`; moves that
/// decrease it are accepted even when the raw cost stalls, which steers the
/// search away from arcs it keeps returning to.
pub(crate) struct SearchCost<'a> {
    model: &'a RoutingModel,
    penalties: &'a Penalties,
    lambda: i64,
}

impl<'a> SearchCost<'a> {
    pub fn new(model: &'a RoutingModel, penalties: &'a Penalties, lambda: i64) -> Self {
        Self {
            model,
            penalties,
            lambda,
        }
    }

    pub fn raw(&self, from: usize, to: usize) -> i64 {
        self.model.arc_cost(from, to)
    }

    pub fn augmented(&self, from: usize, to: usize) -> i64 {
        self.model.arc_cost(from, to) + self.lambda * self.penalties.get(from, to)
    }
}

/// Scales the penalty weight to the instance: a fraction of the mean arc
/// cost of the construction solution.
pub(crate) fn derive_lambda(plan: &RoutePlan, model: &RoutingModel) -> i64 {
    let arcs = plan.arc_count() as i64;
    if arcs == 0 {
        return 1;
    }
    (plan.cost(model) / (5 * arcs)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn model() -> RoutingModel {
        let matrix =
            DistanceMatrix::from_data(3, vec![0, 10, 20, 10, 0, 15, 20, 15, 0]).expect("valid");
        RoutingModel::new(matrix, 1, 0, None, None).expect("valid")
    }

    #[test]
    fn test_penalties_accumulate() {
        let mut p = Penalties::new(3);
        assert_eq!(p.get(1, 2), 0);
        p.increment(1, 2);
        p.increment(1, 2);
        assert_eq!(p.get(1, 2), 2);
        assert_eq!(p.get(2, 1), 0);
    }

    #[test]
    fn test_augmented_cost() {
        let model = model();
        let mut p = Penalties::new(3);
        p.increment(0, 1);
        let cost = SearchCost::new(&model, &p, 4);
        assert_eq!(cost.raw(0, 1), 10);
        assert_eq!(cost.augmented(0, 1), 14);
        assert_eq!(cost.augmented(1, 2), 15);
    }

    #[test]
    fn test_lambda_scales_with_cost() {
        let model = model();
        // Route 0->1->2->0: cost 10 + 15 + 20 = 45 over 3 arcs.
        let plan = RoutePlan::new(vec![vec![1, 2]], vec![]);
        assert_eq!(derive_lambda(&plan, &model), 3);

        let empty = RoutePlan::new(vec![vec![]], vec![1, 2]);
        assert_eq!(derive_lambda(&empty, &model), 1);
    }
}
