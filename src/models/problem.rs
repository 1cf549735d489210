//! Routing problem instance.

use crate::distance::DistanceMatrix;
use crate::error::ConfigurationError;

use super::Vehicle;

/// An in-memory routing problem instance.
///
/// Holds the distance matrix, the fleet, the depot index, and the optional
/// capacity dimension, and exposes the arc-cost and feasibility queries the
/// solver components use. All configuration validation happens in
/// [`RoutingModel::new`]; afterwards the model is a pure read accessor with
/// no hidden state.
///
/// # Examples
///
/// ```
/// use fleet_router::distance::DistanceMatrix;
/// use fleet_router::models::RoutingModel;
///
/// let matrix = DistanceMatrix::from_data(3, vec![0, 10, 20, 10, 0, 15, 20, 15, 0]).unwrap();
/// let model = RoutingModel::new(matrix, 2, 0, None, None).unwrap();
/// assert_eq!(model.arc_cost(0, 2), 20);
/// assert_eq!(model.num_nodes(), 3);
/// assert!(!model.has_capacity());
/// ```
#[derive(Debug, Clone)]
pub struct RoutingModel {
    matrix: DistanceMatrix,
    vehicles: Vec<Vehicle>,
    depot: usize,
    demands: Vec<i64>,
    capacitated: bool,
}

impl RoutingModel {
    /// Builds a model, validating the whole configuration up front.
    ///
    /// `capacities` (length K) and `demands` (length N, zero at the depot)
    /// must be supplied together or not at all.
    pub fn new(
        matrix: DistanceMatrix,
        num_vehicles: usize,
        depot: usize,
        capacities: Option<Vec<i64>>,
        demands: Option<Vec<i64>>,
    ) -> Result<Self, ConfigurationError> {
        let num_nodes = matrix.size();
        if num_nodes == 0 {
            return Err(ConfigurationError::EmptyMatrix);
        }
        if num_vehicles == 0 {
            return Err(ConfigurationError::NoVehicles);
        }
        if depot >= num_nodes {
            return Err(ConfigurationError::DepotOutOfRange {
                depot,
                num_nodes,
            });
        }

        let (capacities, demands) = match (capacities, demands) {
            (Some(c), Some(d)) => (Some(c), Some(d)),
            (Some(_), None) => return Err(ConfigurationError::CapacitiesWithoutDemands),
            (None, Some(_)) => return Err(ConfigurationError::DemandsWithoutCapacities),
            (None, None) => (None, None),
        };

        let capacitated = capacities.is_some();

        let vehicles = match &capacities {
            Some(caps) => {
                if caps.len() != num_vehicles {
                    return Err(ConfigurationError::CapacityCountMismatch {
                        expected: num_vehicles,
                        actual: caps.len(),
                    });
                }
                if let Some((vehicle, &capacity)) =
                    caps.iter().enumerate().find(|(_, &c)| c < 0)
                {
                    return Err(ConfigurationError::NegativeCapacity { vehicle, capacity });
                }
                caps.iter()
                    .enumerate()
                    .map(|(i, &c)| Vehicle::new(i).with_capacity(c))
                    .collect()
            }
            None => (0..num_vehicles).map(Vehicle::new).collect(),
        };

        let demands = match demands {
            Some(d) => {
                if d.len() != num_nodes {
                    return Err(ConfigurationError::DemandCountMismatch {
                        expected: num_nodes,
                        actual: d.len(),
                    });
                }
                if let Some((node, &demand)) = d.iter().enumerate().find(|(_, &x)| x < 0) {
                    return Err(ConfigurationError::NegativeDemand { node, demand });
                }
                if d[depot] != 0 {
                    return Err(ConfigurationError::NonZeroDepotDemand {
                        depot,
                        demand: d[depot],
                    });
                }
                d
            }
            None => vec![0; num_nodes],
        };

        Ok(Self {
            matrix,
            vehicles,
            depot,
            demands,
            capacitated,
        })
    }

    /// Distance of the arc from node `i` to node `j`, in meters.
    pub fn arc_cost(&self, i: usize, j: usize) -> i64 {
        self.matrix.get(i, j)
    }

    /// Number of nodes, including the depot.
    pub fn num_nodes(&self) -> usize {
        self.matrix.size()
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// The depot node index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// The fleet.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Returns `true` if a capacity dimension is active.
    pub fn has_capacity(&self) -> bool {
        self.capacitated
    }

    /// Capacity of the given vehicle, if the fleet is capacitated.
    pub fn capacity_of(&self, vehicle: usize) -> Option<i64> {
        self.vehicles[vehicle].capacity()
    }

    /// Demand at the given node (zero when no capacity dimension is active).
    pub fn demand_of(&self, node: usize) -> i64 {
        self.demands[node]
    }

    /// Total demand carried by a route (customer sequence, depot excluded).
    pub fn route_load(&self, route: &[usize]) -> i64 {
        route.iter().map(|&n| self.demand_of(n)).sum()
    }

    /// Returns `true` if `node` can be added to `route` on `vehicle`
    /// without exceeding its remaining capacity.
    ///
    /// Always `true` when no capacity dimension is active. Position within
    /// the route does not matter for load feasibility.
    pub fn is_feasible_insertion(&self, vehicle: usize, route: &[usize], node: usize) -> bool {
        match self.capacity_of(vehicle) {
            Some(capacity) => self.route_load(route) + self.demand_of(node) <= capacity,
            None => true,
        }
    }
}
