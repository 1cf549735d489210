//! Error types for model configuration.

use std::fmt;

/// An invalid problem configuration, detected before any solving begins.
///
/// These map to client-side validation failures at the transport layer.
/// Infeasibility (nodes that cannot be routed under the given constraints)
/// is *not* an error: it is reported through
/// [`Solution::unvisited`](crate::models::Solution::unvisited).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The distance matrix has no nodes.
    EmptyMatrix,
    /// The fleet has no vehicles.
    NoVehicles,
    /// The depot index does not name a node in the matrix.
    DepotOutOfRange {
        /// Requested depot index.
        depot: usize,
        /// Number of nodes in the matrix.
        num_nodes: usize,
    },
    /// Capacities were supplied without demands.
    CapacitiesWithoutDemands,
    /// Demands were supplied without capacities.
    DemandsWithoutCapacities,
    /// The capacity list does not match the vehicle count.
    CapacityCountMismatch {
        /// Number of vehicles in the fleet.
        expected: usize,
        /// Number of capacities supplied.
        actual: usize,
    },
    /// The demand list does not match the node count.
    DemandCountMismatch {
        /// Number of nodes in the matrix.
        expected: usize,
        /// Number of demands supplied.
        actual: usize,
    },
    /// A vehicle capacity is negative.
    NegativeCapacity {
        /// Vehicle index.
        vehicle: usize,
        /// Supplied capacity.
        capacity: i64,
    },
    /// A node demand is negative.
    NegativeDemand {
        /// Node index.
        node: usize,
        /// Supplied demand.
        demand: i64,
    },
    /// The depot has a non-zero demand.
    NonZeroDepotDemand {
        /// Depot index.
        depot: usize,
        /// Supplied demand.
        demand: i64,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMatrix => write!(f, "distance matrix has no nodes"),
            Self::NoVehicles => write!(f, "at least one vehicle is required"),
            Self::DepotOutOfRange { depot, num_nodes } => {
                write!(f, "depot index {depot} is out of range for {num_nodes} nodes")
            }
            Self::CapacitiesWithoutDemands => {
                write!(f, "vehicle capacities were supplied without demands")
            }
            Self::DemandsWithoutCapacities => {
                write!(f, "demands were supplied without vehicle capacities")
            }
            Self::CapacityCountMismatch { expected, actual } => {
                write!(f, "number of capacities ({actual}) must match number of vehicles ({expected})")
            }
            Self::DemandCountMismatch { expected, actual } => {
                write!(f, "number of demands ({actual}) must match number of locations ({expected})")
            }
            Self::NegativeCapacity { vehicle, capacity } => {
                write!(f, "vehicle {vehicle} has negative capacity {capacity}")
            }
            Self::NegativeDemand { node, demand } => {
                write!(f, "node {node} has negative demand {demand}")
            }
            Self::NonZeroDepotDemand { depot, demand } => {
                write!(f, "depot (node {depot}) must have zero demand, got {demand}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
