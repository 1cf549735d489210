//! Domain model types for the routing engine.
//!
//! Provides the core abstractions: the problem instance with its arc-cost
//! and feasibility accessors, vehicles with optional capacities, the mutable
//! route plan the solver works on, and the extracted route/solution types
//! returned to callers.

mod plan;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use plan::RoutePlan;
pub use problem::RoutingModel;
pub use route::Route;
pub use solution::Solution;
pub use vehicle::Vehicle;
