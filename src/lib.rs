//! # fleet-router
//!
//! Vehicle routing optimization: a capacitated-VRP engine built from
//! cheapest-insertion construction and time-budgeted guided local search,
//! plus the HTTP transport that serves it.
//!
//! ## Modules
//!
//! - [`models`] — problem instance, working route plan, and solution types
//! - [`distance`] — integer distance matrix and great-circle provider
//! - [`construction`] — cheapest feasible insertion heuristic
//! - [`search`] — guided local search (relocate, exchange, 2-opt) with an
//!   injected clock for cooperative time-budget termination
//! - [`solver`] — solve orchestration and solution extraction
//! - [`api`] — HTTP request/response layer
//! - [`error`] — configuration error taxonomy

pub mod api;
pub mod construction;
pub mod distance;
pub mod error;
pub mod models;
pub mod search;
pub mod solver;
