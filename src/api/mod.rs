//! HTTP transport: DTOs, validation, and warp filters.
//!
//! The engine stays transport-agnostic; this module owns the external-id ↔
//! node-index mapping, coordinate-to-matrix conversion, and status-code
//! policy (validation failures → 400, solver panics → 500, infeasible but
//! valid results → 200 with `success: false`).

pub mod types;

mod routes;

pub use routes::routes;
