//! warp filters and request handlers.

use std::convert::Infallible;
use std::time::Duration;

use serde_json::json;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::Filter;

use crate::distance::matrix_from_coordinates;
use crate::models::RoutingModel;
use crate::solver::{solve, SolverConfig};

use super::types::{OptimizeRequest, OptimizeResponse};

/// The complete route tree: `GET /`, `GET /health`, `POST /optimize`.
pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let root = warp::path::end().and(warp::get()).map(|| {
        warp::reply::json(&json!({
            "name": "fleet-router",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Vehicle routing optimization service",
            "endpoint": "POST /optimize",
        }))
    });

    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "healthy" })));

    let optimize = warp::path("optimize")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(handle_optimize);

    root.or(health).or(optimize)
}

async fn handle_optimize(
    request: OptimizeRequest,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, Infallible> {
    info!(
        locations = request.locations.len(),
        vehicles = request.num_vehicles,
        "optimization request received"
    );

    if let Err(message) = request.validate() {
        warn!(%message, "rejected request");
        return Ok(error_reply(StatusCode::BAD_REQUEST, &message));
    }

    let ids: Vec<String> = request.locations.iter().map(|l| l.id.clone()).collect();
    let coordinates: Vec<(f64, f64)> =
        request.locations.iter().map(|l| (l.lat, l.lng)).collect();
    let matrix = matrix_from_coordinates(&coordinates);

    let model = match RoutingModel::new(
        matrix,
        request.num_vehicles,
        0,
        request.vehicle_capacities,
        request.demands,
    ) {
        Ok(model) => model,
        Err(e) => {
            warn!(error = %e, "invalid model configuration");
            return Ok(error_reply(StatusCode::BAD_REQUEST, &e.to_string()));
        }
    };

    let config = SolverConfig {
        time_limit: Duration::from_secs(request.time_limit_seconds),
    };

    // The solve is CPU-bound; run it off the async executor. A panic inside
    // the task surfaces as a join error and becomes a 500, distinct from an
    // infeasible-but-valid result.
    match tokio::task::spawn_blocking(move || solve(&model, &config)).await {
        Ok(solution) => {
            if !solution.is_complete() {
                warn!(unvisited = solution.unvisited().len(), "partial assignment");
            }
            let response = OptimizeResponse::from_solution(&solution, &ids);
            Ok(warp::reply::with_status(
                warp::reply::json(&response),
                StatusCode::OK,
            ))
        }
        Err(e) => {
            error!(error = %e, "solver task failed");
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal solver failure",
            ))
        }
    }
}

fn error_reply(status: StatusCode, detail: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&json!({ "detail": detail })), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_health() {
        let res = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&routes())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).expect("json body");
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_root_info() {
        let res = warp::test::request()
            .method("GET")
            .path("/")
            .reply(&routes())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).expect("json body");
        assert_eq!(body["endpoint"], "POST /optimize");
    }

    #[tokio::test]
    async fn test_optimize_round_trip() {
        let res = warp::test::request()
            .method("POST")
            .path("/optimize")
            .json(&json!({
                "locations": [
                    {"id": "depot", "lat": 52.5200, "lng": 13.4050},
                    {"id": "north", "lat": 52.5400, "lng": 13.4050},
                    {"id": "east", "lat": 52.5200, "lng": 13.4400},
                ],
                "num_vehicles": 1,
                "time_limit_seconds": 1,
            }))
            .reply(&routes())
            .await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(res.body()).expect("json body");
        assert_eq!(body["success"], true);
        assert_eq!(body["unvisited_nodes"].as_array().expect("array").len(), 0);

        let route = &body["routes"][0];
        let ids = route["location_ids"].as_array().expect("array");
        assert_eq!(ids.first().and_then(Value::as_str), Some("depot"));
        assert_eq!(ids.last().and_then(Value::as_str), Some("depot"));
        assert_eq!(ids.len(), 4);

        // The reported distances re-add to the total.
        let total = body["total_distance"].as_i64().expect("int");
        let route_sum: i64 = body["routes"]
            .as_array()
            .expect("array")
            .iter()
            .map(|r| r["distance"].as_i64().expect("int"))
            .sum();
        assert_eq!(total, route_sum);
        assert!(total > 0);
    }

    #[tokio::test]
    async fn test_optimize_rejects_single_location() {
        let res = warp::test::request()
            .method("POST")
            .path("/optimize")
            .json(&json!({
                "locations": [{"id": "depot", "lat": 0.0, "lng": 0.0}],
                "num_vehicles": 1,
            }))
            .reply(&routes())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(res.body()).expect("json body");
        assert!(body["detail"]
            .as_str()
            .expect("detail")
            .contains("at least 2 locations"));
    }

    #[tokio::test]
    async fn test_optimize_rejects_capacity_mismatch() {
        let res = warp::test::request()
            .method("POST")
            .path("/optimize")
            .json(&json!({
                "locations": [
                    {"id": "depot", "lat": 0.0, "lng": 0.0},
                    {"id": "a", "lat": 0.1, "lng": 0.0},
                ],
                "num_vehicles": 2,
                "vehicle_capacities": [10],
                "demands": [0, 1],
            }))
            .reply(&routes())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_optimize_reports_infeasible() {
        // Two demand-2 nodes against a single capacity-1 vehicle.
        let res = warp::test::request()
            .method("POST")
            .path("/optimize")
            .json(&json!({
                "locations": [
                    {"id": "depot", "lat": 0.0, "lng": 0.0},
                    {"id": "loc1", "lat": 0.1, "lng": 0.0},
                    {"id": "loc2", "lat": 0.0, "lng": 0.1},
                ],
                "num_vehicles": 1,
                "vehicle_capacities": [1],
                "demands": [0, 2, 2],
                "time_limit_seconds": 1,
            }))
            .reply(&routes())
            .await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(res.body()).expect("json body");
        assert_eq!(body["success"], false);
        assert_eq!(body["total_distance"], 0);
        let unvisited: Vec<&str> = body["unvisited_nodes"]
            .as_array()
            .expect("array")
            .iter()
            .map(|v| v.as_str().expect("string"))
            .collect();
        assert_eq!(unvisited, vec!["loc1", "loc2"]);
        assert!(body["message"].as_str().expect("message").contains("2 of 2"));
    }
}
