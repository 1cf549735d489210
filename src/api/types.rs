//! Request and response bodies for the HTTP transport.

use serde::{Deserialize, Serialize};

use crate::models::Solution;

/// A location with an external identifier and WGS84 coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier, echoed back in routes.
    pub id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Body of `POST /optimize`. The first location is the depot.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub locations: Vec<Location>,
    pub num_vehicles: usize,
    #[serde(default)]
    pub vehicle_capacities: Option<Vec<i64>>,
    #[serde(default)]
    pub demands: Option<Vec<i64>>,
    #[serde(default = "default_time_limit")]
    pub time_limit_seconds: u64,
}

fn default_time_limit() -> u64 {
    30
}

impl OptimizeRequest {
    /// Transport-level validation, mirroring the model's own checks with
    /// friendlier field-oriented messages.
    pub fn validate(&self) -> Result<(), String> {
        if self.locations.len() < 2 {
            return Err("at least 2 locations are required (first is the depot)".into());
        }
        for location in &self.locations {
            if !(-90.0..=90.0).contains(&location.lat) {
                return Err(format!(
                    "location {}: latitude {} out of range [-90, 90]",
                    location.id, location.lat
                ));
            }
            if !(-180.0..=180.0).contains(&location.lng) {
                return Err(format!(
                    "location {}: longitude {} out of range [-180, 180]",
                    location.id, location.lng
                ));
            }
        }
        if self.num_vehicles == 0 {
            return Err("num_vehicles must be positive".into());
        }
        if !(1..=300).contains(&self.time_limit_seconds) {
            return Err("time_limit_seconds must be between 1 and 300".into());
        }
        if let Some(capacities) = &self.vehicle_capacities {
            if capacities.len() != self.num_vehicles {
                return Err(format!(
                    "number of capacities must match num_vehicles ({})",
                    self.num_vehicles
                ));
            }
        }
        if let Some(demands) = &self.demands {
            if demands.len() != self.locations.len() {
                return Err(format!(
                    "number of demands must match number of locations ({})",
                    self.locations.len()
                ));
            }
            if demands[0] != 0 {
                return Err("depot (first location) demand must be 0".into());
            }
        }
        Ok(())
    }
}

/// One vehicle's route in the response.
#[derive(Debug, Clone, Serialize)]
pub struct RouteBody {
    pub vehicle_id: usize,
    pub location_ids: Vec<String>,
    pub distance: i64,
}

/// Body of a successful `POST /optimize` response.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeResponse {
    pub total_distance: i64,
    pub routes: Vec<RouteBody>,
    pub unvisited_nodes: Vec<String>,
    pub success: bool,
    pub message: Option<String>,
}

impl OptimizeResponse {
    /// Maps engine node indices back to external location ids.
    pub fn from_solution(solution: &Solution, ids: &[String]) -> Self {
        let routes = solution
            .routes()
            .iter()
            .map(|route| RouteBody {
                vehicle_id: route.vehicle(),
                location_ids: route.stops().iter().map(|&n| ids[n].clone()).collect(),
                distance: route.distance(),
            })
            .collect();
        let unvisited_nodes: Vec<String> = solution
            .unvisited()
            .iter()
            .map(|&n| ids[n].clone())
            .collect();

        let success = solution.is_complete();
        let message = if success {
            "optimization completed successfully".to_string()
        } else {
            format!(
                "{} of {} locations could not be assigned under the given constraints",
                unvisited_nodes.len(),
                ids.len() - 1
            )
        };

        Self {
            total_distance: solution.total_distance(),
            routes,
            unvisited_nodes,
            success,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;

    fn request() -> OptimizeRequest {
        serde_json::from_value(serde_json::json!({
            "locations": [
                {"id": "depot", "lat": 52.52, "lng": 13.405},
                {"id": "a", "lat": 52.53, "lng": 13.41},
            ],
            "num_vehicles": 1,
        }))
        .expect("valid request json")
    }

    #[test]
    fn test_deserialize_defaults() {
        let req = request();
        assert_eq!(req.time_limit_seconds, 30);
        assert!(req.vehicle_capacities.is_none());
        assert!(req.demands.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_too_few_locations() {
        let mut req = request();
        req.locations.truncate(1);
        let err = req.validate().unwrap_err();
        assert!(err.contains("at least 2 locations"));
    }

    #[test]
    fn test_validate_coordinate_ranges() {
        let mut req = request();
        req.locations[1].lat = 91.0;
        assert!(req.validate().unwrap_err().contains("latitude"));

        let mut req = request();
        req.locations[0].lng = -181.0;
        assert!(req.validate().unwrap_err().contains("longitude"));
    }

    #[test]
    fn test_validate_vehicles_and_time_limit() {
        let mut req = request();
        req.num_vehicles = 0;
        assert!(req.validate().unwrap_err().contains("num_vehicles"));

        let mut req = request();
        req.time_limit_seconds = 0;
        assert!(req.validate().unwrap_err().contains("time_limit_seconds"));

        let mut req = request();
        req.time_limit_seconds = 301;
        assert!(req.validate().unwrap_err().contains("time_limit_seconds"));
    }

    #[test]
    fn test_validate_capacity_and_demand_lengths() {
        let mut req = request();
        req.vehicle_capacities = Some(vec![10, 10]);
        assert!(req.validate().unwrap_err().contains("num_vehicles (1)"));

        let mut req = request();
        req.demands = Some(vec![0]);
        assert!(req.validate().unwrap_err().contains("number of locations (2)"));

        let mut req = request();
        req.demands = Some(vec![5, 1]);
        assert!(req.validate().unwrap_err().contains("depot"));
    }

    #[test]
    fn test_response_maps_ids() {
        let ids = vec!["depot".to_string(), "a".to_string(), "b".to_string()];
        let solution = Solution::new(
            vec![Route::new(0, vec![0, 1, 0], 500)],
            500,
            vec![2],
        );
        let resp = OptimizeResponse::from_solution(&solution, &ids);

        assert_eq!(resp.total_distance, 500);
        assert_eq!(resp.routes[0].location_ids, vec!["depot", "a", "depot"]);
        assert_eq!(resp.unvisited_nodes, vec!["b"]);
        assert!(!resp.success);
        assert!(resp.message.as_deref().unwrap_or("").contains("1 of 2"));
    }

    #[test]
    fn test_response_success_message() {
        let ids = vec!["depot".to_string(), "a".to_string()];
        let solution = Solution::new(vec![Route::new(0, vec![0, 1, 0], 500)], 500, vec![]);
        let resp = OptimizeResponse::from_solution(&solution, &ids);
        assert!(resp.success);
        assert_eq!(
            resp.message.as_deref(),
            Some("optimization completed successfully")
        );
    }
}
