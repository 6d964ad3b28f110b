//! Route Planner
//!
//! Direct (non-agentic) route analysis: traffic conditions between two
//! endpoints plus points of interest near each. The two nearby lookups
//! are independent, so they run concurrently and are joined; a failure in
//! one branch is reported in that branch's section of the report without
//! touching the other.

use std::sync::Arc;

use crate::error::Result;
use crate::geo::GeoDataClient;
use crate::model::{GeoPoint, Place};
use crate::svckit::{format_places, format_route, DEFAULT_RADIUS_M};

const PLANNER_KEYWORD: &str = "event";

/// Analyzes a route between two coordinates
pub struct RoutePlanner {
    geo: Arc<dyn GeoDataClient>,
}

impl RoutePlanner {
    pub fn new(geo: Arc<dyn GeoDataClient>) -> Self {
        Self { geo }
    }

    /// Produce the route analysis report for one origin/destination pair.
    ///
    /// Errors only when the traffic lookup itself fails; nearby-place
    /// failures degrade to per-branch markers inside the report.
    pub async fn analyze(&self, origin: GeoPoint, destination: GeoPoint) -> Result<String> {
        tracing::info!(%origin, %destination, "analyzing route");

        let traffic = self
            .geo
            .directions(&origin.to_string(), &destination.to_string())
            .await?;

        let (start_places, end_places) = tokio::join!(
            self.geo
                .nearby_places(origin, PLANNER_KEYWORD, DEFAULT_RADIUS_M),
            self.geo
                .nearby_places(destination, PLANNER_KEYWORD, DEFAULT_RADIUS_M),
        );

        Ok(format!(
            "Route Analysis Report\n\nTRAFFIC:\n{}\n\nNEAR START ({origin}):\n{}\n\nNEAR END ({destination}):\n{}",
            format_route(&traffic),
            render_branch(start_places),
            render_branch(end_places),
        ))
    }
}

/// Render one nearby-places branch, capturing its outcome independently
fn render_branch(places: Result<Vec<Place>>) -> String {
    match places {
        Ok(places) if places.is_empty() => "No places found.".into(),
        Ok(places) => format_places(&places),
        Err(e) => format!("Lookup failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::MockGeoClient;

    fn endpoints() -> (GeoPoint, GeoPoint) {
        (
            GeoPoint::new(19.11, 72.86).unwrap(),
            GeoPoint::new(18.93, 72.83).unwrap(),
        )
    }

    #[tokio::test]
    async fn report_covers_traffic_and_both_endpoints() {
        let planner = RoutePlanner::new(Arc::new(MockGeoClient::new()));
        let (origin, destination) = endpoints();

        let report = planner.analyze(origin, destination).await.unwrap();

        assert!(report.starts_with("Route Analysis Report"));
        assert!(report.contains("52 mins"));
        assert!(report.contains("NEAR START (19.11,72.86)"));
        assert!(report.contains("NEAR END (18.93,72.83)"));
        assert!(report.contains("Jogger's Park"));
    }

    #[tokio::test]
    async fn failed_nearby_branch_is_marked_without_aborting() {
        let planner = RoutePlanner::new(Arc::new(MockGeoClient::failing_nearby()));
        let (origin, destination) = endpoints();

        let report = planner.analyze(origin, destination).await.unwrap();

        // Traffic still present, each branch carries its own marker
        assert!(report.contains("Western Express Hwy"));
        assert_eq!(report.matches("Lookup failed:").count(), 2);
    }

    #[tokio::test]
    async fn traffic_failure_fails_the_analysis() {
        let planner = RoutePlanner::new(Arc::new(MockGeoClient::failing_directions()));
        let (origin, destination) = endpoints();

        assert!(planner.analyze(origin, destination).await.is_err());
    }
}
