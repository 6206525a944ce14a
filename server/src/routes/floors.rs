//! Floor listing and region preview routes.

use axum::Json;
use axum::extract::{Path, State};
use floorplan::geometry::{Bounds, Point};
use floorplan::svg::DiscoveredRegion;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegionSummary {
    pub id: String,
    pub fill_color: String,
    pub points: Vec<Point>,
    pub bounds: Option<Bounds>,
}

impl From<DiscoveredRegion> for RegionSummary {
    fn from(region: DiscoveredRegion) -> Self {
        let bounds = region.bounds();
        Self { id: region.id, fill_color: region.fill_color, points: region.points, bounds }
    }
}

/// `GET /api/floors` — floors with a plan, in building order.
pub async fn list_floors(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.svgs.list_floors().await?))
}

/// `GET /api/floors/{floor}/regions` — the regions discovered on a floor's
/// plan (saved copy first, shipped copy otherwise), in SVG user units.
pub async fn floor_regions(
    State(state): State<AppState>,
    Path(floor): Path<String>,
) -> Result<Json<Vec<RegionSummary>>, ApiError> {
    let doc = state.svgs.regions(&floor).await?;
    Ok(Json(doc.regions.into_iter().map(RegionSummary::from).collect()))
}
