//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the floor-plan, room and contract endpoints under a
//! single Axum router. The floor plans shipped with the app are served as
//! static files under `/denah`, which is where the viewer falls back to when
//! `GET /api/get-svg/{floor}` answers with `X-Fallback: true`.

pub mod contracts;
pub mod floors;
pub mod rooms;
pub mod svg;

use std::path::Path;

use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Shipped plans can be replaced on disk; clients revalidate every time.
const STATIC_PLAN_CACHE: &str = "no-cache";

/// API routes only, without static files.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([svg::X_FALLBACK]);

    Router::new()
        .route("/api/get-svg/{floor}", get(svg::get_svg))
        .route("/api/save-svg", post(svg::save_svg))
        .route("/api/floors", get(floors::list_floors))
        .route("/api/floors/{floor}/regions", get(floors::floor_regions))
        .route("/api/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/api/rooms/{id}",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route("/api/contracts", get(contracts::list_contracts).post(contracts::create_contract))
        .route(
            "/api/contracts/{id}",
            get(contracts::get_contract)
                .put(contracts::update_contract)
                .delete(contracts::delete_contract),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Static floor plans under `/denah`.
fn static_plans(dir: &Path) -> Router {
    let cache = SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, HeaderValue::from_static(STATIC_PLAN_CACHE));
    Router::new().nest_service("/denah", ServeDir::new(dir)).layer(cache)
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    api_routes(state)
        .merge(static_plans(&static_dir))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
