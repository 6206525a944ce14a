//! Floor-plan SVG routes: fetch and save.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use floorplan::floor::fallback_url;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::svg_store::SvgStoreError;
use crate::state::AppState;

pub const X_FALLBACK: HeaderName = HeaderName::from_static("x-fallback");
const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Debug, Deserialize)]
pub struct SaveSvgBody {
    pub floor: Option<String>,
    #[serde(rename = "svgContent")]
    pub svg_content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveSvgResponse {
    pub success: bool,
    pub message: String,
}

/// `GET /api/get-svg/{floor}` — the saved plan, uncached.
///
/// A floor that was never saved answers 404 with `X-Fallback: true` so the
/// client retries the shipped copy under `/denah`.
pub async fn get_svg(State(state): State<AppState>, Path(floor): Path<String>) -> Result<Response, ApiError> {
    match state.svgs.read(&floor).await {
        Ok(content) => Ok((
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("image/svg+xml")),
                (header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE)),
                (header::PRAGMA, HeaderValue::from_static("no-cache")),
                (header::EXPIRES, HeaderValue::from_static("0")),
            ],
            content,
        )
            .into_response()),
        Err(SvgStoreError::NotFound(name)) => {
            tracing::debug!(floor = %name, "no saved plan; pointing client at fallback");
            Ok((
                StatusCode::NOT_FOUND,
                [(X_FALLBACK, HeaderValue::from_static("true"))],
                Json(serde_json::json!({
                    "error": format!("no saved floor plan for {name}"),
                    "fallback": fallback_url(&name),
                })),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// `POST /api/save-svg` — validate and store a plan.
///
/// Every outcome, failures included, is reported as `{success, message}`.
/// That covers bodies that are not JSON or do not deserialize.
pub async fn save_svg(State(state): State<AppState>, body: Result<Json<SaveSvgBody>, JsonRejection>) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return save_failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let (Some(floor), Some(content)) = (body.floor.as_deref(), body.svg_content.as_deref()) else {
        return save_failure(StatusCode::BAD_REQUEST, "floor and svgContent are required".into());
    };

    match state.svgs.write(floor, content).await {
        Ok(saved) => Json(SaveSvgResponse { success: true, message: format!("floor plan {saved} saved") }).into_response(),
        Err(e) => {
            let err = ApiError::from(e);
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(error = %err, "saving floor plan failed");
                return save_failure(status, "could not save floor plan".into());
            }
            save_failure(status, err.to_string())
        }
    }
}

fn save_failure(status: StatusCode, message: String) -> Response {
    (status, Json(SaveSvgResponse { success: false, message })).into_response()
}

#[cfg(test)]
#[path = "svg_test.rs"]
mod tests;
