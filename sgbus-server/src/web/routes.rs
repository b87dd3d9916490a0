//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::datamall::BusArrivals;
use crate::directory::DirectoryError;
use crate::domain::{InvalidPoint, Point};

use super::dto::*;
use super::state::AppState;
use super::templates::*;
use super::visitor::{Visitor, track_visitor};

/// Bus icon served at `/icon`.
const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="8" y="4" width="48" height="48" rx="8" fill="#d42e12"/><rect x="14" y="12" width="36" height="20" rx="2" fill="#fff"/><circle cx="20" cy="42" r="4" fill="#fff"/><circle cx="44" cy="42" r="4" fill="#fff"/><rect x="12" y="52" width="8" height="8" rx="2" fill="#333"/><rect x="44" y="52" width="8" height="8" rx="2" fill="#333"/></svg>"##;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/closest", get(closest_stop))
        .route("/icon", get(icon))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(middleware::from_fn(track_visitor))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Bus icon.
async fn icon() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        ICON_SVG,
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Arrivals page.
///
/// A failed upstream fetch still renders the page, with an error note.
async fn index_page(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    headers: HeaderMap,
    Query(req): Query<IndexRequest>,
) -> Result<Response, AppError> {
    let stop_code = req.stop_code();

    let (arrivals, fetch_error) = match stop_code {
        Some(code) => {
            info!(input = code, visitor = visitor.id(), "serving");
            match state.datamall.bus_arrivals(code).await {
                Ok(arrivals) => (arrivals, None),
                Err(e) => {
                    error!(error = %e, stop_code = code, "failed to retrieve bus timings");
                    (BusArrivals::default(), Some(e.to_string()))
                }
            }
        }
        None => (BusArrivals::default(), None),
    };

    let now = Utc::now();

    let mut response = if accepts_html(&headers) {
        let template =
            IndexTemplate::for_stop(stop_code, &arrivals, &state.directory, &now, fetch_error);
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
        Html(html).into_response()
    } else {
        Json(arrivals_response(
            stop_code.unwrap_or(""),
            &arrivals,
            &state.directory,
            &now,
            fetch_error,
        ))
        .into_response()
    };

    if !state.production {
        response
            .headers_mut()
            .insert("x-robots-tag", HeaderValue::from_static("none"));
    }

    Ok(response)
}

/// Redirect to the arrivals page of the stop nearest the given coordinate.
async fn closest_stop(
    State(state): State<AppState>,
    Query(req): Query<ClosestRequest>,
) -> Result<Response, AppError> {
    let (Some(lat), Some(lng)) = (req.lat.as_deref(), req.lng.as_deref()) else {
        return Err(AppError::BadRequest {
            message: "lat and lng are required".to_string(),
        });
    };

    let point = Point::parse(lat, lng)?;
    let stop = state.directory.closest(point)?;

    info!(
        lat = point.lat(),
        lng = point.lng(),
        stop_code = %stop.code,
        distance_m = point.haversine_metres(&stop.location()).round() as u64,
        "closest stop"
    );

    let location = arrivals_location(&stop.code)?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Path of the arrivals page for a stop, with the code form-encoded.
fn arrivals_location(code: &str) -> Result<String, AppError> {
    let query = serde_urlencoded::to_string(IndexRequest {
        id: Some(code.to_string()),
    })
    .map_err(|e| AppError::Internal {
        message: format!("could not encode stop code: {e}"),
    })?;
    Ok(format!("/?{query}"))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<InvalidPoint> for AppError {
    fn from(e: InvalidPoint) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Empty => AppError::Unavailable {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
