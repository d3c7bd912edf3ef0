use axum::{
    extract::{Query, State},
    Extension, Json,
};
use indiebrew_core::{clamp_radius_m, Coordinates, DisplayOrder, RankStrategy, RankedResult};
use indiebrew_ranker::{sort_for_display, AssembleOptions};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta, SearchDefaults};

/// Query parameters arrive as raw strings so malformed values produce a
/// `validation_error` envelope instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub(super) struct NearbyQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub strategy: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct NearbyData {
    pub results: Vec<RankedResult>,
    pub radius_m: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NearbyParams {
    origin: Coordinates,
    radius_m: u32,
    strategy: RankStrategy,
    order: DisplayOrder,
}

fn parse_coordinate(raw: Option<&str>, name: &str, bound: f64) -> Result<f64, String> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("{name} is required"))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("{name} must be a number"))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(format!("{name} must be between -{bound} and {bound}"));
    }
    Ok(value)
}

/// Unparsable or non-finite radii fall back to the configured default.
fn parse_radius(raw: Option<&str>, default_m: u32) -> u32 {
    raw.and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())
        .map_or(default_m, clamp_radius_m)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_params(query: &NearbyQuery, defaults: &SearchDefaults) -> Result<NearbyParams, String> {
    let lat = parse_coordinate(query.lat.as_deref(), "lat", 90.0)?;
    let lng = parse_coordinate(query.lng.as_deref(), "lng", 180.0)?;

    let strategy = match non_blank(query.strategy.as_deref()) {
        Some(raw) => raw
            .parse::<RankStrategy>()
            .map_err(|e| e.to_string())?,
        None => defaults.strategy,
    };
    let order = match non_blank(query.sort.as_deref()) {
        Some(raw) => raw
            .parse::<DisplayOrder>()
            .map_err(|e| e.to_string())?,
        None => DisplayOrder::default(),
    };

    Ok(NearbyParams {
        origin: Coordinates::new(lat, lng),
        radius_m: parse_radius(query.radius.as_deref(), defaults.radius_m),
        strategy,
        order,
    })
}

pub(super) async fn nearby_coffee(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<NearbyData>>, ApiError> {
    let params = parse_params(&query, &state.defaults)
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let raw_places = state
        .source
        .nearby(params.origin, params.radius_m)
        .map_err(|e| {
            tracing::warn!(error = %e, "place source failed");
            ApiError::new(req_id.0.clone(), "upstream_error", e.to_string())
        })?;

    let options = AssembleOptions {
        strategy: params.strategy,
        max_results: state.defaults.max_results,
        require_coffee_hint: state.defaults.require_coffee_hint,
    };
    let mut results = state
        .assembler
        .assemble(&raw_places, params.origin, &options);
    sort_for_display(&mut results, params.order);

    tracing::info!(
        radius_m = params.radius_m,
        strategy = %params.strategy,
        sort = %params.order,
        candidates = raw_places.len(),
        returned = results.len(),
        "nearby search served"
    );

    Ok(Json(ApiResponse {
        data: NearbyData {
            count: results.len(),
            radius_m: params.radius_m,
            results,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
