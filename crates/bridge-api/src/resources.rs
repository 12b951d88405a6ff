//! Handlers for `/resources` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/resources` | The whole directory |
//! | `POST` | `/resources/search` | Body: [`SearchBody`]; nearest first |

use axum::{Json, extract::State};
use bridge_core::{
  request::Location,
  resource::{self, RankedResource, Resource, ResourceKind},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Default number of results for a proximity search.
const DEFAULT_LIMIT: usize = 5;

/// `GET /resources`
pub async fn list(State(state): State<AppState>) -> Json<Vec<Resource>> {
  Json(state.resources.as_ref().clone())
}

/// JSON body accepted by `POST /resources/search`.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
  pub location: Location,
  /// Restrict results to one kind of resource.
  #[serde(rename = "type")]
  pub kind:     Option<ResourceKind>,
  pub limit:    Option<usize>,
}

/// `POST /resources/search`: resources ranked by distance from `location`.
pub async fn search(
  State(state): State<AppState>,
  Json(body): Json<SearchBody>,
) -> Result<Json<Vec<RankedResource>>, ApiError> {
  let origin = &body.location;
  if !origin.lat.is_finite() || !origin.lng.is_finite() {
    return Err(ApiError::BadRequest("location must have finite coordinates".into()));
  }
  let limit = body.limit.unwrap_or(DEFAULT_LIMIT);
  Ok(Json(resource::nearest(&state.resources, origin, body.kind, limit)))
}
