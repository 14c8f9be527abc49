use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::db::models::{
    NewSpacecraft, Spacecraft, SpacecraftId, SpacecraftPatch, SpacecraftSummary, WriteOutcome,
    validate_id,
};
use crate::middleware::{ApiJson, RequireBasicAuth};
use crate::{SpacedockError, router::SpacedockState};

pub const SUCCESSFUL: &str = "Successful operation";

type Accepted = (StatusCode, Json<&'static str>);

fn accepted() -> Accepted {
    (StatusCode::ACCEPTED, Json(SUCCESSFUL))
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(rename = "ID")]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub name: String,
    pub class: String,
    pub status: String,
}

/// POST /api/spacecraft
pub async fn create_spacecraft(
    State(state): State<SpacedockState>,
    auth: RequireBasicAuth,
    ApiJson(body): ApiJson<NewSpacecraft>,
) -> Result<Accepted, SpacedockError> {
    body.validate()?;
    let id = state.storage.insert(&body).await?;
    info!(id, name = %body.name, by = %auth.email, "spacecraft created");
    Ok(accepted())
}

/// DELETE /api/spacecraft
pub async fn delete_spacecraft(
    State(state): State<SpacedockState>,
    auth: RequireBasicAuth,
    ApiJson(SpacecraftId { id }): ApiJson<SpacecraftId>,
) -> Result<Accepted, SpacedockError> {
    validate_id(id)?;
    let outcome = state.storage.delete(id).await?;
    log_write("delete", id, &auth.email, outcome);
    Ok(accepted())
}

/// PATCH /api/spacecraft
pub async fn update_spacecraft(
    State(state): State<SpacedockState>,
    auth: RequireBasicAuth,
    ApiJson(patch): ApiJson<SpacecraftPatch>,
) -> Result<Accepted, SpacedockError> {
    validate_id(patch.id)?;
    let outcome = state.storage.update(&patch).await?;
    log_write("update", patch.id, &auth.email, outcome);
    Ok(accepted())
}

/// GET /api/spacecraft?ID=<int>
pub async fn get_spacecraft(
    State(state): State<SpacedockState>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<Spacecraft>, SpacedockError> {
    let raw = query
        .id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SpacedockError::Validation("Id not present in query".to_string()))?;
    let id: i64 = raw
        .parse()
        .map_err(|e| SpacedockError::Validation(format!("invalid ID {raw:?}: {e}")))?;

    Ok(Json(state.storage.get_detailed(id).await?))
}

/// GET /api/filter-spacecrafts?name=&class=&status=
pub async fn filter_spacecrafts(
    State(state): State<SpacedockState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Json<Vec<SpacecraftSummary>>, SpacedockError> {
    let found = state
        .storage
        .filter(&filter.name, &filter.class, &filter.status)
        .await?;
    Ok(Json(found))
}

// Unknown ids still answer 202; the miss is only logged.
fn log_write(op: &'static str, id: i64, by: &str, outcome: WriteOutcome) {
    match outcome {
        WriteOutcome::Applied(rows) => info!(op, id, rows, by, "spacecraft write applied"),
        WriteOutcome::NoMatch => warn!(op, id, by, "spacecraft write matched no row"),
    }
}
