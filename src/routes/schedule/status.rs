use axum::{extract::State, Json};
use serde::Serialize;

use crate::{domain::ScheduleAPIError, AppState};

/// Reports the loaded scope, the view mode, and which blocks still
/// have unsaved changes — the "dirty" indicator the retry surface
/// feeds on.
#[tracing::instrument(name = "Schedule status route handler", skip_all)]
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ScheduleAPIError> {
    let scheduler = state.scheduler.read().await;
    let scope = scheduler
        .scope()
        .ok_or(ScheduleAPIError::ScopeNotLoaded)?;

    Ok(Json(StatusResponse {
        manager_id: *scope.manager_id.as_ref(),
        job_title: scope.job_title.to_string(),
        month: scope.month.to_string(),
        mode: scheduler.mode().to_string(),
        block_count: scheduler.blocks().len(),
        unsaved: scheduler
            .dirty_ids()
            .iter()
            .map(|id| *id.as_ref())
            .collect(),
    }))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct StatusResponse {
    #[serde(rename = "managerId")]
    pub manager_id: uuid::Uuid,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    pub month: String,
    pub mode: String,
    #[serde(rename = "blockCount")]
    pub block_count: usize,
    pub unsaved: Vec<uuid::Uuid>,
}
