use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{
    domain::interchange::read_sheet,
    domain::ScheduleAPIError,
    services::{spawn_write, WriteOp},
    AppState,
};

/// Imports a CSV sheet. The whole upload is rejected if any required
/// column is missing or any row fails to parse; on success every
/// imported block gets a fresh id and is persisted individually.
#[tracing::instrument(name = "Import schedule route handler", skip_all)]
pub async fn import_schedule(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<ImportScheduleResponse>), ScheduleAPIError> {
    let rows = read_sheet(&body)?;

    let manager_id = {
        let scheduler = state.scheduler.read().await;
        scheduler
            .scope()
            .ok_or(ScheduleAPIError::ScopeNotLoaded)?
            .manager_id
    };

    let imported =
        state.scheduler.write().await.import_rows(rows)?;

    for block in &imported {
        spawn_write(
            state.clone(),
            manager_id,
            WriteOp::Create(block.clone()),
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(ImportScheduleResponse {
            imported: imported.len(),
        }),
    ))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ImportScheduleResponse {
    pub imported: usize,
}
