use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    domain::ScheduleAPIError,
    services::spawn_clear,
    AppState,
};

/// Empties the loaded scope and asks the collaborator to clear the
/// backing collection.
#[tracing::instrument(name = "Delete all blocks route handler", skip_all)]
pub async fn delete_all(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ScheduleAPIError> {
    let manager_id = {
        let scheduler = state.scheduler.read().await;
        scheduler
            .scope()
            .ok_or(ScheduleAPIError::ScopeNotLoaded)?
            .manager_id
    };

    let removed = state.scheduler.write().await.delete_all()?;
    let deleted = removed.len();

    spawn_clear(state.clone(), manager_id, removed);

    Ok(Json(DeleteAllResponse { deleted }))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DeleteAllResponse {
    pub deleted: usize,
}
