use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{BlockId, ScheduleAPIError},
    services::{spawn_write, WriteOp},
    AppState,
};

/// Deletes one block. A second delete of the same id finds nothing and
/// reports `deleted: false`; no error.
#[tracing::instrument(name = "Delete block route handler", skip_all)]
pub async fn delete_block(
    State(state): State<AppState>,
    Query(query): Query<DeleteBlockQuery>,
) -> Result<Json<DeleteBlockResponse>, ScheduleAPIError> {
    let id = BlockId::new(query.id);

    let manager_id = {
        let scheduler = state.scheduler.read().await;
        scheduler
            .scope()
            .ok_or(ScheduleAPIError::ScopeNotLoaded)?
            .manager_id
    };

    let removed =
        state.scheduler.write().await.delete_block(&id)?;

    if removed.is_some() {
        spawn_write(state.clone(), manager_id, WriteOp::Delete(id));
    }

    Ok(Json(DeleteBlockResponse {
        deleted: removed.is_some(),
    }))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct DeleteBlockQuery {
    pub id: uuid::Uuid,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DeleteBlockResponse {
    pub deleted: bool,
}
