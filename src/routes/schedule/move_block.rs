use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        BlockId, GridColumn, GridRow, ScheduleAPIError, ScheduleBlock,
    },
    services::{spawn_write, WriteOp},
    AppState,
};

#[tracing::instrument(name = "Move block route handler", skip_all)]
pub async fn move_block(
    State(state): State<AppState>,
    Json(request): Json<MoveBlockRequest>,
) -> Result<Json<MoveBlockResponse>, ScheduleAPIError> {
    let id = BlockId::new(request.id);
    let row = GridRow::parse(request.row)?;
    let column = GridColumn::parse(request.column)?;

    let manager_id = {
        let scheduler = state.scheduler.read().await;
        scheduler
            .scope()
            .ok_or(ScheduleAPIError::ScopeNotLoaded)?
            .manager_id
    };

    let result = state
        .scheduler
        .write()
        .await
        .move_block(&id, row, column);

    match result {
        Ok(moved) => {
            spawn_write(
                state.clone(),
                manager_id,
                WriteOp::Update(moved.clone()),
            );
            Ok(Json(MoveBlockResponse {
                moved: true,
                block: Some(moved),
            }))
        }
        // Target cell has no day in this month; the block snaps back
        Err(ScheduleAPIError::OutOfRange(_)) => {
            Ok(Json(MoveBlockResponse {
                moved: false,
                block: None,
            }))
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct MoveBlockRequest {
    pub id: uuid::Uuid,
    pub row: i16,
    pub column: i16,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct MoveBlockResponse {
    pub moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<ScheduleBlock>,
}
