use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        BlockId, DragController, DropOutcome, ScheduleAPIError,
        ScheduleBlock,
    },
    services::{spawn_write, WriteOp},
    utils::constants::CELL_SIZE,
    AppState,
};

/// Resolves a drag-and-drop gesture. Out-of-bounds targets and worker
/// view both answer with a plain "nothing moved" — the block snaps
/// back, no error surfaces.
#[tracing::instrument(name = "Drop block route handler", skip_all)]
pub async fn drop_block(
    State(state): State<AppState>,
    Json(request): Json<DropBlockRequest>,
) -> Result<Json<DropBlockResponse>, ScheduleAPIError> {
    let id = BlockId::new(request.id);

    let (manager_id, mode, origin) = {
        let scheduler = state.scheduler.read().await;
        let manager_id = scheduler
            .scope()
            .ok_or(ScheduleAPIError::ScopeNotLoaded)?
            .manager_id;
        let block = scheduler
            .get(&id)
            .ok_or(ScheduleAPIError::BlockNotFound(request.id))?;
        (
            manager_id,
            scheduler.mode(),
            (block.row, block.start_column()),
        )
    };

    let mut controller = DragController::new(*CELL_SIZE);
    if !controller.begin(id, origin.0, origin.1, mode) {
        return Ok(Json(DropBlockResponse {
            moved: false,
            block: None,
        }));
    }
    controller.track(request.delta_x, request.delta_y);

    let (row, column) = match controller.release() {
        DropOutcome::Moved { row, column, .. } => (row, column),
        DropOutcome::Reverted => {
            return Ok(Json(DropBlockResponse {
                moved: false,
                block: None,
            }));
        }
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
            Ok(Json(DropBlockResponse {
                moved: true,
                block: Some(moved),
            }))
        }
        Err(ScheduleAPIError::OutOfRange(_)) => {
            Ok(Json(DropBlockResponse {
                moved: false,
                block: None,
            }))
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct DropBlockRequest {
    pub id: uuid::Uuid,
    #[serde(rename = "deltaX")]
    pub delta_x: f64,
    #[serde(rename = "deltaY")]
    pub delta_y: f64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DropBlockResponse {
    pub moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<ScheduleBlock>,
}
