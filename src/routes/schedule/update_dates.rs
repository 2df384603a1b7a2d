use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{BlockId, DateAnimation, ScheduleAPIError, ScheduleBlock},
    services::{spawn_write, WriteOp},
    AppState,
};

#[tracing::instrument(name = "Update block dates route handler", skip_all)]
pub async fn update_dates(
    State(state): State<AppState>,
    Json(request): Json<UpdateDatesRequest>,
) -> Result<Json<UpdateDatesResponse>, ScheduleAPIError> {
    let id = BlockId::new(request.id);

    let manager_id = {
        let scheduler = state.scheduler.read().await;
        scheduler
            .scope()
            .ok_or(ScheduleAPIError::ScopeNotLoaded)?
            .manager_id
    };

    let (updated, animation) =
        state.scheduler.write().await.update_dates(
            &id,
            request.start_date,
            request.end_date,
        )?;

    spawn_write(
        state.clone(),
        manager_id,
        WriteOp::Update(updated.clone()),
    );

    Ok(Json(UpdateDatesResponse {
        duration_ms: animation.duration().as_millis() as u64,
        animation,
        block: updated,
    }))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateDatesRequest {
    pub id: uuid::Uuid,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct UpdateDatesResponse {
    pub block: ScheduleBlock,
    pub animation: DateAnimation,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}
