use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    domain::{
        BlockKind, Employee, GridRow, ScheduleAPIError, ScheduleBlock,
        TimeOfDay, ValidationError,
    },
    services::{spawn_write, WriteOp},
    AppState,
};

#[tracing::instrument(name = "Add block route handler", skip_all)]
pub async fn add_block(
    State(state): State<AppState>,
    Json(request): Json<AddBlockRequest>,
) -> Result<(StatusCode, Json<ScheduleBlock>), ScheduleAPIError> {
    let (scope, policy) = {
        let scheduler = state.scheduler.read().await;
        let scope = scheduler
            .scope()
            .cloned()
            .ok_or(ScheduleAPIError::ScopeNotLoaded)?;
        (scope, *scheduler.policy())
    };

    let kind: BlockKind = request.block_type.parse()?;
    let start_time = request
        .start_time
        .as_deref()
        .map(TimeOfDay::parse)
        .transpose()?;
    let end_time = request
        .end_time
        .as_deref()
        .map(TimeOfDay::parse)
        .transpose()?;
    let employee = Employee::parse(
        request.first_name,
        request.last_name,
        request.photo_url,
    )?;

    // The creation form only offers dates inside the displayed month
    for date in [request.start_date, request.end_date] {
        if !scope.month.contains(date) {
            return Err(ValidationError::new(format!(
                "{date} falls outside the displayed month {}",
                scope.month
            ))
            .into());
        }
    }

    let block = ScheduleBlock::new(
        kind,
        request.start_date,
        request.end_date,
        start_time,
        end_time,
        GridRow::parse(request.row)?,
        employee,
        scope.job_title.clone(),
        &policy,
    )?;

    state
        .scheduler
        .write()
        .await
        .add_block(block.clone())?;

    spawn_write(
        state.clone(),
        scope.manager_id,
        WriteOp::Create(block.clone()),
    );

    Ok((StatusCode::CREATED, Json(block)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct AddBlockRequest {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    pub row: i16,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}
