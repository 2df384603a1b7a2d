use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::time::timeout;

use crate::{
    domain::{
        BlockStore, CalendarMonth, JobTitle, ManagerId,
        ScheduleAPIError, ScheduleScope, ViewMode,
    },
    utils::constants::PERSIST_TIMEOUT,
    AppState,
};

#[tracing::instrument(name = "Load schedule route handler", skip_all)]
pub async fn load_schedule(
    State(state): State<AppState>,
    Json(request): Json<LoadScheduleRequest>,
) -> Result<(StatusCode, Json<LoadScheduleResponse>), ScheduleAPIError> {
    let manager_id = ManagerId::new(request.manager_id);
    let job_title = JobTitle::parse(request.job_title)?;
    let month = CalendarMonth::parse(&request.month)?;
    let mode = match &request.view {
        Some(view) => ViewMode::from_str(view)?,
        None => ViewMode::default(),
    };
    let scope = ScheduleScope::new(manager_id, job_title, month);

    let token = state
        .scheduler
        .write()
        .await
        .begin_load(scope, mode);

    let records = timeout(*PERSIST_TIMEOUT, async {
        state.block_store.read().await.list_blocks(&manager_id).await
    })
    .await
    .map_err(|_| {
        ScheduleAPIError::UnexpectedError(eyre!(
            "Loading schedule blocks timed out"
        ))
    })?
    .map_err(|e| ScheduleAPIError::UnexpectedError(eyre!(e)))?;

    let response = match state
        .scheduler
        .write()
        .await
        .complete_load(token, records)
    {
        Ok(count) => LoadScheduleResponse {
            count,
            superseded: false,
        },
        // A newer load finished first; this response must not
        // overwrite it.
        Err(_) => LoadScheduleResponse {
            count: 0,
            superseded: true,
        },
    };

    Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct LoadScheduleRequest {
    #[serde(rename = "managerId")]
    pub manager_id: uuid::Uuid,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    pub month: String,
    pub view: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadScheduleResponse {
    pub count: usize,
    pub superseded: bool,
}
