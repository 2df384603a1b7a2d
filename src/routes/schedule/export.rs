use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
};
use color_eyre::eyre::eyre;

use crate::{
    domain::interchange::{sheet_filename, write_sheet},
    domain::ScheduleAPIError,
    AppState,
};

/// Flattens the loaded schedule into a CSV sheet download.
#[tracing::instrument(name = "Export schedule route handler", skip_all)]
pub async fn export_schedule(
    State(state): State<AppState>,
) -> Result<(HeaderMap, String), ScheduleAPIError> {
    let scheduler = state.scheduler.read().await;
    let scope = scheduler
        .scope()
        .ok_or(ScheduleAPIError::ScopeNotLoaded)?;

    let sheet = write_sheet(&scheduler.export_rows())
        .map_err(|e| ScheduleAPIError::UnexpectedError(eyre!(e)))?;
    let filename = sheet_filename(&scope.job_title, scope.month);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "attachment; filename=\"{filename}\""
        ))
        .map_err(|e| ScheduleAPIError::UnexpectedError(eyre!(e)))?,
    );

    Ok((headers, sheet))
}
