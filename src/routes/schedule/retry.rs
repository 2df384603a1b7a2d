use axum::{extract::State, Json};

use crate::{
    domain::ScheduleAPIError,
    services::{retry_dirty, RetryOutcome},
    AppState,
};

/// Re-persists every block whose last write failed.
#[tracing::instrument(name = "Retry unsaved blocks route handler", skip_all)]
pub async fn retry_unsaved(
    State(state): State<AppState>,
) -> Result<Json<RetryOutcome>, ScheduleAPIError> {
    let outcome = retry_dirty(&state).await;
    Ok(Json(outcome))
}
