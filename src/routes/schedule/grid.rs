use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    domain::{grid_view, GridGeometry, GridView, ScheduleAPIError},
    utils::constants::CELL_SIZE,
    AppState,
};

#[tracing::instrument(name = "Render grid route handler", skip_all)]
pub async fn get_grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<GridView>, ScheduleAPIError> {
    let scheduler = state.scheduler.read().await;
    let scope = scheduler
        .scope()
        .ok_or(ScheduleAPIError::ScopeNotLoaded)?;

    let view = grid_view::render(
        scheduler.blocks(),
        scope.month,
        query.selected_date,
        scheduler.mode(),
        &GridGeometry::new(*CELL_SIZE),
    );

    Ok(Json(view))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct GridQuery {
    #[serde(rename = "selectedDate")]
    pub selected_date: Option<NaiveDate>,
}
