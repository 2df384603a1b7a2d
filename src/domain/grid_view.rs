use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{
    BlockKind, CalendarMonth, GridGeometry, GridRow, ScheduleBlock,
    ViewMode, BAND_ROWS, COLUMN_COUNT,
};

/// One cell of the date header strip. Columns past the month's last
/// day are rendered but inert: no date, not clickable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHeader {
    pub column: i16,
    pub weekday: Option<String>,
    #[serde(rename = "dayOfMonth")]
    pub day_of_month: Option<u32>,
    pub selected: bool,
    pub inert: bool,
}

/// One worker lane inside a band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneView {
    pub row: i16,
    #[serde(rename = "topPx")]
    pub top_px: u32,
    pub shaded: bool,
}

/// One of the two stacked 7-row bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandView {
    #[serde(rename = "topPx")]
    pub top_px: u32,
    pub lanes: Vec<LaneView>,
}

/// A block absolutely positioned over the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    pub id: uuid::Uuid,
    pub kind: BlockKind,
    #[serde(rename = "leftPx")]
    pub left_px: u32,
    #[serde(rename = "topPx")]
    pub top_px: u32,
    #[serde(rename = "widthPx")]
    pub width_px: u32,
    #[serde(rename = "heightPx")]
    pub height_px: u32,
    pub label: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
    pub continues: bool,
    pub draggable: bool,
}

/// The full visual tree of one month view: header strip, two row
/// bands, positioned blocks, and the optional selected-date marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub month: String,
    pub mode: ViewMode,
    #[serde(rename = "cellSize")]
    pub cell_size: u32,
    pub days: Vec<DayHeader>,
    pub bands: Vec<BandView>,
    pub blocks: Vec<BlockView>,
    #[serde(rename = "selectedMarkerLeft")]
    pub selected_marker_left: Option<u32>,
}

/// Lays the month view out in pixels. Pure: same inputs, same tree.
pub fn render(
    blocks: &[ScheduleBlock],
    month: CalendarMonth,
    selected_date: Option<NaiveDate>,
    mode: ViewMode,
    geometry: &GridGeometry,
) -> GridView {
    let days = (0..COLUMN_COUNT)
        .map(|column| {
            let date = month.day(column as u32 + 1);
            DayHeader {
                column,
                weekday: date.map(|d| d.format("%a").to_string()),
                day_of_month: date.map(|d| d.day()),
                selected: date.is_some() && date == selected_date,
                inert: date.is_none(),
            }
        })
        .collect();

    let bands = [0, BAND_ROWS]
        .into_iter()
        .map(|first_row| {
            let lanes = (first_row..first_row + BAND_ROWS)
                .map(|row| {
                    let row = GridRow::parse(row)
                        .expect("Band rows stay inside the grid");
                    LaneView {
                        row: row.value_of(),
                        top_px: geometry.pixel_top(row),
                        // Last lane of each band is shaded
                        shaded: row.value_of() % BAND_ROWS
                            == BAND_ROWS - 1,
                    }
                })
                .collect::<Vec<_>>();
            BandView {
                top_px: lanes
                    .first()
                    .map(|lane| lane.top_px)
                    .unwrap_or_default(),
                lanes,
            }
        })
        .collect();

    let block_views = blocks
        .iter()
        .filter_map(|block| {
            let column = match geometry
                .column_for_date(block.start_date, month)
            {
                Ok(column) => column,
                Err(e) => {
                    tracing::debug!(
                        block = %block.id,
                        "Skipping block outside the rendered month: {e}"
                    );
                    return None;
                }
            };
            let time_range = match (&block.start_time, &block.end_time) {
                (Some(start), Some(end)) => Some(format!(
                    "{} - {}",
                    start.twelve_hour(),
                    end.twelve_hour()
                )),
                _ => None,
            };
            Some(BlockView {
                id: *block.id.as_ref(),
                kind: block.kind,
                left_px: geometry.pixel_left(column),
                top_px: geometry.pixel_top(block.row),
                width_px: geometry
                    .block_width(block.start_date, block.end_date),
                height_px: geometry.cell_size(),
                label: block.employee.display_name(),
                photo_url: block.employee.photo_url.clone(),
                time_range,
                continues: block.continues_past_month(),
                draggable: mode.can_edit(),
            })
        })
        .collect();

    let selected_marker_left = selected_date
        .and_then(|date| geometry.column_for_date(date, month).ok())
        .map(|column| geometry.marker_left(column));

    GridView {
        month: month.to_string(),
        mode,
        cell_size: geometry.cell_size(),
        days,
        bands,
        blocks: block_views,
        selected_marker_left,
    }
}
