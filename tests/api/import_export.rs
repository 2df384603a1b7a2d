use crate::helpers::{
    add_full_day_block, get_json_response_body, load_schedule, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn export_produces_a_named_csv_sheet(app: &mut TestApp) {
    load_schedule(app, None).await;
    add_full_day_block(app, "2024-01-03", "2024-01-05", 2).await;

    let response = app.get_export().await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("text/csv")
    );
    assert_eq!(
        response
            .headers()
            .get("content-disposition")
            .and_then(|value| value.to_str().ok()),
        Some(
            "attachment; filename=\"Chef-01-January-2024-Schedule.csv\""
        )
    );

    let sheet = response.text().await.expect("Failed to read body");
    let mut lines = sheet.lines();
    assert_eq!(
        lines.next(),
        Some(
            "DisplayRow,ProfilePicture,FirstName,LastName,BlockType,\
             StartTime,EndTime,StartDate,EndDate,GridRow"
        )
    );
    let row = lines.next().expect("Sheet should have one data row");
    assert!(row.contains("Jane"));
    assert!(row.contains("9:00 AM"));
    assert!(row.contains("January 3, 2024"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn exported_sheets_import_back_with_fresh_ids(app: &mut TestApp) {
    load_schedule(app, None).await;
    let original_id =
        add_full_day_block(app, "2024-01-03", "2024-01-05", 2).await;

    let sheet = app
        .get_export()
        .await
        .text()
        .await
        .expect("Failed to read sheet");

    let response = app.post_import(&sheet).await;
    assert_eq!(response.status().as_u16(), 201);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("imported").unwrap(), 1);

    // Original plus its imported copy, under a different id
    let grid = get_json_response_body(app.get_grid(None).await).await;
    let blocks = grid.get("blocks").unwrap().as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    let ids: Vec<&str> = blocks
        .iter()
        .map(|block| block.get("id").unwrap().as_str().unwrap())
        .collect();
    assert!(ids.contains(&original_id.as_str()));
    assert_eq!(
        ids.iter().filter(|id| **id == original_id).count(),
        1,
        "Imported copy must not reuse the exported id"
    );

    app.wait_for_store_count(2).await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn import_missing_a_column_rejects_the_whole_sheet(
    app: &mut TestApp,
) {
    load_schedule(app, None).await;
    add_full_day_block(app, "2024-01-03", "2024-01-03", 0).await;

    // No EndDate column
    let sheet = "DisplayRow,ProfilePicture,FirstName,LastName,BlockType,StartTime,EndTime,StartDate,GridRow\n\
                 1,None,Jane,Doe,Full Day Block,9:00 AM,5:00 PM,\"January 3, 2024\",1\n";

    let response = app.post_import(sheet).await;
    assert_eq!(response.status().as_u16(), 400);
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("error").unwrap(),
        "Missing required column: EndDate"
    );

    // Nothing changed
    let grid = get_json_response_body(app.get_grid(None).await).await;
    assert_eq!(grid.get("blocks").unwrap().as_array().unwrap().len(), 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn import_with_a_bad_row_changes_nothing(app: &mut TestApp) {
    load_schedule(app, None).await;

    let sheet = "DisplayRow,ProfilePicture,FirstName,LastName,BlockType,StartTime,EndTime,StartDate,EndDate,GridRow\n\
                 1,None,Jane,Doe,Full Day Block,9:00 AM,5:00 PM,\"January 3, 2024\",\"January 3, 2024\",1\n\
                 2,None,Sam,Hill,Full Day Block,9:00 AM,5:00 PM,whenever,\"January 4, 2024\",2\n";

    let response = app.post_import(sheet).await;
    assert_eq!(response.status().as_u16(), 400);

    let grid = get_json_response_body(app.get_grid(None).await).await;
    assert!(grid.get("blocks").unwrap().as_array().unwrap().is_empty());
    app.wait_for_store_count(0).await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn vacation_rows_round_trip_their_placeholders(app: &mut TestApp) {
    load_schedule(app, None).await;

    let response = app
        .post_block(&json!({
            "type": "Vacation Block",
            "startDate": "2024-01-10",
            "endDate": "2024-01-12",
            "row": 4,
            "firstName": "Sam",
            "lastName": "Hill"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let sheet = app
        .get_export()
        .await
        .text()
        .await
        .expect("Failed to read sheet");
    assert!(sheet.contains("Not Applicable"));

    let response = app.post_import(&sheet).await;
    assert_eq!(response.status().as_u16(), 201);

    let grid = get_json_response_body(app.get_grid(None).await).await;
    let blocks = grid.get("blocks").unwrap().as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(blocks
        .iter()
        .all(|block| block.get("timeRange").unwrap().is_null()));
}

#[test_context(TestApp)]
#[tokio::test]
async fn import_in_worker_view_is_403(app: &mut TestApp) {
    load_schedule(app, Some("worker")).await;

    let sheet = "DisplayRow,ProfilePicture,FirstName,LastName,BlockType,StartTime,EndTime,StartDate,EndDate,GridRow\n\
                 1,None,Jane,Doe,Full Day Block,9:00 AM,5:00 PM,\"January 3, 2024\",\"January 3, 2024\",1\n";

    let response = app.post_import(sheet).await;
    assert_eq!(response.status().as_u16(), 403);
}
