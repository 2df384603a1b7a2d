use crate::helpers::{
    add_full_day_block, get_json_response_body, load_schedule,
    seed_block, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_create_a_block_and_persist_it(app: &mut TestApp) {
    load_schedule(app, None).await;

    let response = app
        .post_block(&json!({
            "type": "Full Day Block",
            "startDate": "2024-01-03",
            "endDate": "2024-01-03",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 0,
            "firstName": "Jane",
            "lastName": "Doe"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);

    let schema = json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "type": "object",
        "properties": {
            "id": { "type": "string", "minLength": 36, "maxLength": 36 },
            "type": {
                "type": "string",
                "enum": ["Full Day Block", "Off Day Block", "Vacation Block"]
            },
            "startDate": { "type": "string" },
            "endDate": { "type": "string" },
            "row": { "type": "number" },
            "jobTitle": { "type": "string" }
        },
        "required": ["id", "type", "startDate", "endDate", "row", "jobTitle"]
    });
    let body = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&schema, &body),
        "response does not match schema: {body}"
    );
    assert_eq!(body.get("jobTitle").unwrap(), "Chef");

    app.wait_for_store_count(1).await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_before_a_schedule_is_loaded(app: &mut TestApp) {
    let response = app
        .post_block(&json!({
            "type": "Full Day Block",
            "startDate": "2024-01-03",
            "endDate": "2024-01-03",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 0,
            "firstName": "Jane",
            "lastName": "Doe"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_blocks(app: &mut TestApp) {
    load_schedule(app, None).await;

    let test_cases = [
        // Vacation blocks take no times
        json!({
            "type": "Vacation Block",
            "startDate": "2024-01-03",
            "endDate": "2024-01-04",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 0,
            "firstName": "Jane",
            "lastName": "Doe"
        }),
        // Full day blocks need both times
        json!({
            "type": "Full Day Block",
            "startDate": "2024-01-03",
            "endDate": "2024-01-03",
            "startTime": "09:00",
            "row": 0,
            "firstName": "Jane",
            "lastName": "Doe"
        }),
        // Reversed dates
        json!({
            "type": "Full Day Block",
            "startDate": "2024-01-05",
            "endDate": "2024-01-03",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 0,
            "firstName": "Jane",
            "lastName": "Doe"
        }),
        // Reversed times
        json!({
            "type": "Full Day Block",
            "startDate": "2024-01-03",
            "endDate": "2024-01-03",
            "startTime": "17:00",
            "endTime": "09:00",
            "row": 0,
            "firstName": "Jane",
            "lastName": "Doe"
        }),
        // Dates outside the loaded month
        json!({
            "type": "Full Day Block",
            "startDate": "2024-02-03",
            "endDate": "2024-02-03",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 0,
            "firstName": "Jane",
            "lastName": "Doe"
        }),
        // Row below the grid
        json!({
            "type": "Full Day Block",
            "startDate": "2024-01-03",
            "endDate": "2024-01-03",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 14,
            "firstName": "Jane",
            "lastName": "Doe"
        }),
        // Names are letters and spaces only
        json!({
            "type": "Full Day Block",
            "startDate": "2024-01-03",
            "endDate": "2024-01-03",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 0,
            "firstName": "Jane42",
            "lastName": "Doe"
        }),
    ];

    for body in test_cases.iter() {
        let response = app.post_block(body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail for input: {body}"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn moving_a_block_keeps_its_span(app: &mut TestApp) {
    load_schedule(app, None).await;
    // Four days starting at column 2
    let id = add_full_day_block(app, "2024-01-03", "2024-01-06", 0).await;

    let response = app
        .put_move(&json!({ "id": id, "row": 3, "column": 10 }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("moved").unwrap(), true);
    let block = body.get("block").unwrap();
    assert_eq!(block.get("startDate").unwrap(), "2024-01-11");
    assert_eq!(block.get("endDate").unwrap(), "2024-01-14");
    assert_eq!(block.get("row").unwrap(), 3);
}

#[test_context(TestApp)]
#[tokio::test]
async fn moving_an_unknown_block_is_404(app: &mut TestApp) {
    load_schedule(app, None).await;
    let response = app
        .put_move(&json!({
            "id": uuid::Uuid::new_v4(),
            "row": 0,
            "column": 0
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn moving_outside_the_grid_is_400(app: &mut TestApp) {
    load_schedule(app, None).await;
    let id = add_full_day_block(app, "2024-01-03", "2024-01-03", 0).await;

    for (row, column) in [(-1, 0), (14, 0), (0, -1), (0, 31)] {
        let response = app
            .put_move(&json!({ "id": id, "row": row, "column": column }))
            .await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should reject row {row}, column {column}"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn dropping_a_block_moves_it_by_whole_cells(app: &mut TestApp) {
    load_schedule(app, None).await;
    let id = add_full_day_block(app, "2024-01-03", "2024-01-03", 0).await;

    // One cell right, two cells down, with some pointer jitter
    let response = app
        .post_drop(&json!({ "id": id, "deltaX": 83.0, "deltaY": 157.0 }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("moved").unwrap(), true);
    let block = body.get("block").unwrap();
    assert_eq!(block.get("startDate").unwrap(), "2024-01-04");
    assert_eq!(block.get("row").unwrap(), 2);
}

#[test_context(TestApp)]
#[tokio::test]
async fn dropping_out_of_bounds_leaves_the_block_alone(app: &mut TestApp) {
    load_schedule(app, None).await;
    let id = add_full_day_block(app, "2024-01-03", "2024-01-03", 0).await;

    // Column 2 minus 3 cells is off the left edge
    let response = app
        .post_drop(&json!({ "id": id, "deltaX": -240.0, "deltaY": 0.0 }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("moved").unwrap(), false);

    // Unchanged in the grid
    let grid = get_json_response_body(app.get_grid(None).await).await;
    let blocks = grid.get("blocks").unwrap().as_array().unwrap();
    assert_eq!(blocks[0].get("leftPx").unwrap(), 160);
    assert_eq!(blocks[0].get("topPx").unwrap(), 0);
}

#[test_context(TestApp)]
#[tokio::test]
async fn deleting_twice_is_a_noop(app: &mut TestApp) {
    load_schedule(app, None).await;
    let id = add_full_day_block(app, "2024-01-03", "2024-01-03", 0).await;
    app.wait_for_store_count(1).await;

    let response = app.delete_block(&id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("deleted").unwrap(), true);

    let response = app.delete_block(&id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("deleted").unwrap(), false);

    app.wait_for_store_count(0).await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn delete_all_clears_the_scope(app: &mut TestApp) {
    load_schedule(app, None).await;
    add_full_day_block(app, "2024-01-03", "2024-01-03", 0).await;
    add_full_day_block(app, "2024-01-05", "2024-01-06", 1).await;
    app.wait_for_store_count(2).await;

    let response = app.delete_all().await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("deleted").unwrap(), 2);

    app.wait_for_store_count(0).await;
    let grid = get_json_response_body(app.get_grid(None).await).await;
    assert!(grid.get("blocks").unwrap().as_array().unwrap().is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn editing_dates_returns_the_animation_plan(app: &mut TestApp) {
    load_schedule(app, None).await;
    let id = add_full_day_block(app, "2024-01-03", "2024-01-04", 0).await;

    let response = app
        .put_dates(&json!({
            "id": id,
            "startDate": "2024-01-08",
            "endDate": "2024-01-09"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("block").unwrap().get("startDate").unwrap(), "2024-01-08");
    // Five days of travel at 50 ms per day
    assert_eq!(body.get("durationMs").unwrap(), 250);
    let animation = body.get("animation").unwrap();
    assert_eq!(animation.get("fromDate").unwrap(), "2024-01-03");
    assert_eq!(animation.get("toDate").unwrap(), "2024-01-08");
}

#[test_context(TestApp)]
#[tokio::test]
async fn worker_view_is_read_only(app: &mut TestApp) {
    let id = seed_block(app, 3, 0).await;
    load_schedule(app, Some("worker")).await;

    let add = app
        .post_block(&json!({
            "type": "Full Day Block",
            "startDate": "2024-01-10",
            "endDate": "2024-01-10",
            "startTime": "09:00",
            "endTime": "17:00",
            "row": 1,
            "firstName": "Jane",
            "lastName": "Doe"
        }))
        .await;
    assert_eq!(add.status().as_u16(), 403);

    let moved = app
        .put_move(&json!({ "id": id, "row": 1, "column": 5 }))
        .await;
    assert_eq!(moved.status().as_u16(), 403);

    let deleted = app.delete_block(&id.to_string()).await;
    assert_eq!(deleted.status().as_u16(), 403);

    let cleared = app.delete_all().await;
    assert_eq!(cleared.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn worker_view_drops_are_silently_ignored(app: &mut TestApp) {
    let id = seed_block(app, 3, 0).await;
    load_schedule(app, Some("worker")).await;

    let response = app
        .post_drop(&json!({ "id": id, "deltaX": 160.0, "deltaY": 0.0 }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("moved").unwrap(), false);

    let grid = get_json_response_body(app.get_grid(None).await).await;
    let blocks = grid.get("blocks").unwrap().as_array().unwrap();
    assert_eq!(blocks[0].get("leftPx").unwrap(), 160);
}
