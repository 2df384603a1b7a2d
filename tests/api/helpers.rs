use reqwest::Response;
use serde_json::Value;
use shift_planner::{
    app_state::{AppState, BlockStoreType, SchedulerType},
    domain::{BlockStore, ManagerId, ValidationPolicy},
    services::{data_stores::InMemoryBlockStore, Scheduler},
    utils::constants::test,
    Application,
};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub manager_id: Uuid,
    pub block_store: BlockStoreType,
    pub scheduler: SchedulerType,
}

impl TestApp {
    pub async fn new() -> Self {
        let scheduler: SchedulerType = Arc::new(RwLock::new(
            Scheduler::new(ValidationPolicy::default()),
        ));
        let block_store: BlockStoreType =
            Arc::new(RwLock::new(InMemoryBlockStore::default()));

        let app_state =
            AppState::new(scheduler.clone(), block_store.clone());

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        Self {
            address,
            http_client: reqwest::Client::new(),
            manager_id: Uuid::new_v4(),
            block_store,
            scheduler,
        }
    }

    pub async fn post_load<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/schedule/load", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_grid(&self, selected_date: Option<&str>) -> Response {
        let mut request = self
            .http_client
            .get(format!("{}/schedule/grid", &self.address));
        if let Some(date) = selected_date {
            request = request.query(&[("selectedDate", date)]);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn post_block<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/schedule/blocks", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_move<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/schedule/blocks/move", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_drop<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/schedule/blocks/drop", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_dates<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/schedule/blocks/dates", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_block(&self, id: &str) -> Response {
        self.http_client
            .delete(format!("{}/schedule/blocks", &self.address))
            .query(&[("id", id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_all(&self) -> Response {
        self.http_client
            .delete(format!("{}/schedule/all", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_export(&self) -> Response {
        self.http_client
            .get(format!("{}/schedule/export", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_import(&self, sheet: &str) -> Response {
        self.http_client
            .post(format!("{}/schedule/import", &self.address))
            .body(sheet.to_owned())
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_status(&self) -> Response {
        self.http_client
            .get(format!("{}/schedule/status", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_retry(&self) -> Response {
        self.http_client
            .post(format!("{}/schedule/retry", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Records currently persisted for this test's manager.
    pub async fn stored_records(&self) -> Vec<Value> {
        let records = self
            .block_store
            .read()
            .await
            .list_blocks(&ManagerId::new(self.manager_id))
            .await
            .expect("Failed to list persisted blocks");
        records
            .into_iter()
            .map(|record| {
                serde_json::to_value(record)
                    .expect("Record should serialize")
            })
            .collect()
    }

    /// Persistence is fire-and-forget; poll until the backing
    /// collection reaches the expected size.
    pub async fn wait_for_store_count(&self, expected: usize) {
        for _ in 0..100 {
            if self.stored_records().await.len() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "Store never reached {expected} records; has {}",
            self.stored_records().await.len()
        );
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {}
}

pub async fn load_schedule(app: &mut TestApp, view: Option<&str>) {
    let mut body = serde_json::json!({
        "managerId": app.manager_id,
        "jobTitle": "Chef",
        "month": "2024-01"
    });
    if let Some(view) = view {
        body["view"] = serde_json::json!(view);
    }

    let response = app.post_load(&body).await;
    assert_eq!(
        response.status().as_u16(),
        200,
        "Failed to load schedule"
    );
}

pub async fn add_full_day_block(
    app: &mut TestApp,
    start_date: &str,
    end_date: &str,
    row: i16,
) -> String {
    let response = app
        .post_block(&serde_json::json!({
            "type": "Full Day Block",
            "startDate": start_date,
            "endDate": end_date,
            "startTime": "09:00",
            "endTime": "17:00",
            "row": row,
            "firstName": "Jane",
            "lastName": "Doe"
        }))
        .await;

    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to create block"
    );

    let body = get_json_response_body(response).await;
    body.get("id")
        .expect("No id in response")
        .as_str()
        .expect("id should be a string")
        .to_owned()
}

pub async fn get_json_response_body(response: Response) -> Value {
    let body: Value = response
        .json()
        .await
        .expect("failed to parse response body JSON");
    body
}

/// Plants a persisted record directly in the backing store, bypassing
/// the API. Lets worker-view tests start with data they could not
/// create themselves.
pub async fn seed_block(app: &TestApp, day: u32, row: i16) -> Uuid {
    use shift_planner::domain::BlockRecord;

    let id = Uuid::new_v4();
    let record = BlockRecord {
        id,
        kind: "Full Day Block".to_string(),
        start_date: format!("2024-01-{day:02}T00:00:00Z"),
        end_date: format!("2024-01-{day:02}T00:00:00Z"),
        start_time: Some("09:00".to_string()),
        end_time: Some("17:00".to_string()),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        photo_url: None,
        row,
        job_title: "Chef".to_string(),
    };
    app.block_store
        .write()
        .await
        .create_block(&ManagerId::new(app.manager_id), record)
        .await
        .expect("Failed to seed block");
    id
}
