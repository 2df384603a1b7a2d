use std::sync::Arc;
use tokio::sync::RwLock;

use shift_planner::{
    app_state::AppState,
    domain::ValidationPolicy,
    get_postgres_pool,
    services::{data_stores::PostgresBlockStore, Scheduler},
    utils::constants::{prod, DATABASE_URL, VALIDATION_POLICY},
    utils::tracing::init_tracing,
    Application,
};

#[tokio::main]
async fn main() {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialise tracing");

    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool");
    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run database migrations");

    let policy: ValidationPolicy = *VALIDATION_POLICY;
    let scheduler = Arc::new(RwLock::new(Scheduler::new(policy)));
    let block_store =
        Arc::new(RwLock::new(PostgresBlockStore::new(pg_pool)));

    let app_state = AppState::new(scheduler, block_store);

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}
