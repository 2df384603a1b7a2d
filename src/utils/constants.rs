use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;
use std::time::Duration;

use crate::domain::{ValidationPolicy, DEFAULT_CELL_SIZE};

lazy_static! {
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
    pub static ref CELL_SIZE: u32 =
        load_number(env::CELL_SIZE_ENV_VAR, DEFAULT_CELL_SIZE);
    pub static ref PERSIST_TIMEOUT: Duration = Duration::from_millis(
        load_number(env::PERSIST_TIMEOUT_MS_ENV_VAR, 10_000)
    );
    pub static ref VALIDATION_POLICY: ValidationPolicy = ValidationPolicy {
        require_ordered_times: load_flag(
            env::REQUIRE_ORDERED_TIMES_ENV_VAR,
            true
        ),
        reject_overlaps: load_flag(env::REJECT_OVERLAPS_ENV_VAR, false),
    };
}

fn load_env() {
    dotenv().ok();
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url =
        std_env::var(env::DATABASE_URL_ENV_VAR).expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

fn load_number<T: std::str::FromStr>(variable_name: &str, default_value: T) -> T {
    load_env();
    std_env::var(variable_name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default_value)
}

fn load_flag(variable_name: &str, default_value: bool) -> bool {
    load_env();
    match std_env::var(variable_name) {
        Ok(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default_value,
    }
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const CELL_SIZE_ENV_VAR: &str = "CELL_SIZE";
    pub const PERSIST_TIMEOUT_MS_ENV_VAR: &str = "PERSIST_TIMEOUT_MS";
    pub const REQUIRE_ORDERED_TIMES_ENV_VAR: &str = "REQUIRE_ORDERED_TIMES";
    pub const REJECT_OVERLAPS_ENV_VAR: &str = "REJECT_OVERLAPS";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
