use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::BlockStore;
use crate::services::Scheduler;

pub type BlockStoreType = Arc<RwLock<dyn BlockStore + Send + Sync>>;
pub type SchedulerType = Arc<RwLock<Scheduler>>;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: SchedulerType,
    pub block_store: BlockStoreType,
}

impl AppState {
    pub fn new(scheduler: SchedulerType, block_store: BlockStoreType) -> Self {
        Self {
            scheduler,
            block_store,
        }
    }
}
