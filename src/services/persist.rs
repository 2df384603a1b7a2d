use color_eyre::eyre::{eyre, Report};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::app_state::AppState;
use crate::domain::{
    BlockId, BlockRecord, BlockStore, ManagerId, ScheduleBlock,
};
use crate::utils::constants::PERSIST_TIMEOUT;

/// One write against the backing collection. The in-memory collection
/// has already changed by the time one of these exists; persistence
/// trails it.
#[derive(Debug, Clone)]
pub enum WriteOp {
    Create(ScheduleBlock),
    Update(ScheduleBlock),
    Delete(BlockId),
}

impl WriteOp {
    fn block_id(&self) -> BlockId {
        match self {
            WriteOp::Create(block) | WriteOp::Update(block) => block.id,
            WriteOp::Delete(id) => *id,
        }
    }
}

async fn apply_write(
    state: &AppState,
    manager_id: &ManagerId,
    op: &WriteOp,
) -> Result<(), Report> {
    let write = async {
        let mut store = state.block_store.write().await;
        match op {
            WriteOp::Create(block) => {
                store
                    .create_block(
                        manager_id,
                        BlockRecord::from_block(block),
                    )
                    .await
            }
            WriteOp::Update(block) => {
                store
                    .update_block(
                        manager_id,
                        BlockRecord::from_block(block),
                    )
                    .await
            }
            WriteOp::Delete(id) => {
                store.delete_block(manager_id, id).await
            }
        }
    };

    match timeout(*PERSIST_TIMEOUT, write).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(eyre!(e)),
        Err(_) => Err(eyre!("Persistence call timed out")),
    }
}

/// Fires a write without blocking the caller. The UI keeps its
/// optimistic state either way; a failed write marks the block dirty
/// so the status surface can offer a retry.
pub fn spawn_write(
    state: AppState,
    manager_id: ManagerId,
    op: WriteOp,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let id = op.block_id();
        match apply_write(&state, &manager_id, &op).await {
            Ok(()) => {
                state.scheduler.write().await.clear_dirty(&id);
            }
            Err(e) => {
                tracing::warn!(
                    block = %id,
                    "Persist failed; block marked unsaved: {e:#}"
                );
                state.scheduler.write().await.mark_dirty(id);
            }
        }
    })
}

/// Clears the backing collection behind a delete-all. If the clear
/// fails, every removed id is marked dirty so a retry deletes them
/// one by one.
pub fn spawn_clear(
    state: AppState,
    manager_id: ManagerId,
    removed: Vec<BlockId>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let clear = async {
            state
                .block_store
                .write()
                .await
                .delete_all_blocks(&manager_id)
                .await
        };
        match timeout(*PERSIST_TIMEOUT, clear).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(
                    "Clearing schedule collection failed: {e:#}"
                );
                mark_all_dirty(&state, removed).await;
            }
            Err(_) => {
                tracing::warn!("Clearing schedule collection timed out");
                mark_all_dirty(&state, removed).await;
            }
        }
    })
}

async fn mark_all_dirty(state: &AppState, ids: Vec<BlockId>) {
    let mut scheduler = state.scheduler.write().await;
    for id in ids {
        scheduler.mark_dirty(id);
    }
}

/// What a retry pass accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RetryOutcome {
    pub saved: usize,
    pub failed: usize,
}

/// Re-persists every dirty block, one write per id. A dirty id still
/// in the collection upserts; one no longer present deletes.
#[tracing::instrument(name = "Retrying unsaved blocks", skip_all)]
pub async fn retry_dirty(state: &AppState) -> RetryOutcome {
    let (manager_id, dirty) = {
        let scheduler = state.scheduler.read().await;
        let Some(scope) = scheduler.scope() else {
            return RetryOutcome {
                saved: 0,
                failed: 0,
            };
        };
        (scope.manager_id, scheduler.dirty_ids())
    };

    let mut outcome = RetryOutcome {
        saved: 0,
        failed: 0,
    };
    for id in dirty {
        let op = {
            let scheduler = state.scheduler.read().await;
            match scheduler.get(&id) {
                Some(block) => WriteOp::Update(block.clone()),
                None => WriteOp::Delete(id),
            }
        };
        match apply_write(state, &manager_id, &op).await {
            Ok(()) => {
                state.scheduler.write().await.clear_dirty(&id);
                outcome.saved += 1;
            }
            Err(e) => {
                tracing::warn!(block = %id, "Retry failed: {e:#}");
                outcome.failed += 1;
            }
        }
    }
    outcome
}
