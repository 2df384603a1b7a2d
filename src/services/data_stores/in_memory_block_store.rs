use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{
    BlockId, BlockRecord, BlockStore, BlockStoreError, ManagerId,
};

/// Block store held entirely in process memory, keyed by manager and
/// then by block id. Backs the test suite and local development.
#[derive(Default)]
pub struct InMemoryBlockStore {
    collections: HashMap<ManagerId, HashMap<Uuid, BlockRecord>>,
}

#[async_trait::async_trait]
impl BlockStore for InMemoryBlockStore {
    async fn list_blocks(
        &self,
        manager_id: &ManagerId,
    ) -> Result<Vec<BlockRecord>, BlockStoreError> {
        Ok(self
            .collections
            .get(manager_id)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_block(
        &mut self,
        manager_id: &ManagerId,
        record: BlockRecord,
    ) -> Result<(), BlockStoreError> {
        let collection =
            self.collections.entry(*manager_id).or_default();
        if collection.contains_key(&record.id) {
            return Err(BlockStoreError::BlockIdExists);
        }
        collection.insert(record.id, record);
        Ok(())
    }

    async fn update_block(
        &mut self,
        manager_id: &ManagerId,
        record: BlockRecord,
    ) -> Result<(), BlockStoreError> {
        self.collections
            .entry(*manager_id)
            .or_default()
            .insert(record.id, record);
        Ok(())
    }

    async fn delete_block(
        &mut self,
        manager_id: &ManagerId,
        id: &BlockId,
    ) -> Result<(), BlockStoreError> {
        if let Some(collection) = self.collections.get_mut(manager_id) {
            collection.remove(id.as_ref());
        }
        Ok(())
    }

    async fn delete_all_blocks(
        &mut self,
        manager_id: &ManagerId,
    ) -> Result<(), BlockStoreError> {
        self.collections.remove(manager_id);
        Ok(())
    }
}
