use color_eyre::eyre::eyre;
use sqlx::{PgPool, Row};

use crate::domain::{
    BlockId, BlockRecord, BlockStore, BlockStoreError, ManagerId,
};

/// Block store backed by PostgreSQL. Rows are addressed by the block's
/// own id, so updates and deletes never scan the collection.
pub struct PostgresBlockStore {
    pool: PgPool,
}

impl PostgresBlockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: &sqlx::postgres::PgRow) -> BlockRecord {
    BlockRecord {
        id: row.get("id"),
        kind: row.get("block_type"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        start_time: row.get("start_time"),
        end_time: row.get("end_time"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        photo_url: row.get("photo_url"),
        row: row.get("grid_row"),
        job_title: row.get("job_title"),
    }
}

#[async_trait::async_trait]
impl BlockStore for PostgresBlockStore {
    #[tracing::instrument(
        name = "Listing schedule blocks from PostgreSQL",
        skip_all
    )]
    async fn list_blocks(
        &self,
        manager_id: &ManagerId,
    ) -> Result<Vec<BlockRecord>, BlockStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, block_type, start_date, end_date, start_time,
                   end_time, first_name, last_name, photo_url, grid_row,
                   job_title
            FROM schedule_blocks
            WHERE manager_id = $1
            "#,
        )
        .bind(manager_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BlockStoreError::UnexpectedError(eyre!(e)))?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    #[tracing::instrument(
        name = "Adding schedule block to PostgreSQL",
        skip_all
    )]
    async fn create_block(
        &mut self,
        manager_id: &ManagerId,
        record: BlockRecord,
    ) -> Result<(), BlockStoreError> {
        sqlx::query(
            r#"
            INSERT INTO schedule_blocks
                (id, manager_id, block_type, start_date, end_date,
                 start_time, end_time, first_name, last_name, photo_url,
                 grid_row, job_title)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(record.id)
        .bind(manager_id.as_ref())
        .bind(&record.kind)
        .bind(&record.start_date)
        .bind(&record.end_date)
        .bind(&record.start_time)
        .bind(&record.end_time)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.photo_url)
        .bind(record.row)
        .bind(&record.job_title)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                BlockStoreError::BlockIdExists
            }
            e => BlockStoreError::UnexpectedError(eyre!(e)),
        })?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Upserting schedule block in PostgreSQL",
        skip_all
    )]
    async fn update_block(
        &mut self,
        manager_id: &ManagerId,
        record: BlockRecord,
    ) -> Result<(), BlockStoreError> {
        sqlx::query(
            r#"
            INSERT INTO schedule_blocks
                (id, manager_id, block_type, start_date, end_date,
                 start_time, end_time, first_name, last_name, photo_url,
                 grid_row, job_title)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                block_type = EXCLUDED.block_type,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                photo_url = EXCLUDED.photo_url,
                grid_row = EXCLUDED.grid_row,
                job_title = EXCLUDED.job_title
            "#,
        )
        .bind(record.id)
        .bind(manager_id.as_ref())
        .bind(&record.kind)
        .bind(&record.start_date)
        .bind(&record.end_date)
        .bind(&record.start_time)
        .bind(&record.end_time)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.photo_url)
        .bind(record.row)
        .bind(&record.job_title)
        .execute(&self.pool)
        .await
        .map_err(|e| BlockStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting schedule block from PostgreSQL",
        skip_all
    )]
    async fn delete_block(
        &mut self,
        manager_id: &ManagerId,
        id: &BlockId,
    ) -> Result<(), BlockStoreError> {
        sqlx::query(
            r#"
            DELETE FROM schedule_blocks
            WHERE id = $1 AND manager_id = $2
            "#,
        )
        .bind(id.as_ref())
        .bind(manager_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| BlockStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Clearing schedule collection in PostgreSQL",
        skip_all
    )]
    async fn delete_all_blocks(
        &mut self,
        manager_id: &ManagerId,
    ) -> Result<(), BlockStoreError> {
        sqlx::query(
            r#"
            DELETE FROM schedule_blocks WHERE manager_id = $1
            "#,
        )
        .bind(manager_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| BlockStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }
}
