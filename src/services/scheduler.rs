use std::collections::HashSet;
use thiserror::Error;

use crate::domain::{
    interchange::ScheduleRow, BlockId, BlockRecord, DateAnimation,
    GridColumn, GridRow, ImportFormatError, ScheduleAPIError,
    ScheduleBlock, ScheduleScope, ValidationError, ValidationPolicy,
    ViewMode,
};

/// Identifies one load request. Only the newest token may replace the
/// collection; anything older is a superseded load whose response gets
/// dropped on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// A load response that arrived after a newer load started. Discarded,
/// never surfaced to the user.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Load superseded by a newer request")]
pub struct StaleLoadError;

/// Owns the in-memory block collection for the active scope and
/// dispatches every mutation. Mutations are synchronous; persistence
/// runs behind them, and ids whose persist failed stay marked dirty
/// until a retry lands.
#[derive(Debug)]
pub struct Scheduler {
    scope: Option<ScheduleScope>,
    mode: ViewMode,
    blocks: Vec<ScheduleBlock>,
    dirty: HashSet<BlockId>,
    load_generation: u64,
    policy: ValidationPolicy,
}

impl Scheduler {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            scope: None,
            mode: ViewMode::default(),
            blocks: Vec::new(),
            dirty: HashSet::new(),
            load_generation: 0,
            policy,
        }
    }

    pub fn scope(&self) -> Option<&ScheduleScope> {
        self.scope.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn blocks(&self) -> &[ScheduleBlock] {
        &self.blocks
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn get(&self, id: &BlockId) -> Option<&ScheduleBlock> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    fn require_scope(&self) -> Result<&ScheduleScope, ScheduleAPIError> {
        self.scope.as_ref().ok_or(ScheduleAPIError::ScopeNotLoaded)
    }

    fn require_editable(&self) -> Result<(), ScheduleAPIError> {
        if self.mode.can_edit() {
            Ok(())
        } else {
            Err(ScheduleAPIError::ReadOnlyMode)
        }
    }

    /// Starts a load for a new scope. The previous collection stays
    /// visible until the matching `complete_load` replaces it.
    pub fn begin_load(
        &mut self,
        scope: ScheduleScope,
        mode: ViewMode,
    ) -> LoadToken {
        self.load_generation += 1;
        self.scope = Some(scope);
        self.mode = mode;
        LoadToken(self.load_generation)
    }

    /// Installs the records fetched for `token`'s load. A token that is
    /// no longer the newest means a faster load already finished after
    /// it; its records must not overwrite the fresher ones.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        records: Vec<BlockRecord>,
    ) -> Result<usize, StaleLoadError> {
        if token.0 != self.load_generation {
            return Err(StaleLoadError);
        }
        let Some(scope) = self.scope.as_ref() else {
            return Err(StaleLoadError);
        };

        let mut blocks = Vec::new();
        for record in records {
            let id = record.id;
            match record.into_block() {
                Ok(block) if scope.admits(&block) => blocks.push(block),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        block = %id,
                        "Dropping unreadable schedule record: {e}"
                    );
                }
            }
        }
        let count = blocks.len();
        self.blocks = blocks;
        self.dirty.clear();
        Ok(count)
    }

    pub fn add_block(
        &mut self,
        block: ScheduleBlock,
    ) -> Result<(), ScheduleAPIError> {
        self.require_scope()?;
        self.require_editable()?;
        block.validate(&self.policy)?;

        if self.get(&block.id).is_some() {
            return Err(ValidationError::new(format!(
                "Block id {} already exists",
                block.id
            ))
            .into());
        }
        self.check_overlap(&block, None)?;

        self.blocks.push(block);
        Ok(())
    }

    /// Re-anchors a block at a new lane and column, keeping its span.
    /// A column past the last day of the block's month is out of
    /// range; interactive callers treat that as a snap-back.
    pub fn move_block(
        &mut self,
        id: &BlockId,
        row: GridRow,
        column: GridColumn,
    ) -> Result<ScheduleBlock, ScheduleAPIError> {
        self.require_editable()?;
        let index = self.index_of(id)?;

        let moved = self.blocks[index].moved_to(row, column)?;
        self.check_overlap(&moved, Some(index))?;

        self.blocks[index] = moved.clone();
        Ok(moved)
    }

    /// Explicit date edit from the block's detail form. Returns the
    /// updated block plus the slide animation the view should play.
    pub fn update_dates(
        &mut self,
        id: &BlockId,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<(ScheduleBlock, DateAnimation), ScheduleAPIError> {
        self.require_editable()?;
        let index = self.index_of(id)?;

        let current = &self.blocks[index];
        let animation = DateAnimation::new(current.start_date, start_date);
        let updated = current.with_dates(start_date, end_date)?;
        self.check_overlap(&updated, Some(index))?;

        self.blocks[index] = updated.clone();
        Ok((updated, animation))
    }

    /// Removes a block. Deleting an id that is already gone is a
    /// no-op, not an error.
    pub fn delete_block(
        &mut self,
        id: &BlockId,
    ) -> Result<Option<ScheduleBlock>, ScheduleAPIError> {
        self.require_editable()?;
        let Some(index) =
            self.blocks.iter().position(|block| &block.id == id)
        else {
            return Ok(None);
        };
        self.dirty.remove(id);
        Ok(Some(self.blocks.remove(index)))
    }

    /// Empties the whole scope. Returns the ids that were removed so
    /// the caller can clear the backing collection.
    pub fn delete_all(&mut self) -> Result<Vec<BlockId>, ScheduleAPIError> {
        self.require_editable()?;
        self.dirty.clear();
        Ok(self.blocks.drain(..).map(|block| block.id).collect())
    }

    pub fn export_rows(&self) -> Vec<ScheduleRow> {
        self.blocks.iter().map(ScheduleRow::from_block).collect()
    }

    /// All-or-nothing import: every row must parse before any block
    /// lands in the collection. Imported blocks get fresh ids and the
    /// active scope's job title.
    pub fn import_rows(
        &mut self,
        rows: Vec<ScheduleRow>,
    ) -> Result<Vec<ScheduleBlock>, ScheduleAPIError> {
        let scope = self.require_scope()?;
        self.require_editable()?;

        let job_title = scope.job_title.clone();
        let mut imported = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let block = row
                .into_block(&job_title, &self.policy)
                .map_err(|e| ImportFormatError::BadRow {
                    row: index + 1,
                    message: e.as_ref().to_owned(),
                })?;
            imported.push(block);
        }
        for block in &imported {
            self.check_overlap(block, None)?;
        }

        self.blocks.extend(imported.iter().cloned());
        Ok(imported)
    }

    pub fn mark_dirty(&mut self, id: BlockId) {
        self.dirty.insert(id);
    }

    pub fn clear_dirty(&mut self, id: &BlockId) {
        self.dirty.remove(id);
    }

    pub fn dirty_ids(&self) -> Vec<BlockId> {
        let mut ids: Vec<BlockId> = self.dirty.iter().copied().collect();
        ids.sort_by_key(|id| *id.as_ref());
        ids
    }

    fn index_of(&self, id: &BlockId) -> Result<usize, ScheduleAPIError> {
        self.blocks
            .iter()
            .position(|block| &block.id == id)
            .ok_or(ScheduleAPIError::BlockNotFound(*id.as_ref()))
    }

    fn check_overlap(
        &self,
        candidate: &ScheduleBlock,
        skip_index: Option<usize>,
    ) -> Result<(), ScheduleAPIError> {
        if !self.policy.reject_overlaps {
            return Ok(());
        }
        let collision = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != skip_index)
            .find(|(_, other)| candidate.overlaps(other));
        if let Some((_, other)) = collision {
            return Err(ValidationError::new(format!(
                "Block collides with {} on row {}",
                other.id,
                other.row.value_of()
            ))
            .into());
        }
        Ok(())
    }
}
