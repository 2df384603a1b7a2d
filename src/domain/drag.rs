use super::{BlockId, GridColumn, GridRow, ViewMode, DEFAULT_CELL_SIZE};

/// Where a drag gesture stands. A controller is `Idle` until a pointer
/// grabs a block, `Dragging` until release or abort.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        block_id: BlockId,
        origin_row: GridRow,
        origin_column: GridColumn,
        delta_x: f64,
        delta_y: f64,
    },
}

/// What a released gesture asks of the orchestrator. `Reverted` means
/// the block snaps back with no state change and no error.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Moved {
        block_id: BlockId,
        row: GridRow,
        column: GridColumn,
    },
    Reverted,
}

/// Tracks one block being dragged across the grid. The drag itself is a
/// visual preview; nothing mutates until the drop resolves in-bounds,
/// and even then the controller only emits a move request.
#[derive(Debug)]
pub struct DragController {
    cell_size: u32,
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl DragController {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts a gesture. Worker view is read-only: the drag silently
    /// refuses to start, matching the grid's disabled drag sources.
    pub fn begin(
        &mut self,
        block_id: BlockId,
        origin_row: GridRow,
        origin_column: GridColumn,
        mode: ViewMode,
    ) -> bool {
        if !mode.can_edit() || self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging {
            block_id,
            origin_row,
            origin_column,
            delta_x: 0.0,
            delta_y: 0.0,
        };
        true
    }

    /// Records the pointer's offset from the drag origin.
    pub fn track(&mut self, dx: f64, dy: f64) {
        if let DragState::Dragging {
            delta_x, delta_y, ..
        } = &mut self.state
        {
            *delta_x = dx;
            *delta_y = dy;
        }
    }

    /// Resolves the gesture. An out-of-bounds target reverts; an
    /// in-bounds one becomes a move request for the orchestrator.
    pub fn release(&mut self) -> DropOutcome {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        let DragState::Dragging {
            block_id,
            origin_row,
            origin_column,
            delta_x,
            delta_y,
        } = state
        else {
            return DropOutcome::Reverted;
        };

        let cell = self.cell_size as f64;
        let new_column =
            origin_column.value_of() + (delta_x / cell).round() as i16;
        let new_row = origin_row.value_of() + (delta_y / cell).round() as i16;

        match (GridRow::parse(new_row), GridColumn::parse(new_column)) {
            (Ok(row), Ok(column)) => DropOutcome::Moved {
                block_id,
                row,
                column,
            },
            _ => DropOutcome::Reverted,
        }
    }

    /// Aborts the gesture; equivalent to an out-of-bounds drop.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
