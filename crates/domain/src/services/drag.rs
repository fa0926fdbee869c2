//! Drag-and-drop state machine for moving a reservation to another suite.
//!
//! The coordinator is synchronous and holds no I/O. A drop that should be
//! committed yields a [`MoveCommand`]; the planner session performs the
//! remote write and then calls [`DragCoordinator::finish`].

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::planner::ColumnId;
use crate::models::reservation::Reservation;

use super::grid::DragVisual;

/// Errors raised by drag transitions that the current state does not allow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragError {
    #[error("Day-use reservations cannot be dragged")]
    DayUseNotDraggable,

    #[error("Reservation {reservation_id} is not shown in column {column}")]
    NotInColumn {
        reservation_id: String,
        column: String,
    },

    #[error("A drag is already in progress")]
    AlreadyDragging,

    #[error("No drag in progress")]
    NotDragging,

    #[error("A move is being committed")]
    CommitInProgress,
}

/// Snapshot of the reservation being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggedReservation {
    pub id: String,
    pub suite_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl From<&Reservation> for DraggedReservation {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.clone(),
            suite_id: r.suite_id.clone(),
            check_in: r.check_in,
            check_out: r.check_out,
        }
    }
}

/// Drag lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        reservation: DraggedReservation,
    },
    HoveringCell {
        reservation: DraggedReservation,
        day: NaiveDate,
        suite_id: String,
    },
    Committing {
        reservation: DraggedReservation,
        target_suite_id: String,
    },
}

/// Remote write requested by a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub reservation: DraggedReservation,
    pub target_suite_id: String,
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Commit(MoveCommand),
    /// Dropped on the same suite or on the Day-Use column.
    NoOp,
}

/// One drag at a time per planner session.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    fn dragged(&self) -> Option<&DraggedReservation> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { reservation }
            | DragState::HoveringCell { reservation, .. }
            | DragState::Committing { reservation, .. } => Some(reservation),
        }
    }

    fn active_drag(&self) -> Result<DraggedReservation, DragError> {
        match &self.state {
            DragState::Idle => Err(DragError::NotDragging),
            DragState::Committing { .. } => Err(DragError::CommitInProgress),
            DragState::Dragging { reservation } | DragState::HoveringCell { reservation, .. } => {
                Ok(reservation.clone())
            }
        }
    }

    /// Starts dragging a reservation shown in `column`.
    pub fn pick_up(&mut self, reservation: &Reservation, column: &ColumnId) -> Result<(), DragError> {
        match self.state {
            DragState::Idle => {}
            DragState::Committing { .. } => return Err(DragError::CommitInProgress),
            _ => return Err(DragError::AlreadyDragging),
        }

        let suite_id = column.suite_id().ok_or(DragError::DayUseNotDraggable)?;
        if reservation.is_day_use() {
            return Err(DragError::DayUseNotDraggable);
        }
        if reservation.suite_id != suite_id {
            return Err(DragError::NotInColumn {
                reservation_id: reservation.id.clone(),
                column: column.to_string(),
            });
        }

        self.state = DragState::Dragging {
            reservation: reservation.into(),
        };
        Ok(())
    }

    /// Pointer entered a cell. The Day-Use column never becomes a target.
    pub fn hover(&mut self, day: NaiveDate, column: &ColumnId) -> Result<(), DragError> {
        let reservation = self.active_drag()?;
        self.state = match column.suite_id() {
            Some(suite_id) => DragState::HoveringCell {
                reservation,
                day,
                suite_id: suite_id.to_string(),
            },
            None => DragState::Dragging { reservation },
        };
        Ok(())
    }

    /// Pointer left the hovered cell.
    pub fn leave(&mut self) {
        if let DragState::HoveringCell { reservation, .. } = &self.state {
            self.state = DragState::Dragging {
                reservation: reservation.clone(),
            };
        }
    }

    /// Drops the dragged reservation on a cell.
    ///
    /// Only a real suite different from the current one produces a commit;
    /// anything else returns to idle.
    pub fn drop_on(&mut self, column: &ColumnId) -> Result<DropOutcome, DragError> {
        let reservation = self.active_drag()?;

        match column.suite_id() {
            Some(target) if target != reservation.suite_id => {
                let target_suite_id = target.to_string();
                self.state = DragState::Committing {
                    reservation: reservation.clone(),
                    target_suite_id: target_suite_id.clone(),
                };
                Ok(DropOutcome::Commit(MoveCommand {
                    reservation,
                    target_suite_id,
                }))
            }
            _ => {
                self.state = DragState::Idle;
                Ok(DropOutcome::NoOp)
            }
        }
    }

    /// Drag ended without a drop. Returns whether a drag was cleared.
    ///
    /// A commit in flight is not affected.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            DragState::Dragging { .. } | DragState::HoveringCell { .. } => {
                self.state = DragState::Idle;
                true
            }
            DragState::Idle | DragState::Committing { .. } => false,
        }
    }

    /// Commit acknowledged (successfully or not).
    pub fn finish(&mut self) {
        if matches!(self.state, DragState::Committing { .. }) {
            self.state = DragState::Idle;
        }
    }

    /// Transient visuals for the grid.
    pub fn visual(&self) -> DragVisual {
        let hovered_cell = match &self.state {
            DragState::HoveringCell { day, suite_id, .. } => {
                Some((*day, ColumnId::suite(suite_id.clone())))
            }
            _ => None,
        };
        DragVisual {
            dragged_reservation_id: self.dragged().map(|r| r.id.clone()),
            hovered_cell,
        }
    }
}
