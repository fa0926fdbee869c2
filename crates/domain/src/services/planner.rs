//! Occupancy planner session.
//!
//! A session owns the displayed month, the data loaded for it and one drag
//! coordinator. Session state sits behind a mutex that is released before
//! every store call, so a slow fetch never blocks drag events.

use std::sync::Arc;

use chrono::NaiveDate;
use metrics::counter;
use serde::{Deserialize, Serialize};
use shared::{MonthKey, TranslationKey, Translator};
use thiserror::Error;
use tokio::sync::Mutex;
use validator::Validate;

use crate::models::planner::{ColumnId, OccupancySummary, PlannerGrid};
use crate::models::reservation::{MoveReservationRequest, Reservation};
use crate::models::suite::Suite;

use super::drag::{
    DragCoordinator, DragError, DragState, DraggedReservation, DropOutcome, MoveCommand,
};
use super::fetcher::DataFetcher;
use super::grid::{build_grid, reservation_route};
use super::notification::{Notice, NotificationResult, NotificationService};
use super::occupancy::{occupancy, occupancy_summary};
use super::store::StoreError;

/// Errors returned by planner session operations.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Drag(#[from] DragError),

    #[error("Reservation {0} is not shown in the displayed month")]
    ReservationNotFound(String),

    #[error("Invalid move: {0}")]
    InvalidMove(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Month navigation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    Previous,
    Next,
    Today,
}

/// Outcome of a drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum MoveOutcome {
    NoOp,
    Moved {
        reservation_id: String,
        from_suite_id: String,
        to_suite_id: String,
    },
    Failed {
        reservation_id: String,
        error: String,
    },
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// The displayed month changed while the request was in flight.
    Discarded,
}

/// Identifies one load request for the stale-response guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub month: MonthKey,
    generation: u64,
    cache_version: u64,
}

/// Suites and reservations fetched for one month.
#[derive(Debug, Clone, Default)]
pub struct MonthData {
    pub suites: Vec<Suite>,
    pub reservations: Vec<Reservation>,
}

#[derive(Debug)]
struct SessionState {
    month: MonthKey,
    generation: u64,
    loaded: Option<MonthKey>,
    loaded_version: u64,
    load_error: bool,
    data: MonthData,
    drag: DragCoordinator,
    notices: Vec<Notice>,
}

/// Every month the reservation's stay touches, plus the displayed month.
pub fn affected_months(reservation: &DraggedReservation, displayed: MonthKey) -> Vec<MonthKey> {
    let mut months = MonthKey::spanning(reservation.check_in, reservation.check_out);
    if !months.contains(&displayed) {
        months.push(displayed);
    }
    months.sort();
    months
}

fn record_move(outcome: &'static str) {
    counter!("planner_moves_total", "outcome" => outcome).increment(1);
}

/// Occupancy of the house on `day`, through the shared cache.
pub async fn occupancy_on(fetcher: &DataFetcher, day: NaiveDate) -> Result<OccupancySummary, StoreError> {
    let suites = fetcher.suites().await?;
    let reservations = fetcher.reservations(MonthKey::from_date(day)).await?;
    Ok(occupancy_summary(day, &suites, &reservations))
}

/// One operator's view of the planner.
pub struct OccupancyPlanner {
    fetcher: DataFetcher,
    notifier: Arc<dyn NotificationService>,
    translator: Translator,
    state: Mutex<SessionState>,
}

impl OccupancyPlanner {
    pub fn new(
        fetcher: DataFetcher,
        notifier: Arc<dyn NotificationService>,
        translator: Translator,
        month: MonthKey,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            translator,
            state: Mutex::new(SessionState {
                month,
                generation: 0,
                loaded: None,
                loaded_version: 0,
                load_error: false,
                data: MonthData::default(),
                drag: DragCoordinator::new(),
                notices: Vec::new(),
            }),
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub async fn month(&self) -> MonthKey {
        self.state.lock().await.month
    }

    pub async fn drag_state(&self) -> DragState {
        self.state.lock().await.drag.state().clone()
    }

    /// Drains notices raised since the last call.
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().await.notices)
    }

    /// Registers a load for the displayed month.
    pub async fn begin_load(&self) -> LoadTicket {
        let (month, generation) = {
            let state = self.state.lock().await;
            (state.month, state.generation)
        };
        LoadTicket {
            month,
            generation,
            cache_version: self.fetcher.cache().version(month).await,
        }
    }

    /// Fetches the ticket's month without touching session state.
    pub async fn fetch(&self, ticket: &LoadTicket) -> Result<MonthData, StoreError> {
        let suites = self.fetcher.suites().await?;
        let reservations = self.fetcher.reservations(ticket.month).await?;
        Ok(MonthData {
            suites,
            reservations,
        })
    }

    /// Applies a fetch result unless the session moved on in the meantime.
    pub async fn complete_load(
        &self,
        ticket: LoadTicket,
        result: Result<MonthData, StoreError>,
    ) -> LoadOutcome {
        let mut state = self.state.lock().await;
        if state.month != ticket.month || state.generation != ticket.generation {
            tracing::debug!(
                requested = %ticket.month,
                displayed = %state.month,
                "Discarding stale planner response"
            );
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(data) => {
                state.data = data;
                state.loaded = Some(ticket.month);
                state.loaded_version = ticket.cache_version;
                state.load_error = false;
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(month = %ticket.month, error = %e, "Planner data unavailable");
                if state.loaded != Some(ticket.month) {
                    state.data.reservations.clear();
                }
                state.loaded = Some(ticket.month);
                state.loaded_version = ticket.cache_version;
                state.load_error = true;
                LoadOutcome::Failed
            }
        }
    }

    /// Loads the displayed month.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = self.begin_load().await;
        let result = self.fetch(&ticket).await;
        self.complete_load(ticket, result).await
    }

    /// Changes the displayed month and loads it when it differs.
    pub async fn navigate(&self, action: Navigation, today: NaiveDate) -> MonthKey {
        let month = {
            let mut state = self.state.lock().await;
            let target = match action {
                Navigation::Previous => state.month.previous(),
                Navigation::Next => state.month.next(),
                Navigation::Today => MonthKey::from_date(today),
            };
            if target == state.month {
                return target;
            }
            state.month = target;
            state.generation += 1;
            target
        };

        tracing::debug!(month = %month, "Planner month changed");
        self.load().await;
        month
    }

    /// Whether the displayed month was never loaded, or another session
    /// invalidated it since.
    async fn is_stale(&self) -> bool {
        let (month, loaded, loaded_version) = {
            let state = self.state.lock().await;
            (state.month, state.loaded, state.loaded_version)
        };
        loaded != Some(month) || self.fetcher.cache().version(month).await > loaded_version
    }

    async fn refresh_if_stale(&self) {
        if self.is_stale().await {
            self.load().await;
        }
    }

    /// Renders the displayed month, loading it first if needed.
    pub async fn grid(&self, today: NaiveDate) -> PlannerGrid {
        self.refresh_if_stale().await;

        let state = self.state.lock().await;
        build_grid(
            state.month,
            today,
            &state.data.suites,
            &state.data.reservations,
            &self.translator,
            &state.drag.visual(),
            state.load_error,
        )
    }

    /// Starts dragging a reservation from a grid cell.
    pub async fn pick_up(&self, reservation_id: &str, column: &ColumnId) -> Result<(), PlannerError> {
        self.refresh_if_stale().await;
        let mut state = self.state.lock().await;
        let SessionState { data, drag, .. } = &mut *state;
        let reservation = data
            .reservations
            .iter()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| PlannerError::ReservationNotFound(reservation_id.to_string()))?;
        drag.pick_up(reservation, column)?;
        Ok(())
    }

    pub async fn hover(&self, day: NaiveDate, column: &ColumnId) -> Result<(), PlannerError> {
        self.state.lock().await.drag.hover(day, column)?;
        Ok(())
    }

    pub async fn leave(&self) {
        self.state.lock().await.drag.leave();
    }

    pub async fn cancel(&self) -> bool {
        self.state.lock().await.drag.cancel()
    }

    /// Drops the dragged reservation on a cell and commits the move if needed.
    ///
    /// The drag is cleared whatever the store answers. The displayed month is
    /// re-fetched after the acknowledgment.
    pub async fn drop_on(&self, day: NaiveDate, column: &ColumnId) -> Result<MoveOutcome, PlannerError> {
        let (command, displayed) = {
            let mut state = self.state.lock().await;
            match state.drag.drop_on(column)? {
                DropOutcome::NoOp => {
                    record_move("noop");
                    return Ok(MoveOutcome::NoOp);
                }
                DropOutcome::Commit(command) => (command, state.month),
            }
        };

        tracing::info!(
            reservation_id = %command.reservation.id,
            from_suite = %command.reservation.suite_id,
            to_suite = %command.target_suite_id,
            day = %day,
            "Committing reservation move"
        );

        let result = self.commit(&command).await;
        self.fetcher
            .invalidate(&affected_months(&command.reservation, displayed))
            .await;

        let (outcome, notice) = match result {
            Ok(()) => {
                record_move("committed");
                (
                    MoveOutcome::Moved {
                        reservation_id: command.reservation.id.clone(),
                        from_suite_id: command.reservation.suite_id.clone(),
                        to_suite_id: command.target_suite_id.clone(),
                    },
                    Notice::success(self.translator.t(TranslationKey::MovedSuccess)),
                )
            }
            Err(e) => {
                record_move("failed");
                tracing::warn!(
                    reservation_id = %command.reservation.id,
                    error = %e,
                    "Reservation move rejected"
                );
                (
                    MoveOutcome::Failed {
                        reservation_id: command.reservation.id.clone(),
                        error: e.to_string(),
                    },
                    Notice::error(self.translator.t(TranslationKey::MovedError))
                        .with_description(e.to_string()),
                )
            }
        };
        let notice = notice.for_reservation(command.reservation.id.clone());

        {
            let mut state = self.state.lock().await;
            state.drag.finish();
            state.generation += 1;
            state.notices.push(notice.clone());
        }

        if let NotificationResult::Failed(reason) = self.notifier.notify(&notice).await {
            tracing::warn!(reason = %reason, "Failed to forward planner notice");
        }

        self.load().await;
        Ok(outcome)
    }

    async fn commit(&self, command: &MoveCommand) -> Result<(), PlannerError> {
        let request = MoveReservationRequest {
            reservation_id: command.reservation.id.clone(),
            target_suite_id: command.target_suite_id.clone(),
        };
        request.validate()?;
        self.fetcher
            .store()
            .update_reservation_suite(&request.reservation_id, &request.target_suite_id)
            .await?;
        Ok(())
    }

    /// Route to open when an occupied cell is clicked.
    pub async fn cell_route(&self, day: NaiveDate, column: &ColumnId) -> Option<String> {
        let state = self.state.lock().await;
        occupancy(day, column, &state.data.reservations).map(|r| reservation_route(&r.id))
    }
}
