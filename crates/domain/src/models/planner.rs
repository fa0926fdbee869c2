//! Planner grid view models.
//!
//! These types are derived on every render and never persisted.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::validation::DAY_USE_COLUMN_ID;
use shared::MonthKey;

use super::suite::Suite;

/// Identification color of the synthetic Day-Use column.
pub const DAY_USE_COLOR: &str = "#FF69B4";

/// Column identity in the planner grid.
///
/// The Day-Use column is synthetic: only [`ColumnId::Suite`] ids can be
/// written back to storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnId {
    Suite(String),
    DayUse,
}

impl ColumnId {
    pub fn suite(id: impl Into<String>) -> Self {
        ColumnId::Suite(id.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ColumnId::Suite(id) => id,
            ColumnId::DayUse => DAY_USE_COLUMN_ID,
        }
    }

    pub fn is_day_use(&self) -> bool {
        matches!(self, ColumnId::DayUse)
    }

    /// The real suite id, if this is not the Day-Use column.
    pub fn suite_id(&self) -> Option<&str> {
        match self {
            ColumnId::Suite(id) => Some(id),
            ColumnId::DayUse => None,
        }
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        if s == DAY_USE_COLUMN_ID {
            ColumnId::DayUse
        } else {
            ColumnId::Suite(s)
        }
    }
}

impl From<ColumnId> for String {
    fn from(id: ColumnId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column header of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerColumn {
    pub id: ColumnId,
    pub name: String,
    pub color: Option<String>,
}

impl PlannerColumn {
    pub fn from_suite(suite: &Suite) -> Self {
        Self {
            id: ColumnId::suite(suite.id.clone()),
            name: suite.name.clone(),
            color: suite.identification_color.clone(),
        }
    }

    pub fn day_use(name: impl Into<String>) -> Self {
        Self {
            id: ColumnId::DayUse,
            name: name.into(),
            color: Some(DAY_USE_COLOR.to_string()),
        }
    }
}

/// Visual treatment of a cell. Presentation layers map these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellTone {
    Request,
    Confirmed,
    InProgress,
    Finished,
    Canceled,
    Muted,
    Empty,
}

/// Which part of a stay a cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayEdge {
    CheckIn,
    Stay,
    CheckOut,
    SingleDay,
}

/// Popover details for an occupied cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReservation {
    pub reservation_id: String,
    pub label: String,
    pub guest_name: Option<String>,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<String>,
    pub edge: StayEdge,
    pub draggable: bool,
    pub dragging: bool,
    pub route: String,
}

/// One (day, column) intersection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub column: ColumnId,
    pub tone: CellTone,
    pub highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<CellReservation>,
}

/// One calendar day of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub day: NaiveDate,
    pub label: String,
    pub weekday: String,
    pub is_today: bool,
    pub cells: Vec<GridCell>,
}

/// Legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub tone: CellTone,
    pub label: String,
}

/// Cell claimed by more than one reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyConflict {
    pub day: NaiveDate,
    pub column: ColumnId,
    pub reservation_ids: Vec<String>,
}

/// Fully reconciled month view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerGrid {
    pub month: MonthKey,
    pub title: String,
    pub month_label: String,
    pub today_label: String,
    pub date_column_label: String,
    pub columns: Vec<PlannerColumn>,
    pub rows: Vec<GridRow>,
    pub legend: Vec<LegendEntry>,
    pub drag_hint: String,
    pub conflicts: Vec<OccupancyConflict>,
    pub load_error: bool,
}

impl PlannerGrid {
    /// Looks up a cell by day and column.
    pub fn cell(&self, day: NaiveDate, column: &ColumnId) -> Option<&GridCell> {
        self.rows
            .iter()
            .find(|row| row.day == day)
            .and_then(|row| row.cells.iter().find(|cell| &cell.column == column))
    }

    /// Reservation id shown in a cell, if any.
    pub fn reservation_at(&self, day: NaiveDate, column: &ColumnId) -> Option<&str> {
        self.cell(day, column)
            .and_then(|cell| cell.reservation.as_ref())
            .map(|r| r.reservation_id.as_str())
    }
}

/// Occupancy of the house on a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySummary {
    pub day: NaiveDate,
    pub occupied_suite_ids: Vec<String>,
    pub total_suites: usize,
    pub occupied: usize,
    pub percentage: u32,
}
