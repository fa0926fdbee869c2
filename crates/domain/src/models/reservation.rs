//! Reservation domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::suite::Suite;

/// Lifecycle status of a reservation.
///
/// Values the planner does not know (for example the legacy `pendente`) are
/// kept in [`ReservationStatus::Other`] instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Request,
    Confirmed,
    InProgress,
    Finished,
    Canceled,
    Other(String),
}

impl ReservationStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Request => "solicitacao",
            ReservationStatus::Confirmed => "confirmada",
            ReservationStatus::InProgress => "em_andamento",
            ReservationStatus::Finished => "finalizada",
            ReservationStatus::Canceled => "cancelada",
            ReservationStatus::Other(s) => s,
        }
    }

    /// Parses from database string representation. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "solicitacao" => ReservationStatus::Request,
            "confirmada" => ReservationStatus::Confirmed,
            "em_andamento" => ReservationStatus::InProgress,
            "finalizada" => ReservationStatus::Finished,
            "cancelada" => ReservationStatus::Canceled,
            other => ReservationStatus::Other(other.to_string()),
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, ReservationStatus::Canceled)
    }

    /// Whether the guest is (or will certainly be) in the house.
    pub fn counts_as_occupied(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed | ReservationStatus::InProgress
        )
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        ReservationStatus::parse(&s)
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A guest stay in one suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub guest_id: String,
    pub suite_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: Option<i32>,
    pub total_value: Option<f64>,
    pub status: ReservationStatus,
    pub external_code: Option<String>,
    /// Denormalized guest display name (read-only join).
    pub guest_name: Option<String>,
    /// Denormalized suite snapshot (read-only join).
    pub suite: Option<Suite>,
}

impl Reservation {
    /// Same-day stay, shown only in the Day-Use column.
    pub fn is_day_use(&self) -> bool {
        self.check_in == self.check_out
    }

    /// Whether `day` lies within `[check_in, check_out]`, both ends inclusive.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day <= self.check_out
    }

    /// Whether the stay intersects the inclusive window `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.check_in <= end && self.check_out >= start
    }

    /// Fetch filter: not canceled and overlapping the window.
    pub fn is_visible_in(&self, start: NaiveDate, end: NaiveDate) -> bool {
        !self.status.is_canceled() && self.overlaps(start, end)
    }

    /// Number of nights; zero for day-use stays.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }

    /// Whether the stored dates respect check-out >= check-in.
    pub fn has_valid_range(&self) -> bool {
        shared::validation::validate_date_range(self.check_in, self.check_out).is_ok()
    }
}

/// Request payload for reassigning a reservation to another suite.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveReservationRequest {
    #[validate(length(min = 1, max = 64, message = "Reservation id must be 1-64 characters"))]
    pub reservation_id: String,

    #[validate(custom(function = "shared::validation::validate_suite_id"))]
    pub target_suite_id: String,
}
