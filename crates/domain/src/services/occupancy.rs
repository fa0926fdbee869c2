//! Grid reconciliation: which reservation occupies a (day, column) cell.
//!
//! Everything in this module is a pure function over the fetched lists.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use shared::TranslationKey;

use crate::models::planner::{CellTone, ColumnId, OccupancyConflict, OccupancySummary};
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::models::suite::Suite;

/// Whether a reservation qualifies for a cell under the reconciliation rules.
///
/// - Day-Use column: check-in == check-out == day.
/// - Suite column: same suite, not a day-use stay, and day within
///   `[check_in, check_out]` inclusive of both boundary days.
pub fn occupies(reservation: &Reservation, day: NaiveDate, column: &ColumnId) -> bool {
    match column {
        ColumnId::DayUse => reservation.is_day_use() && reservation.check_in == day,
        ColumnId::Suite(suite_id) => {
            reservation.suite_id == *suite_id
                && !reservation.is_day_use()
                && reservation.covers(day)
        }
    }
}

/// The reservation occupying a cell, if any.
///
/// When several reservations qualify the first one in list order wins.
pub fn occupancy<'a>(
    day: NaiveDate,
    column: &ColumnId,
    reservations: &'a [Reservation],
) -> Option<&'a Reservation> {
    reservations.iter().find(|r| occupies(r, day, column))
}

/// Cells claimed by more than one reservation, ordered by day then column.
///
/// Covers double bookings inside a suite and day-use collisions.
pub fn find_conflicts(reservations: &[Reservation]) -> Vec<OccupancyConflict> {
    let mut claims: BTreeMap<(NaiveDate, String), Vec<String>> = BTreeMap::new();

    for reservation in reservations {
        if !reservation.has_valid_range() {
            continue;
        }
        let column = if reservation.is_day_use() {
            ColumnId::DayUse
        } else {
            ColumnId::suite(reservation.suite_id.clone())
        };
        for day in reservation.check_in.iter_days() {
            if day > reservation.check_out {
                break;
            }
            claims
                .entry((day, column.as_str().to_string()))
                .or_default()
                .push(reservation.id.clone());
        }
    }

    claims
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((day, column), reservation_ids)| OccupancyConflict {
            day,
            column: ColumnId::from(column),
            reservation_ids,
        })
        .collect()
}

/// Visual treatment of an occupied cell.
pub fn status_tone(status: &ReservationStatus) -> CellTone {
    match status {
        ReservationStatus::Request => CellTone::Request,
        ReservationStatus::Confirmed => CellTone::Confirmed,
        ReservationStatus::InProgress => CellTone::InProgress,
        ReservationStatus::Finished => CellTone::Finished,
        ReservationStatus::Canceled => CellTone::Canceled,
        ReservationStatus::Other(_) => CellTone::Muted,
    }
}

/// Translation key for a status label. Unknown statuses have none and are
/// shown verbatim.
pub fn status_label_key(status: &ReservationStatus) -> Option<TranslationKey> {
    match status {
        ReservationStatus::Request => Some(TranslationKey::StatusRequest),
        ReservationStatus::Confirmed => Some(TranslationKey::StatusConfirmed),
        ReservationStatus::InProgress => Some(TranslationKey::StatusInProgress),
        ReservationStatus::Finished => Some(TranslationKey::StatusFinished),
        ReservationStatus::Canceled => Some(TranslationKey::StatusCanceled),
        ReservationStatus::Other(s) if s == "pendente" => Some(TranslationKey::StatusPending),
        ReservationStatus::Other(_) => None,
    }
}

/// How many suites are occupied on `day`.
///
/// Only confirmed and in-progress stays whose range contains the day count.
pub fn occupancy_summary(
    day: NaiveDate,
    suites: &[Suite],
    reservations: &[Reservation],
) -> OccupancySummary {
    let known: BTreeSet<&str> = suites.iter().map(|s| s.id.as_str()).collect();
    let occupied: BTreeSet<&str> = reservations
        .iter()
        .filter(|r| r.status.counts_as_occupied() && r.covers(day))
        .map(|r| r.suite_id.as_str())
        .filter(|id| known.contains(id))
        .collect();

    let total_suites = suites.len();
    let occupied_count = occupied.len();
    let percentage = if total_suites > 0 {
        ((occupied_count as f64 / total_suites as f64) * 100.0).round() as u32
    } else {
        0
    };

    OccupancySummary {
        day,
        occupied_suite_ids: occupied.into_iter().map(str::to_string).collect(),
        total_suites,
        occupied: occupied_count,
        percentage,
    }
}
