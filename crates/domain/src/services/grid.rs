//! Builds the rendered planner grid from fetched data.

use chrono::{Datelike, NaiveDate};
use shared::format::{first_name, format_brl, format_date};
use shared::{MonthKey, TranslationKey, Translator};

use crate::models::planner::{
    CellReservation, CellTone, ColumnId, GridCell, GridRow, LegendEntry, PlannerColumn,
    PlannerGrid, StayEdge,
};
use crate::models::reservation::Reservation;
use crate::models::suite::Suite;

use super::occupancy::{find_conflicts, occupancy, status_label_key, status_tone};

/// Transient drag visuals overlaid on the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragVisual {
    pub dragged_reservation_id: Option<String>,
    pub hovered_cell: Option<(NaiveDate, ColumnId)>,
}

/// Route of the reservation detail page.
pub fn reservation_route(reservation_id: &str) -> String {
    format!("/reservas/{reservation_id}")
}

/// Grid columns: suites in the given order, then the Day-Use column.
pub fn planner_columns(suites: &[Suite], translator: &Translator) -> Vec<PlannerColumn> {
    suites
        .iter()
        .map(PlannerColumn::from_suite)
        .chain(std::iter::once(PlannerColumn::day_use(
            translator.t(TranslationKey::DayUse),
        )))
        .collect()
}

/// Reconciles every (day, column) cell of `month`.
pub fn build_grid(
    month: MonthKey,
    today: NaiveDate,
    suites: &[Suite],
    reservations: &[Reservation],
    translator: &Translator,
    drag: &DragVisual,
    load_error: bool,
) -> PlannerGrid {
    let columns = planner_columns(suites, translator);

    let rows = month
        .days()
        .into_iter()
        .map(|day| GridRow {
            day,
            label: translator.day_label(day),
            weekday: translator.weekday_label(day.weekday()).to_string(),
            is_today: day == today,
            cells: columns
                .iter()
                .map(|column| build_cell(day, &column.id, reservations, translator, drag))
                .collect(),
        })
        .collect();

    let conflicts = find_conflicts(reservations)
        .into_iter()
        .filter(|c| month.contains(c.day))
        .collect::<Vec<_>>();
    for conflict in &conflicts {
        tracing::warn!(
            day = %conflict.day,
            column = %conflict.column,
            reservations = ?conflict.reservation_ids,
            "Overlapping reservations in one planner cell, showing the first"
        );
    }

    PlannerGrid {
        month,
        title: translator.t(TranslationKey::PlannerTitle),
        month_label: translator.month_label(month.year(), month.month()),
        today_label: translator.t(TranslationKey::Today),
        date_column_label: translator.t(TranslationKey::DateColumn),
        columns,
        rows,
        legend: legend(translator),
        drag_hint: translator.t(TranslationKey::DragHint),
        conflicts,
        load_error,
    }
}

fn build_cell(
    day: NaiveDate,
    column: &ColumnId,
    reservations: &[Reservation],
    translator: &Translator,
    drag: &DragVisual,
) -> GridCell {
    let highlighted = drag
        .hovered_cell
        .as_ref()
        .is_some_and(|(d, c)| *d == day && c == column);

    match occupancy(day, column, reservations) {
        Some(reservation) => GridCell {
            column: column.clone(),
            tone: status_tone(&reservation.status),
            highlighted,
            reservation: Some(cell_reservation(
                reservation,
                day,
                column,
                translator,
                drag.dragged_reservation_id.as_deref() == Some(reservation.id.as_str()),
            )),
        },
        None => GridCell {
            column: column.clone(),
            tone: CellTone::Empty,
            highlighted,
            reservation: None,
        },
    }
}

fn cell_reservation(
    reservation: &Reservation,
    day: NaiveDate,
    column: &ColumnId,
    translator: &Translator,
    dragging: bool,
) -> CellReservation {
    let edge = if reservation.is_day_use() {
        StayEdge::SingleDay
    } else if day == reservation.check_in {
        StayEdge::CheckIn
    } else if day == reservation.check_out {
        StayEdge::CheckOut
    } else {
        StayEdge::Stay
    };

    let status_label = status_label_key(&reservation.status)
        .map(|key| translator.t(key))
        .unwrap_or_else(|| reservation.status.as_str().to_string());

    CellReservation {
        reservation_id: reservation.id.clone(),
        label: reservation
            .guest_name
            .as_deref()
            .map(first_name)
            .unwrap_or_default()
            .to_string(),
        guest_name: reservation.guest_name.clone(),
        check_in: format_date(reservation.check_in),
        check_out: format_date(reservation.check_out),
        status: reservation.status.as_str().to_string(),
        status_label,
        value: reservation.total_value.map(format_brl),
        guests: reservation
            .guest_count
            .map(|n| format!("{n} {}", translator.t(TranslationKey::Guests))),
        edge,
        draggable: !column.is_day_use(),
        dragging,
        route: reservation_route(&reservation.id),
    }
}

/// Legend shown below the grid. Canceled stays are never fetched, so the
/// canceled tone has no entry.
pub fn legend(translator: &Translator) -> Vec<LegendEntry> {
    [
        (CellTone::InProgress, TranslationKey::StatusInProgress),
        (CellTone::Confirmed, TranslationKey::StatusConfirmed),
        (CellTone::Request, TranslationKey::StatusRequest),
        (CellTone::Finished, TranslationKey::StatusFinished),
        (CellTone::Muted, TranslationKey::StatusOther),
        (CellTone::Empty, TranslationKey::Available),
    ]
    .into_iter()
    .map(|(tone, key)| LegendEntry {
        tone,
        label: translator.t(key),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ReservationStatus;
    use shared::Language;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn reservation(id: &str, suite: &str, check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation {
            id: id.to_string(),
            guest_id: "g1".to_string(),
            suite_id: suite.to_string(),
            check_in,
            check_out,
            guest_count: Some(2),
            total_value: Some(1234.5),
            status: ReservationStatus::Confirmed,
            external_code: Some("BK-1".to_string()),
            guest_name: Some("Giulia Rossi".to_string()),
            suite: None,
        }
    }

    fn suites() -> Vec<Suite> {
        vec![Suite::new("s2", "Azul"), Suite::new("s1", "Verde")]
    }

    fn pt() -> Translator {
        Translator::new(Language::Pt)
    }

    #[test]
    fn test_grid_shape() {
        let grid = build_grid(
            march(),
            date(2024, 3, 5),
            &suites(),
            &[],
            &pt(),
            &DragVisual::default(),
            false,
        );

        assert_eq!(grid.rows.len(), 31);
        assert_eq!(grid.columns.len(), 3);
        assert_eq!(grid.columns[2].id, ColumnId::DayUse);
        assert_eq!(grid.columns[2].name, "Day-Use");
        assert!(grid.rows[4].is_today);
        assert!(!grid.rows[3].is_today);
        assert!(grid
            .rows
            .iter()
            .all(|row| row.cells.iter().all(|c| c.tone == CellTone::Empty)));
    }

    #[test]
    fn test_scenario_regular_stay() {
        let reservations = vec![reservation("r1", "s1", date(2024, 3, 10), date(2024, 3, 12))];
        let grid = build_grid(
            march(),
            date(2024, 3, 1),
            &suites(),
            &reservations,
            &pt(),
            &DragVisual::default(),
            false,
        );

        let s1 = ColumnId::suite("s1");
        let s2 = ColumnId::suite("s2");
        for d in 1..=31 {
            let day = date(2024, 3, d);
            let expected = (10..=12).contains(&d).then_some("r1");
            assert_eq!(grid.reservation_at(day, &s1), expected, "day {d}");
            assert_eq!(grid.reservation_at(day, &s2), None);
        }

        let edges: Vec<StayEdge> = (10..=12)
            .map(|d| {
                grid.cell(date(2024, 3, d), &s1)
                    .and_then(|c| c.reservation.as_ref())
                    .map(|r| r.edge)
                    .unwrap()
            })
            .collect();
        assert_eq!(
            edges,
            vec![StayEdge::CheckIn, StayEdge::Stay, StayEdge::CheckOut]
        );
    }

    #[test]
    fn test_scenario_day_use_stay() {
        let reservations = vec![reservation("r2", "s1", date(2024, 3, 15), date(2024, 3, 15))];
        let grid = build_grid(
            march(),
            date(2024, 3, 1),
            &suites(),
            &reservations,
            &pt(),
            &DragVisual::default(),
            false,
        );

        let day = date(2024, 3, 15);
        assert_eq!(grid.reservation_at(day, &ColumnId::DayUse), Some("r2"));
        assert_eq!(grid.reservation_at(day, &ColumnId::suite("s1")), None);

        let cell = grid.cell(day, &ColumnId::DayUse).unwrap();
        let details = cell.reservation.as_ref().unwrap();
        assert!(!details.draggable);
        assert_eq!(details.edge, StayEdge::SingleDay);
    }

    #[test]
    fn test_popover_details() {
        let reservations = vec![reservation("r1", "s1", date(2024, 3, 10), date(2024, 3, 12))];
        let grid = build_grid(
            march(),
            date(2024, 3, 1),
            &suites(),
            &reservations,
            &Translator::new(Language::It),
            &DragVisual::default(),
            false,
        );
        let cell = grid.cell(date(2024, 3, 11), &ColumnId::suite("s1")).unwrap();
        let details = cell.reservation.as_ref().unwrap();

        assert_eq!(cell.tone, CellTone::Confirmed);
        assert_eq!(details.label, "Giulia");
        assert_eq!(details.check_in, "10/03/2024");
        assert_eq!(details.check_out, "12/03/2024");
        assert_eq!(details.status_label, "Confermata");
        assert_eq!(details.value.as_deref(), Some("R$\u{a0}1.234,50"));
        assert_eq!(details.guests.as_deref(), Some("2 ospiti"));
        assert_eq!(details.route, "/reservas/r1");
        assert!(details.draggable);
    }

    #[test]
    fn test_unknown_status_renders_muted_with_raw_label() {
        let mut r = reservation("r1", "s1", date(2024, 3, 10), date(2024, 3, 12));
        r.status = ReservationStatus::Other("bloqueada".to_string());
        let grid = build_grid(
            march(),
            date(2024, 3, 1),
            &suites(),
            &[r],
            &pt(),
            &DragVisual::default(),
            false,
        );
        let cell = grid.cell(date(2024, 3, 10), &ColumnId::suite("s1")).unwrap();
        assert_eq!(cell.tone, CellTone::Muted);
        assert_eq!(cell.reservation.as_ref().unwrap().status_label, "bloqueada");
    }

    #[test]
    fn test_drag_visuals() {
        let reservations = vec![reservation("r1", "s1", date(2024, 3, 10), date(2024, 3, 12))];
        let drag = DragVisual {
            dragged_reservation_id: Some("r1".to_string()),
            hovered_cell: Some((date(2024, 3, 11), ColumnId::suite("s2"))),
        };
        let grid = build_grid(
            march(),
            date(2024, 3, 1),
            &suites(),
            &reservations,
            &pt(),
            &drag,
            false,
        );

        let hovered = grid.cell(date(2024, 3, 11), &ColumnId::suite("s2")).unwrap();
        assert!(hovered.highlighted);
        let other = grid.cell(date(2024, 3, 12), &ColumnId::suite("s2")).unwrap();
        assert!(!other.highlighted);

        let dragged = grid.cell(date(2024, 3, 10), &ColumnId::suite("s1")).unwrap();
        assert!(dragged.reservation.as_ref().unwrap().dragging);
    }

    #[test]
    fn test_conflicts_listed_for_displayed_month_only() {
        let reservations = vec![
            reservation("a", "s1", date(2024, 2, 27), date(2024, 3, 1)),
            reservation("b", "s1", date(2024, 2, 28), date(2024, 2, 29)),
            reservation("c", "s1", date(2024, 3, 20), date(2024, 3, 22)),
            reservation("d", "s1", date(2024, 3, 22), date(2024, 3, 23)),
        ];
        let grid = build_grid(
            march(),
            date(2024, 3, 1),
            &suites(),
            &reservations,
            &pt(),
            &DragVisual::default(),
            false,
        );
        assert_eq!(grid.conflicts.len(), 1);
        assert_eq!(grid.conflicts[0].day, date(2024, 3, 22));
        assert_eq!(grid.reservation_at(date(2024, 3, 22), &ColumnId::suite("s1")), Some("c"));
    }

    #[test]
    fn test_legend_covers_visible_statuses() {
        let entries = legend(&pt());
        let tones: Vec<CellTone> = entries.iter().map(|e| e.tone).collect();
        assert_eq!(
            tones,
            vec![
                CellTone::InProgress,
                CellTone::Confirmed,
                CellTone::Request,
                CellTone::Finished,
                CellTone::Muted,
                CellTone::Empty,
            ]
        );
        assert_eq!(entries[0].label, "Em Andamento");
        assert_eq!(entries[4].label, "Outro status");
        assert!(entries.iter().all(|e| e.tone != CellTone::Canceled));
    }
}
