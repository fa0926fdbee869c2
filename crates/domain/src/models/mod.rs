//! Domain models for the occupancy planner.

pub mod planner;
pub mod reservation;
pub mod suite;

pub use planner::{
    CellReservation, CellTone, ColumnId, GridCell, GridRow, LegendEntry, OccupancyConflict,
    OccupancySummary, PlannerColumn, PlannerGrid, StayEdge,
};
pub use reservation::{MoveReservationRequest, Reservation, ReservationStatus};
pub use suite::{Suite, SuiteStatus};
