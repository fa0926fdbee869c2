//! Planner services: data fetching, grid reconciliation and drag handling.

pub mod drag;
pub mod fetcher;
pub mod grid;
pub mod notification;
pub mod occupancy;
pub mod planner;
pub mod store;

pub use drag::{DragCoordinator, DragError, DragState, DropOutcome, MoveCommand};
pub use fetcher::{DataFetcher, ReservationCache};
pub use grid::{build_grid, DragVisual};
pub use notification::{
    LoggingNotificationService, MockNotificationService, Notice, NoticeKind, NotificationResult,
    NotificationService,
};
pub use occupancy::{find_conflicts, occupancy, occupancy_summary, status_tone};
pub use planner::{
    affected_months, occupancy_on, LoadOutcome, MoveOutcome, Navigation, OccupancyPlanner,
    PlannerError,
};
pub use store::{InMemoryPlannerStore, PlannerStore, StoreError};
