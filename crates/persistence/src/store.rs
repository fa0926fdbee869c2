//! Postgres implementation of the planner store.

use chrono::NaiveDate;
use sqlx::PgPool;

use domain::models::reservation::Reservation;
use domain::models::suite::Suite;
use domain::services::store::{PlannerStore, StoreError};

use crate::repositories::{ReservationRepository, SuiteRepository};

/// Foreign key violation and invalid text representation.
const REJECTED_SQLSTATES: [&str; 2] = ["23503", "22P02"];

fn map_read_error(e: sqlx::Error) -> StoreError {
    tracing::error!(error = %e, "Planner read failed");
    StoreError::Unavailable(e.to_string())
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .is_some_and(|code| REJECTED_SQLSTATES.contains(&code.as_ref())) =>
        {
            StoreError::Rejected(db_err.message().to_string())
        }
        _ => {
            tracing::error!(error = %e, "Planner write failed");
            StoreError::Unavailable(e.to_string())
        }
    }
}

/// Store backed by the `suites`, `hospedes` and `reservas` tables.
#[derive(Clone)]
pub struct PgPlannerStore {
    pool: PgPool,
    suites: SuiteRepository,
    reservations: ReservationRepository,
}

impl PgPlannerStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            suites: SuiteRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait::async_trait]
impl PlannerStore for PgPlannerStore {
    async fn fetch_suites(&self) -> Result<Vec<Suite>, StoreError> {
        let entities = self.suites.find_all().await.map_err(map_read_error)?;
        Ok(entities.into_iter().map(Suite::from).collect())
    }

    async fn fetch_reservations(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, StoreError> {
        let entities = self
            .reservations
            .find_overlapping(start, end)
            .await
            .map_err(map_read_error)?;
        Ok(entities.into_iter().map(Reservation::from).collect())
    }

    async fn update_reservation_suite(
        &self,
        reservation_id: &str,
        suite_id: &str,
    ) -> Result<(), StoreError> {
        if !self.suites.exists(suite_id).await.map_err(map_read_error)? {
            return Err(StoreError::Rejected(format!("unknown suite {suite_id}")));
        }
        let updated = self
            .reservations
            .update_suite(reservation_id, suite_id)
            .await
            .map_err(map_write_error)?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("reservation {reservation_id}")));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::metrics::record_pool_metrics(&self.pool);
        self.suites.ping().await.map_err(map_read_error)
    }
}
