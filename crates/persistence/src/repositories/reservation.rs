//! Reservation repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::entities::ReservationEntity;
use crate::metrics::QueryTimer;

/// Access to the reservas table for the planner.
#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Non-canceled reservations overlapping `[start, end]`, in check-in order.
    pub async fn find_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ReservationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_overlapping_reservations");
        let result = sqlx::query_as::<_, ReservationEntity>(
            r#"
            SELECT r.id::text AS id,
                   r.hospede_id::text AS hospede_id,
                   r.suite_id::text AS suite_id,
                   r.data_checkin,
                   r.data_checkout,
                   r.numero_hospedes,
                   r.valor_total::float8 AS valor_total,
                   r.status,
                   r.codigo_booking,
                   h.nome AS hospede_nome,
                   s.nome AS suite_nome,
                   s.status AS suite_status,
                   s.cor_identificacao AS suite_cor
            FROM reservas r
            LEFT JOIN hospedes h ON h.id = r.hospede_id
            LEFT JOIN suites s ON s.id = r.suite_id
            WHERE r.status <> 'cancelada'
              AND r.data_checkin <= $2
              AND r.data_checkout >= $1
            ORDER BY r.data_checkin, r.created_at, r.id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Points a reservation at another suite. Returns the number of rows
    /// updated (0 when the reservation does not exist).
    pub async fn update_suite(
        &self,
        reservation_id: &str,
        suite_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_reservation_suite");
        let result = sqlx::query(
            r#"
            UPDATE reservas
            SET suite_id = $2::uuid
            WHERE id::text = $1
            "#,
        )
        .bind(reservation_id)
        .bind(suite_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
