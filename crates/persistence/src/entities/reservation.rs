//! Reservation entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

use domain::models::reservation::{Reservation, ReservationStatus};
use domain::models::suite::{Suite, SuiteStatus};

/// Row of the reservas table joined with guest name and suite snapshot.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationEntity {
    pub id: String,
    pub hospede_id: String,
    pub suite_id: String,
    pub data_checkin: NaiveDate,
    pub data_checkout: NaiveDate,
    pub numero_hospedes: Option<i32>,
    pub valor_total: Option<f64>,
    pub status: String,
    pub codigo_booking: Option<String>,
    pub hospede_nome: Option<String>,
    pub suite_nome: Option<String>,
    pub suite_status: Option<String>,
    pub suite_cor: Option<String>,
}

impl From<ReservationEntity> for Reservation {
    fn from(entity: ReservationEntity) -> Self {
        let suite = entity.suite_nome.map(|name| Suite {
            id: entity.suite_id.clone(),
            name,
            identification_color: entity.suite_cor,
            status: entity
                .suite_status
                .as_deref()
                .and_then(SuiteStatus::parse)
                .unwrap_or(SuiteStatus::Active),
        });

        Self {
            id: entity.id,
            guest_id: entity.hospede_id,
            suite_id: entity.suite_id,
            check_in: entity.data_checkin,
            check_out: entity.data_checkout,
            guest_count: entity.numero_hospedes,
            total_value: entity.valor_total,
            status: ReservationStatus::parse(&entity.status),
            external_code: entity.codigo_booking,
            guest_name: entity.hospede_nome,
            suite,
        }
    }
}
