//! Suite entity (database row mapping).

use sqlx::FromRow;

use domain::models::suite::{Suite, SuiteStatus};

/// Row of the suites table. Ids are selected as text.
#[derive(Debug, Clone, FromRow)]
pub struct SuiteEntity {
    pub id: String,
    pub nome: String,
    pub status: String,
    pub cor_identificacao: Option<String>,
}

impl From<SuiteEntity> for Suite {
    fn from(entity: SuiteEntity) -> Self {
        let status = SuiteStatus::parse(&entity.status).unwrap_or_else(|| {
            tracing::warn!(suite_id = %entity.id, status = %entity.status, "Unknown suite status");
            SuiteStatus::Active
        });
        Self {
            id: entity.id,
            name: entity.nome,
            identification_color: entity.cor_identificacao,
            status,
        }
    }
}
