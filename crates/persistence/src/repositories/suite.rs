//! Suite repository.

use sqlx::PgPool;

use crate::entities::SuiteEntity;
use crate::metrics::QueryTimer;

/// Read access to the suites table.
#[derive(Clone)]
pub struct SuiteRepository {
    pool: PgPool,
}

impl SuiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All suites ordered by name.
    pub async fn find_all(&self) -> Result<Vec<SuiteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_suites");
        let result = sqlx::query_as::<_, SuiteEntity>(
            r#"
            SELECT id::text AS id, nome, status, cor_identificacao
            FROM suites
            ORDER BY nome
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether a suite with this id exists.
    pub async fn exists(&self, suite_id: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("suite_exists");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM suites WHERE id::text = $1)
            "#,
        )
        .bind(suite_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.0)
    }

    /// Connectivity probe.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use sqlx::postgres::PgPoolOptions;

    /// Collects the `query` label of every histogram touched.
    #[derive(Default)]
    struct QueryNames(Arc<Mutex<Vec<String>>>);

    impl Recorder for QueryNames {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            if let Some(label) = key.labels().find(|l| l.key() == "query") {
                self.0.lock().unwrap().push(label.value().to_string());
            }
            Histogram::noop()
        }
    }

    #[test]
    fn test_failed_queries_still_record_duration() {
        let recorder = QueryNames::default();
        let names = recorder.0.clone();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                // Nothing listens on port 1.
                let pool = PgPoolOptions::new()
                    .acquire_timeout(Duration::from_millis(200))
                    .connect_lazy("postgres://va:va@127.0.0.1:1/villa_araca")
                    .unwrap();
                let repo = SuiteRepository::new(pool);

                assert!(repo.exists("s1").await.is_err());
                assert!(repo.find_all().await.is_err());
            })
        });

        assert_eq!(
            *names.lock().unwrap(),
            vec!["suite_exists".to_string(), "find_all_suites".to_string()]
        );
    }
}
