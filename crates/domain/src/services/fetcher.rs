//! Data fetching with a month-keyed cache shared by all planner sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use metrics::counter;
use shared::MonthKey;
use tokio::sync::RwLock;

use crate::models::reservation::Reservation;
use crate::models::suite::Suite;

use super::store::{PlannerStore, StoreError};

/// Cached suites and per-month reservation lists.
///
/// Each month carries a version that only grows. Invalidation bumps it, so
/// a session holding data older than the current version knows to reload.
#[derive(Debug, Default)]
pub struct ReservationCache {
    suites: RwLock<Option<Vec<Suite>>>,
    months: RwLock<HashMap<MonthKey, Vec<Reservation>>>,
    versions: RwLock<HashMap<MonthKey, u64>>,
    epoch: AtomicU64,
}

impl ReservationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, month: MonthKey) -> Option<Vec<Reservation>> {
        self.months.read().await.get(&month).cloned()
    }

    pub async fn put(&self, month: MonthKey, reservations: Vec<Reservation>) {
        self.months.write().await.insert(month, reservations);
    }

    /// Drops one month and bumps its version. Returns whether it was cached.
    pub async fn invalidate(&self, month: MonthKey) -> bool {
        *self.versions.write().await.entry(month).or_insert(0) += 1;
        self.months.write().await.remove(&month).is_some()
    }

    pub async fn invalidate_all(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.months.write().await.clear();
        *self.suites.write().await = None;
    }

    /// Current version of `month`. Data fetched at an older version is stale.
    pub async fn version(&self, month: MonthKey) -> u64 {
        let month_version = self.versions.read().await.get(&month).copied().unwrap_or(0);
        self.epoch.load(Ordering::SeqCst) + month_version
    }

    /// Cached months in calendar order.
    pub async fn cached_months(&self) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self.months.read().await.keys().copied().collect();
        months.sort();
        months
    }

    pub async fn suites(&self) -> Option<Vec<Suite>> {
        self.suites.read().await.clone()
    }

    pub async fn put_suites(&self, suites: Vec<Suite>) {
        *self.suites.write().await = Some(suites);
    }
}

fn record_cache_lookup(result: &'static str) {
    counter!("planner_cache_lookups_total", "result" => result).increment(1);
}

/// Reads suites and reservations through the cache.
///
/// Failures are never cached, so the next trigger retries the store.
#[derive(Clone)]
pub struct DataFetcher {
    store: Arc<dyn PlannerStore>,
    cache: Arc<ReservationCache>,
}

impl DataFetcher {
    pub fn new(store: Arc<dyn PlannerStore>, cache: Arc<ReservationCache>) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &Arc<dyn PlannerStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<ReservationCache> {
        &self.cache
    }

    /// All suites ordered by name.
    pub async fn suites(&self) -> Result<Vec<Suite>, StoreError> {
        if let Some(suites) = self.cache.suites().await {
            return Ok(suites);
        }
        let suites = self.store.fetch_suites().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch suites");
            e
        })?;
        self.cache.put_suites(suites.clone()).await;
        Ok(suites)
    }

    /// Reservations overlapping `month`, from cache when available.
    pub async fn reservations(&self, month: MonthKey) -> Result<Vec<Reservation>, StoreError> {
        if let Some(reservations) = self.cache.get(month).await {
            record_cache_lookup("hit");
            tracing::debug!(month = %month, "Reservation cache hit");
            return Ok(reservations);
        }
        record_cache_lookup("miss");

        let reservations = self
            .store
            .fetch_reservations(month.first_day(), month.last_day())
            .await
            .map_err(|e| {
                tracing::warn!(month = %month, error = %e, "Failed to fetch reservations");
                e
            })?;

        tracing::debug!(month = %month, count = reservations.len(), "Fetched reservations");
        self.cache.put(month, reservations.clone()).await;
        Ok(reservations)
    }

    /// Drops the given months from the cache.
    pub async fn invalidate(&self, months: &[MonthKey]) {
        for month in months {
            if self.cache.invalidate(*month).await {
                tracing::debug!(month = %month, "Invalidated cached month");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ReservationStatus;
    use crate::services::store::InMemoryPlannerStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn reservation(id: &str, suite: &str, check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation {
            id: id.to_string(),
            guest_id: "g1".to_string(),
            suite_id: suite.to_string(),
            check_in,
            check_out,
            guest_count: None,
            total_value: None,
            status: ReservationStatus::Confirmed,
            external_code: None,
            guest_name: None,
            suite: None,
        }
    }

    fn setup() -> (Arc<InMemoryPlannerStore>, DataFetcher) {
        let store = Arc::new(InMemoryPlannerStore::with_data(
            vec![Suite::new("s1", "Verde"), Suite::new("s2", "Azul")],
            vec![
                reservation("r1", "s1", date(2024, 3, 10), date(2024, 3, 12)),
                reservation("r2", "s2", date(2024, 4, 2), date(2024, 4, 4)),
            ],
        ));
        let fetcher = DataFetcher::new(store.clone(), Arc::new(ReservationCache::new()));
        (store, fetcher)
    }

    #[tokio::test]
    async fn test_returning_to_month_hits_cache() {
        let (store, fetcher) = setup();

        let march = fetcher.reservations(month(2024, 3)).await.unwrap();
        assert_eq!(march.len(), 1);
        fetcher.reservations(month(2024, 4)).await.unwrap();
        fetcher.reservations(month(2024, 3)).await.unwrap();

        assert_eq!(store.reservation_fetch_count(), 2);
        assert_eq!(
            fetcher.cache().cached_months().await,
            vec![month(2024, 3), month(2024, 4)]
        );
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (store, fetcher) = setup();
        fetcher.reservations(month(2024, 3)).await.unwrap();

        fetcher.invalidate(&[month(2024, 3), month(2024, 5)]).await;
        fetcher.reservations(month(2024, 3)).await.unwrap();

        assert_eq!(store.reservation_fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidation_bumps_version() {
        let cache = ReservationCache::new();
        assert_eq!(cache.version(month(2024, 3)).await, 0);

        cache.put(month(2024, 3), Vec::new()).await;
        assert_eq!(cache.version(month(2024, 3)).await, 0);

        assert!(cache.invalidate(month(2024, 3)).await);
        assert!(!cache.invalidate(month(2024, 3)).await);
        assert_eq!(cache.version(month(2024, 3)).await, 2);
        assert_eq!(cache.version(month(2024, 4)).await, 0);

        cache.invalidate_all().await;
        assert_eq!(cache.version(month(2024, 3)).await, 3);
        assert_eq!(cache.version(month(2024, 4)).await, 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (store, fetcher) = setup();
        store.set_fail_reads(true);
        assert!(fetcher.reservations(month(2024, 3)).await.is_err());
        assert!(fetcher.suites().await.is_err());
        assert!(fetcher.cache().cached_months().await.is_empty());

        store.set_fail_reads(false);
        assert_eq!(fetcher.reservations(month(2024, 3)).await.unwrap().len(), 1);
        assert_eq!(fetcher.suites().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_suites_cached_in_name_order() {
        let (store, fetcher) = setup();
        let suites = fetcher.suites().await.unwrap();
        assert_eq!(suites[0].name, "Azul");

        store.insert_suite(Suite::new("s3", "Amarela")).await;
        assert_eq!(fetcher.suites().await.unwrap().len(), 2);

        fetcher.cache().invalidate_all().await;
        let suites = fetcher.suites().await.unwrap();
        assert_eq!(suites.len(), 3);
        assert_eq!(suites[0].name, "Amarela");
    }
}
