//! Data store port for the planner.
//!
//! The hosted backend (Postgres tables for suites and reservations) is an
//! external collaborator. The planner only sees this trait.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::reservation::Reservation;
use crate::models::suite::{sort_by_name, Suite};

/// Errors raised by a planner store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Data unavailable: {0}")]
    Unavailable(String),

    /// The record to update does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store refused the write (constraint, permission, ...).
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Read/write contract the planner needs from the data store.
#[async_trait::async_trait]
pub trait PlannerStore: Send + Sync {
    /// All suites, ordered by name.
    async fn fetch_suites(&self) -> Result<Vec<Suite>, StoreError>;

    /// Non-canceled reservations with `check_in <= end` and `check_out >= start`,
    /// joined with guest name and suite snapshot.
    async fn fetch_reservations(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, StoreError>;

    /// Sets the suite reference of one reservation.
    async fn update_reservation_suite(
        &self,
        reservation_id: &str,
        suite_id: &str,
    ) -> Result<(), StoreError>;

    /// Cheap reachability probe.
    async fn health_check(&self) -> Result<(), StoreError> {
        self.fetch_suites().await.map(|_| ())
    }
}

/// In-process store for development and tests.
///
/// Applies the same filtering contract as the Postgres store and can be told
/// to fail reads or writes.
#[derive(Debug, Default)]
pub struct InMemoryPlannerStore {
    suites: RwLock<Vec<Suite>>,
    reservations: RwLock<HashMap<String, Reservation>>,
    insertion_order: RwLock<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reservation_fetches: AtomicUsize,
    suite_updates: AtomicUsize,
}

impl InMemoryPlannerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with suites and reservations.
    pub fn with_data(suites: Vec<Suite>, reservations: Vec<Reservation>) -> Self {
        let order = reservations.iter().map(|r| r.id.clone()).collect();
        let map = reservations.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            suites: RwLock::new(suites),
            reservations: RwLock::new(map),
            insertion_order: RwLock::new(order),
            ..Self::default()
        }
    }

    pub async fn insert_suite(&self, suite: Suite) {
        self.suites.write().await.push(suite);
    }

    pub async fn insert_reservation(&self, reservation: Reservation) {
        let id = reservation.id.clone();
        let previous = self
            .reservations
            .write()
            .await
            .insert(id.clone(), reservation);
        if previous.is_none() {
            self.insertion_order.write().await.push(id);
        }
    }

    /// Current stored copy of a reservation.
    pub async fn reservation(&self, id: &str) -> Option<Reservation> {
        self.reservations.read().await.get(id).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of reservation fetches served (including failed ones).
    pub fn reservation_fetch_count(&self) -> usize {
        self.reservation_fetches.load(Ordering::SeqCst)
    }

    /// Number of suite updates attempted (including failed ones).
    pub fn suite_update_count(&self) -> usize {
        self.suite_updates.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PlannerStore for InMemoryPlannerStore {
    async fn fetch_suites(&self) -> Result<Vec<Suite>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("suites".to_string()));
        }
        let mut suites = self.suites.read().await.clone();
        sort_by_name(&mut suites);
        Ok(suites)
    }

    async fn fetch_reservations(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, StoreError> {
        self.reservation_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reservations".to_string()));
        }

        let reservations = self.reservations.read().await;
        let suites = self.suites.read().await;
        let order = self.insertion_order.read().await;

        Ok(order
            .iter()
            .filter_map(|id| reservations.get(id))
            .filter(|r| r.is_visible_in(start, end))
            .map(|r| {
                let mut r = r.clone();
                r.suite = suites.iter().find(|s| s.id == r.suite_id).cloned();
                r
            })
            .collect())
    }

    async fn update_reservation_suite(
        &self,
        reservation_id: &str,
        suite_id: &str,
    ) -> Result<(), StoreError> {
        self.suite_updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("update reservation".to_string()));
        }
        if !self.suites.read().await.iter().any(|s| s.id == suite_id) {
            return Err(StoreError::Rejected(format!("unknown suite {suite_id}")));
        }

        let mut reservations = self.reservations.write().await;
        let reservation = reservations
            .get_mut(reservation_id)
            .ok_or_else(|| StoreError::NotFound(format!("reservation {reservation_id}")))?;
        reservation.suite_id = suite_id.to_string();
        Ok(())
    }
}
