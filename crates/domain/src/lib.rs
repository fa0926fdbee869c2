//! Domain layer for the Villa Araçá occupancy planner.
//!
//! This crate contains:
//! - Domain models (Suite, Reservation, planner grid view models)
//! - The grid reconciler, drag coordinator and cached data fetcher
//! - Store and notification ports with in-memory implementations

pub mod models;
pub mod services;
