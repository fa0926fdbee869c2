//! HTTP route handlers.

pub mod health;
pub mod occupancy;
pub mod planner;
pub mod settings;
pub mod suites;
