//! Application services hosted by the API.

pub mod sessions;

pub use sessions::{PlannerSession, SessionRegistry};
