//! Database row mappings.

pub mod reservation;
pub mod suite;

pub use reservation::ReservationEntity;
pub use suite::SuiteEntity;
