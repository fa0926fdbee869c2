//! Repository implementations for database operations.

pub mod reservation;
pub mod suite;

pub use reservation::ReservationRepository;
pub use suite::SuiteRepository;
