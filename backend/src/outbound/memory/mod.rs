//! In-memory store adapters.
//!
//! Used by tests and by the `local` environment when no database is
//! configured. State lives behind `RwLock`; a poisoned lock is reported as a
//! query failure rather than a panic.

mod app_repository;
mod user_repository;

pub use app_repository::InMemoryAppRepository;
pub use user_repository::InMemoryUserRepository;
