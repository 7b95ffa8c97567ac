//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod app_repository;
mod authenticator;
mod user_repository;

#[cfg(test)]
pub use app_repository::MockAppRepository;
pub use app_repository::{AppRepository, AppRepositoryError};
#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
