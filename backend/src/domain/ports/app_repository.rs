//! Port abstraction for client-app lookups.
use async_trait::async_trait;

use crate::domain::{App, AppId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by app repository adapters.
    pub enum AppRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "app repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "app repository query failed: {message}",
    }
}

/// Read-only access to provisioned apps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepository: Send + Sync {
    /// Fetch an app, including its signing secret, by id.
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, AppRepositoryError>;
}
