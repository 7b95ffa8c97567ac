//! PostgreSQL-backed `AppRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AppRepository, AppRepositoryError};
use crate::domain::{App, AppId};

use super::error_mapping::{DieselFailure, classify_diesel_error, pool_message};
use super::models::AppRow;
use super::pool::{DbPool, PoolError};
use super::schema::apps;

/// Diesel-backed implementation of the `AppRepository` port.
#[derive(Clone)]
pub struct DieselAppRepository {
    pool: DbPool,
}

impl DieselAppRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AppRepositoryError {
    AppRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> AppRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AppRepositoryError::connection(message),
        // Not produced by reads.
        DieselFailure::Duplicate => AppRepositoryError::query("database error"),
        DieselFailure::Query(message) => AppRepositoryError::query(message),
    }
}

#[async_trait]
impl AppRepository for DieselAppRepository {
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, AppRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AppRow> = apps::table
            .find(id.get())
            .select(AppRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(App::from))
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; queries run against a live database only.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    #[test]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert_eq!(
            map_diesel_error(error),
            AppRepositoryError::connection("database connection error")
        );
    }

    #[test]
    fn pool_build_failure_is_a_connection_error() {
        assert_eq!(
            map_pool_error(PoolError::build("invalid url")),
            AppRepositoryError::connection("invalid url")
        );
    }
}
