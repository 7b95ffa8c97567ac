//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{App, AppId, AppSecret, PasswordHash, User, UserId};

use super::schema::{apps, users};

/// Row struct for reading credentials from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub pass_hash: Vec<u8>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::new(row.id),
            row.email,
            PasswordHash::from_bytes(row.pass_hash),
        )
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub pass_hash: &'a [u8],
}

/// Row struct for reading from the apps table.
#[derive(Clone, Queryable, Selectable)]
#[diesel(table_name = apps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppRow {
    pub id: i32,
    pub name: String,
    pub secret: Vec<u8>,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        App::new(AppId::new(row.id), row.name, AppSecret::new(row.secret))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn user_rows_become_domain_users() {
        let user = User::from(UserRow {
            id: 3,
            email: "a@x.com".to_owned(),
            pass_hash: b"$2b$04$hash".to_vec(),
        });
        assert_eq!(user.id(), UserId::new(3));
        assert_eq!(user.email(), "a@x.com");
        assert_eq!(user.pass_hash().as_bytes(), b"$2b$04$hash");
    }

    #[test]
    fn app_rows_keep_their_secret() {
        let app = App::from(AppRow {
            id: 1,
            name: "billing".to_owned(),
            secret: b"s3cr3t".to_vec(),
        });
        assert_eq!(app.id(), AppId::new(1));
        assert_eq!(app.secret().as_bytes(), b"s3cr3t");
    }
}
