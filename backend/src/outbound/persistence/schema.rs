//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    ///
    /// `email` carries a unique constraint; inserts that collide surface as
    /// `UniqueViolation`.
    users (id) {
        /// Primary key (BIGSERIAL).
        id -> Int8,
        /// Login email, unique.
        email -> Varchar,
        /// bcrypt output bytes.
        pass_hash -> Bytea,
        /// Admin flag, false unless granted out of band.
        is_admin -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Client applications provisioned out of band.
    apps (id) {
        /// Primary key (SERIAL).
        id -> Int4,
        /// Unique display name.
        name -> Varchar,
        /// HMAC signing secret.
        secret -> Bytea,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, apps);
