//! Credential-issuance service library.
//!
//! Hexagonal layout: `domain` holds the auth service and its ports,
//! `inbound` the HTTP adapter, `outbound` the PostgreSQL and in-memory
//! stores, and `middleware` the trace and logging wrappers.

pub mod domain;
pub mod inbound;
pub mod logging;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
