//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope. Only the code, message,
//! details and trace identifier are ever serialised; the originating operation
//! and the underlying cause stay server-side for logging.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::domain::TraceId;

const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";
const USER_EXISTS_MESSAGE: &str = "user already exists";
const APP_NOT_FOUND_MESSAGE: &str = "app not found";
const INTERNAL_MESSAGE: &str = "internal error";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Unknown email, wrong password, or unknown subject of an admin lookup.
    InvalidCredentials,
    /// Registration attempted with an email that is already taken.
    UserExists,
    /// Login referenced an app id with no app record.
    AppNotFound,
    /// An unexpected error occurred inside the domain or a store.
    InternalError,
}

/// Validation errors emitted by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The caller-facing message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The trace identifier was blank.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `InternalError` always carries the generic message; the real cause is
///   kept in [`Error::cause`] and never serialised.
///
/// # Examples
/// ```
/// use sso::domain::{Error, ErrorCode};
///
/// let err = Error::internal("connection reset").with_operation("auth.login");
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert_eq!(err.message(), "internal error");
/// assert_eq!(err.cause(), Some("connection reset"));
/// assert_eq!(err.to_string(), "auth.login: internal error");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    trace_id: Option<String>,
    operation: Option<&'static str>,
    cause: Option<String>,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    ///
    /// # Panics
    /// Panics when `message` is blank. Use [`Error::try_new`] for
    /// caller-supplied text.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
            operation: None,
            cause: None,
        })
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    ///
    /// Every credential failure shares this exact payload.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, INVALID_CREDENTIALS_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::UserExists`].
    pub fn user_exists() -> Self {
        Self::new(ErrorCode::UserExists, USER_EXISTS_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::AppNotFound`].
    pub fn app_not_found() -> Self {
        Self::new(ErrorCode::AppNotFound, APP_NOT_FOUND_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    ///
    /// `cause` is retained for operators only.
    pub fn internal(cause: impl Into<String>) -> Self {
        let mut error = Self::new(ErrorCode::InternalError, INTERNAL_MESSAGE);
        error.cause = Some(cause.into());
        error
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Name of the operation that produced the error, if recorded.
    pub fn operation(&self) -> Option<&'static str> {
        self.operation
    }

    /// Underlying cause for internal failures. Never sent to callers.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Record the originating operation name.
    ///
    /// The first operation recorded wins so the innermost context survives
    /// re-wrapping.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if self.operation.is_none() {
            self.operation = Some(operation);
        }
        self
    }

    /// Attach a trace identifier, panicking if it is blank.
    ///
    /// # Panics
    /// Panics when `trace_id` is blank.
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        match self.try_with_trace_id(trace_id) {
            Ok(value) => value,
            Err(err) => panic!("trace identifiers must satisfy validation: {err}"),
        }
    }

    /// Fallible variant of [`Error::with_trace_id`].
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Some(operation) => write!(f, "{operation}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
            trace_id: value.trace_id,
        }
    }
}
