//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{AppId, CredentialsValidationError, Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    EmptyEmail,
    EmptyPassword,
    InvalidId,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            ValidationCode::EmptyEmail => "empty_email",
            ValidationCode::EmptyPassword => "empty_password",
            ValidationCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const APP_ID: FieldName = FieldName::new("appId");
pub(crate) const USER_ID: FieldName = FieldName::new("id");

fn field_error(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => {
            field_error(EMAIL, ValidationCode::EmptyEmail, err.to_string())
        }
        CredentialsValidationError::EmptyPassword => {
            field_error(PASSWORD, ValidationCode::EmptyPassword, err.to_string())
        }
    }
}

fn invalid_id_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::InvalidId,
        format!("{name} must be a positive integer"),
    )
}

/// Accept app ids in `1..=i32::MAX`.
pub(crate) fn parse_app_id(raw: i64) -> Result<AppId, Error> {
    i32::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .map(AppId::new)
        .ok_or_else(|| invalid_id_error(APP_ID))
}

/// Accept decimal user ids greater than zero.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(UserId::new)
        .ok_or_else(|| invalid_id_error(USER_ID))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(1, Some(1))]
    #[case(2_147_483_647, Some(2_147_483_647))]
    #[case(0, None)]
    #[case(-4, None)]
    #[case(2_147_483_648, None)]
    fn app_ids_must_fit_and_be_positive(#[case] raw: i64, #[case] expected: Option<i32>) {
        match (parse_app_id(raw), expected) {
            (Ok(id), Some(value)) => assert_eq!(id.get(), value),
            (Err(err), None) => {
                assert_eq!(err.code(), ErrorCode::InvalidRequest);
                assert_eq!(
                    err.details(),
                    Some(&json!({"field": "appId", "code": "invalid_id"}))
                );
            }
            (other, _) => panic!("unexpected result for {raw}: {other:?}"),
        }
    }

    #[rstest]
    #[case("7", Some(7))]
    #[case("0", None)]
    #[case("-1", None)]
    #[case("abc", None)]
    #[case("", None)]
    fn user_ids_must_be_positive_integers(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_user_id(raw).ok().map(UserId::get), expected);
    }

    #[rstest]
    #[case(CredentialsValidationError::EmptyEmail, "email", "empty_email")]
    #[case(CredentialsValidationError::EmptyPassword, "password", "empty_password")]
    fn credential_errors_name_the_field(
        #[case] err: CredentialsValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = credentials_error(err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            mapped.details(),
            Some(&json!({"field": field, "code": code}))
        );
    }
}
