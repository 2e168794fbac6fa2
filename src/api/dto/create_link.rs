//! DTOs for link creation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::entities::{LinkMode, LinkStatus, NewLink, RedirectType};
use crate::error::{AppError, ValidationKind};
use crate::utils::validators::{EXPIRED_DATE_REGEX, validate_url};

/// Raw creation payload.
///
/// Fields stay loosely typed so [`CreateLinkRequest::into_new_link`] can
/// apply the creation rules in a fixed order and report the first failure.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Target URL; required and non-empty.
    pub original_url: Option<String>,

    /// `DD/MM/YYYY`; only meaningful with `mode = EXPDATE`.
    #[validate(regex(path = *EXPIRED_DATE_REGEX, message = "expiredDate malformed"))]
    pub expired_date: Option<String>,

    /// `301` or `302`, as a number or a string.
    pub redirect_type: Option<Value>,

    /// Hit limit for `mode = EXPCOUNTER` (default 0).
    pub times_to_expire: Option<u64>,

    /// Expiration policy (default `ETERNAL`).
    pub mode: Option<LinkMode>,

    /// Initial status (default `ACTIVE`).
    pub status: Option<LinkStatus>,
}

impl CreateLinkRequest {
    /// Validates the payload and converts it into a [`NewLink`].
    ///
    /// # Rules
    ///
    /// Checked in this order, first failure wins:
    ///
    /// 1. `originalUrl` missing or empty
    /// 2. `originalUrl` not URL-shaped (only when `check_url_syntax` is set)
    /// 3. `expiredDate` present but not `DD/MM/YYYY` (an empty string counts
    ///    as absent)
    /// 4. `redirectType` missing or falsy (`null`, `0`, `""`, `false`)
    /// 5. `redirectType` text containing neither `301` nor `302`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the failed rule.
    pub fn into_new_link(mut self, check_url_syntax: bool) -> Result<NewLink, AppError> {
        if self.expired_date.as_deref() == Some("") {
            self.expired_date = None;
        }

        // The date pattern is the only derive-level rule.
        let date_ok = self.validate().is_ok();

        let original_url = match self.original_url {
            Some(url) if !url.is_empty() => url,
            _ => {
                return Err(AppError::validation(
                    ValidationKind::MissingField,
                    "originalUrl",
                    "Url is required",
                ));
            }
        };

        if check_url_syntax && !validate_url(&original_url) {
            return Err(AppError::validation(
                ValidationKind::InvalidUrl,
                "originalUrl",
                "Url is malformed",
            ));
        }

        if !date_ok {
            return Err(AppError::validation(
                ValidationKind::MalformedDate,
                "expiredDate",
                "expiredDate malformed",
            ));
        }

        let raw = self
            .redirect_type
            .as_ref()
            .and_then(redirect_type_text)
            .ok_or_else(|| {
                AppError::validation(
                    ValidationKind::MissingField,
                    "redirectType",
                    "redirectType is required",
                )
            })?;

        let redirect_type = RedirectType::from_loose(&raw).ok_or_else(|| {
            AppError::validation(
                ValidationKind::InvalidEnum,
                "redirectType",
                "redirectType is invalid. Valid values are 301,302",
            )
        })?;

        Ok(NewLink {
            original_url,
            redirect_type,
            mode: self.mode,
            status: self.status,
            expired_date: self.expired_date,
            times_to_expire: self.times_to_expire,
        })
    }
}

/// Text form of a `redirectType` value, or `None` if it counts as missing.
fn redirect_type_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Successful creation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    /// Full short URL, `<base-url>/<code>`.
    pub tiny_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateLinkRequest {
        serde_json::from_value(body).unwrap()
    }

    fn kind_of(body: Value) -> Option<ValidationKind> {
        request(body)
            .into_new_link(false)
            .err()
            .and_then(|e| e.validation_kind())
    }

    #[test]
    fn test_minimal_valid_request() {
        let new_link = request(json!({
            "originalUrl": "https://example.com",
            "redirectType": 302
        }))
        .into_new_link(false)
        .unwrap();

        assert_eq!(new_link.original_url, "https://example.com");
        assert_eq!(new_link.redirect_type, RedirectType::Found);
        assert_eq!(new_link.mode, None);
        assert_eq!(new_link.times_to_expire, None);
    }

    #[test]
    fn test_full_request() {
        let new_link = request(json!({
            "originalUrl": "https://example.com",
            "redirectType": "301",
            "expiredDate": "01/01/2030",
            "mode": "EXPDATE",
            "timesToExpire": 4
        }))
        .into_new_link(true)
        .unwrap();

        assert_eq!(new_link.redirect_type, RedirectType::Permanent);
        assert_eq!(new_link.mode, Some(LinkMode::ExpDate));
        assert_eq!(new_link.expired_date.as_deref(), Some("01/01/2030"));
        assert_eq!(new_link.times_to_expire, Some(4));
    }

    #[test]
    fn test_missing_or_empty_url() {
        assert_eq!(
            kind_of(json!({ "redirectType": 302 })),
            Some(ValidationKind::MissingField)
        );

        let err = request(json!({ "originalUrl": "", "redirectType": 302 }))
            .into_new_link(false)
            .unwrap_err();
        assert_eq!(err.to_string(), "Url is required");
        assert!(matches!(err, AppError::Validation { field: "originalUrl", .. }));
    }

    #[test]
    fn test_url_error_wins_over_later_rules() {
        assert_eq!(
            kind_of(json!({ "expiredDate": "garbage", "redirectType": 999 })),
            Some(ValidationKind::MissingField)
        );
    }

    #[test]
    fn test_url_syntax_is_opt_in() {
        let body = json!({ "originalUrl": "not a url", "redirectType": 302 });

        assert!(request(body.clone()).into_new_link(false).is_ok());

        let err = request(body).into_new_link(true).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidUrl));
    }

    #[test]
    fn test_malformed_date() {
        let err = request(json!({
            "originalUrl": "https://example.com",
            "expiredDate": "2024-01-01",
            "redirectType": 302
        }))
        .into_new_link(false)
        .unwrap_err();

        assert_eq!(err.validation_kind(), Some(ValidationKind::MalformedDate));
        assert_eq!(err.to_string(), "expiredDate malformed");
    }

    #[test]
    fn test_empty_date_counts_as_absent() {
        let new_link = request(json!({
            "originalUrl": "https://example.com",
            "expiredDate": "",
            "redirectType": 302
        }))
        .into_new_link(false)
        .unwrap();

        assert_eq!(new_link.expired_date, None);
    }

    #[test]
    fn test_calendar_invalid_date_passes() {
        assert_eq!(
            kind_of(json!({
                "originalUrl": "https://example.com",
                "expiredDate": "31/02/2024",
                "redirectType": 302
            })),
            None
        );
    }

    #[test]
    fn test_date_error_wins_over_redirect_type() {
        assert_eq!(
            kind_of(json!({
                "originalUrl": "https://example.com",
                "expiredDate": "nope"
            })),
            Some(ValidationKind::MalformedDate)
        );
    }

    #[test]
    fn test_redirect_type_missing_or_falsy() {
        for redirect_type in [json!(null), json!(0), json!(""), json!(false)] {
            let err = request(json!({
                "originalUrl": "https://example.com",
                "redirectType": redirect_type
            }))
            .into_new_link(false)
            .unwrap_err();

            assert_eq!(err.validation_kind(), Some(ValidationKind::MissingField));
            assert_eq!(err.to_string(), "redirectType is required");
        }

        assert_eq!(
            kind_of(json!({ "originalUrl": "https://example.com" })),
            Some(ValidationKind::MissingField)
        );
    }

    #[test]
    fn test_redirect_type_invalid_enum() {
        for redirect_type in [json!(303), json!("307"), json!(true), json!("abc")] {
            assert_eq!(
                kind_of(json!({
                    "originalUrl": "https://example.com",
                    "redirectType": redirect_type
                })),
                Some(ValidationKind::InvalidEnum)
            );
        }
    }

    #[test]
    fn test_redirect_type_substring_match() {
        let new_link = request(json!({
            "originalUrl": "https://example.com",
            "redirectType": "3011"
        }))
        .into_new_link(false)
        .unwrap();

        assert_eq!(new_link.redirect_type, RedirectType::Permanent);
    }

    #[test]
    fn test_response_field_name() {
        let body = serde_json::to_value(CreateLinkResponse {
            tiny_id: "https://sntg.it/abc123".to_string(),
        })
        .unwrap();

        assert_eq!(body, json!({ "tinyId": "https://sntg.it/abc123" }));
    }
}
