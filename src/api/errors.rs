//! Service call errors.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, warn};

/// Errors surfaced by a service call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token is available; raised before any request is made.
    #[error("authentication token not found")]
    MissingToken,

    /// The service answered 404.
    #[error("{resource} not found")]
    NotFound {
        /// What was being fetched, e.g. `product`
        resource: String,
    },

    /// The service rejected the request payload.
    #[error("{message}")]
    Validation {
        /// Message extracted from the error body
        message: String,
    },

    /// Any other unsuccessful status.
    #[error("{status} {status_text}")]
    Status {
        /// HTTP status code
        status: u16,

        /// HTTP reason phrase
        status_text: String,
    },

    /// A successful body could not be decoded.
    #[error("invalid response body")]
    Decode(#[from] serde_json::Error),

    /// The view that issued the request went away.
    #[error("request cancelled")]
    Cancelled,

    /// A request task panicked or was aborted.
    #[error(transparent)]
    Task(#[from] JoinError),
}

impl ApiError {
    /// Maps an unsuccessful response to an error.
    ///
    /// A 400 body is searched for a human readable message; see [`validation_message`].
    pub fn from_status(status: u16, status_text: &str, body: &str, resource: &str) -> Self {
        match status {
            404 => ApiError::NotFound {
                resource: resource.to_string(),
            },
            400 => ApiError::Validation {
                message: validation_message(body)
                    .unwrap_or_else(|| "validation failed".to_string()),
            },
            _ => ApiError::Status {
                status,
                status_text: status_text.to_string(),
            },
        }
    }
}

/// Checks a response and decodes its JSON body.
///
/// # Errors
///
/// - [`ApiError::NotFound`], [`ApiError::Validation`] or [`ApiError::Status`] for non-2xx
///   statuses.
/// - [`ApiError::Decode`] when a 2xx body is not valid JSON for `T`.
pub fn decode_response<T>(
    status: u16,
    status_text: &str,
    body: &str,
    resource: &str,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if !(200..300).contains(&status) {
        let error = ApiError::from_status(status, status_text, body, resource);

        if status >= 500 {
            error!(status, resource, "{resource} request failed: {error}");
        } else {
            warn!(status, resource, "{resource} request rejected: {error}");
        }

        return Err(error);
    }

    serde_json::from_str(body).map_err(|source| {
        error!(resource, "failed to decode {resource} response: {source}");

        ApiError::Decode(source)
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldErrors {
    Map(serde_json::Map<String, Value>),
    List(Vec<FieldError>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldError {
    #[serde(default)]
    field: Option<String>,

    #[serde(default, alias = "defaultMessage")]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// Extracts a readable message from a structured validation error body.
///
/// Looks at `message`, then `error`, then `errors`, which may be a `{field: message}` map or a
/// list of `{field, message}` objects. Field errors are joined as `field: message; ...`.
pub fn validation_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    let non_blank = |text: Option<String>| text.filter(|text| !text.trim().is_empty());

    non_blank(parsed.message)
        .or_else(|| non_blank(parsed.error))
        .or_else(|| parsed.errors.and_then(join_field_errors))
}

fn join_field_errors(errors: FieldErrors) -> Option<String> {
    let parts: Vec<String> = match errors {
        FieldErrors::Map(map) => map
            .into_iter()
            .map(|(field, message)| match message {
                Value::String(text) => format!("{field}: {text}"),
                other => format!("{field}: {other}"),
            })
            .collect(),
        FieldErrors::List(list) => list
            .into_iter()
            .filter_map(|entry| match (entry.field, entry.message) {
                (Some(field), Some(message)) => Some(format!("{field}: {message}")),
                (None, Some(message)) => Some(message),
                (_, None) => None,
            })
            .collect(),
    };

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Score {
        score: u8,
    }

    #[test]
    fn not_found_names_the_resource() {
        let error = ApiError::from_status(404, "Not Found", "", "product");

        assert_eq!(error.to_string(), "product not found");
    }

    #[test]
    fn other_statuses_use_status_line() {
        let error = ApiError::from_status(503, "Service Unavailable", "<html>", "discounts");

        assert_eq!(error.to_string(), "503 Service Unavailable");
    }

    #[test]
    fn validation_prefers_top_level_message() {
        let error = ApiError::from_status(
            400,
            "Bad Request",
            r#"{"message": "discountValue must be positive"}"#,
            "discount",
        );

        assert_eq!(error.to_string(), "discountValue must be positive");
    }

    #[test]
    fn validation_joins_field_error_lists() {
        let message = validation_message(
            r#"{"errors": [
                {"field": "name", "defaultMessage": "must not be blank"},
                {"field": "price", "message": "must be greater than 0"}
            ]}"#,
        );

        assert_eq!(
            message.as_deref(),
            Some("name: must not be blank; price: must be greater than 0")
        );
    }

    #[test]
    fn validation_joins_field_error_maps() {
        let message =
            validation_message(r#"{"message": "", "errors": {"endDate": "in the past"}}"#);

        assert_eq!(message.as_deref(), Some("endDate: in the past"));
    }

    #[test]
    fn unstructured_validation_body_falls_back() {
        let error = ApiError::from_status(400, "Bad Request", "nope", "discount");

        assert_eq!(error.to_string(), "validation failed");
    }

    #[test]
    fn decode_response_parses_success_bodies() -> TestResult {
        let score: Score = decode_response(200, "OK", r#"{"score": 88}"#, "loyalty score")?;

        assert_eq!(score, Score { score: 88 });

        Ok(())
    }

    #[test]
    fn decode_response_maps_failures() {
        let missing = decode_response::<Score>(404, "Not Found", "", "loyalty score");
        let garbled = decode_response::<Score>(200, "OK", "{", "loyalty score");

        assert!(matches!(
            missing,
            Err(ApiError::NotFound { resource }) if resource == "loyalty score"
        ));
        assert!(matches!(garbled, Err(ApiError::Decode(_))));
    }
}
