//! Response classification: HTTP status codes to the error taxonomy,
//! success payloads to typed records.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AiornotError, Result};
use crate::transport::RawResponse;
use crate::types::token::TokenStatus;

/// Parse a 2xx body into a typed record, or classify the failure.
pub(crate) fn parse_report<T: DeserializeOwned>(resp: RawResponse) -> Result<T> {
    if !resp.is_success() {
        return Err(classify_error(&resp));
    }
    serde_json::from_str(&resp.body).map_err(|e| AiornotError::Decode(e.to_string()))
}

/// Liveness parser. Never errors on an HTTP status: any non-2xx or
/// undecodable body reads as "not live". The only endpoint with this
/// relaxed contract.
pub(crate) fn parse_health(resp: RawResponse) -> bool {
    if !resp.is_success() {
        return false;
    }
    serde_json::from_str::<Value>(&resp.body)
        .ok()
        .and_then(|v| v.get("is_live").and_then(Value::as_bool))
        .unwrap_or(false)
}

/// Token-check parser. A 401 means "this token is invalid", which is an
/// answer, not an error. Other failures classify normally.
pub(crate) fn parse_token_status(resp: RawResponse) -> Result<TokenStatus> {
    if resp.status == 401 {
        return Ok(TokenStatus::invalid());
    }
    parse_report(resp)
}

/// Map a non-2xx response onto the error taxonomy.
pub(crate) fn classify_error(resp: &RawResponse) -> AiornotError {
    let status = resp.status;
    let body: Option<Value> = serde_json::from_str(&resp.body).ok();
    let message = body
        .as_ref()
        .map(|value| detail_message(value))
        .unwrap_or_else(|| resp.body.clone());

    match status {
        401 => AiornotError::Authentication {
            status,
            message: non_empty(message, "Invalid or missing API key"),
            body,
        },
        422 => AiornotError::Validation {
            status,
            message: non_empty(message, "Request validation failed"),
            body,
        },
        429 => AiornotError::RateLimit {
            status,
            message: non_empty(message, "Rate limit exceeded"),
            body,
        },
        s if s >= 500 => AiornotError::Server {
            status,
            message: non_empty(message, "Server error"),
            body,
        },
        _ => AiornotError::Api {
            status,
            message: non_empty(message, &format!("API error: {status}")),
            body,
        },
    }
}

/// Extract the server's `detail` field. A list of `{loc, msg}` objects
/// (the validation-error shape) is joined with `"; "`.
fn detail_message(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(validation_item)
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}

fn validation_item(item: &Value) -> String {
    let loc = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .map(|s| match s {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();
    let msg = item.get("msg").and_then(Value::as_str).unwrap_or_default();
    if loc.is_empty() {
        msg.to_string()
    } else {
        format!("{loc}: {msg}")
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resp(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_401_is_authentication_error() {
        let err = classify_error(&resp(401, r#"{"detail": "Invalid API key"}"#));
        match &err {
            AiornotError::Authentication {
                status, message, ..
            } => {
                assert_eq!(*status, 401);
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[test]
    fn test_422_joins_validation_details() {
        let body = r#"{"detail": [
            {"loc": ["body", "image"], "msg": "field required"},
            {"loc": ["body", "text"], "msg": "invalid format"}
        ]}"#;
        let err = classify_error(&resp(422, body));
        match &err {
            AiornotError::Validation { message, .. } => {
                assert!(message.contains("field required"));
                assert!(message.contains("invalid format"));
                assert!(message.contains("; "));
                assert!(message.contains("body.image"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_429_and_5xx_and_other() {
        assert!(matches!(
            classify_error(&resp(429, "{}")),
            AiornotError::RateLimit { .. }
        ));
        assert!(matches!(
            classify_error(&resp(500, "{}")),
            AiornotError::Server { .. }
        ));
        assert!(matches!(
            classify_error(&resp(503, "{}")),
            AiornotError::Server { .. }
        ));
        assert!(matches!(
            classify_error(&resp(404, "{}")),
            AiornotError::Api { status: 404, .. }
        ));
    }

    #[test]
    fn test_unparseable_body_used_verbatim() {
        let err = classify_error(&resp(500, "upstream exploded"));
        match &err {
            AiornotError::Server { message, body, .. } => {
                assert_eq!(message, "upstream exploded");
                assert!(body.is_none());
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_falls_back_to_default_message() {
        let err = classify_error(&resp(401, ""));
        match &err {
            AiornotError::Authentication { message, .. } => {
                assert_eq!(message, "Invalid or missing API key");
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_health_relaxed_on_4xx() {
        assert!(!parse_health(resp(401, r#"{"detail": "nope"}"#)));
        assert!(!parse_health(resp(500, "")));
        assert!(!parse_health(resp(200, "not json")));
        assert!(!parse_health(resp(200, r#"{"is_live": false}"#)));
        assert!(parse_health(resp(200, r#"{"is_live": true}"#)));
    }

    #[test]
    fn test_parse_token_status_401_is_not_an_error() {
        let status = parse_token_status(resp(401, r#"{"detail": "expired"}"#)).unwrap();
        assert!(!status.is_valid);

        let err = parse_token_status(resp(500, "{}")).unwrap_err();
        assert!(matches!(err, AiornotError::Server { .. }));

        let ok = parse_token_status(resp(200, r#"{"is_valid": true}"#)).unwrap();
        assert!(ok.is_valid);
    }

    #[test]
    fn test_parse_report_decode_failure_on_2xx() {
        let err =
            parse_report::<crate::types::token::TokenStatus>(resp(200, "garbage")).unwrap_err();
        assert!(matches!(err, AiornotError::Decode(_)));
    }
}
