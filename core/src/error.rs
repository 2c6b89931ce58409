//! Error types for the career API client.
//!
//! # Design
//! 401 and 403 get dedicated variants because views show different
//! guidance for "sign in again" and "this link was revoked". Validation
//! failures keep the server's field messages joined into one string.
//! Everything else lands in `Http` with the status and the best detail
//! text that could be extracted from the body.

use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;

pub const NOT_AUTHENTICATED_MESSAGE: &str = "You are not logged in. Please sign in and try again.";
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. This link may have been revoked.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: no session, or the session token expired.
    #[error("not authenticated")]
    Unauthorized,

    /// 403: authenticated but not allowed, including revoked share links.
    #[error("access denied: {detail}")]
    Forbidden { detail: String },

    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// 400 or 422 with a structured detail payload.
    #[error("validation failed ({status}): {detail}")]
    Validation { status: u16, detail: String },

    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    /// The request never produced a response (connection, DNS, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A team-scoped call was made while the session has no active team.
    #[error("no active team selected")]
    NoActiveTeam,
}

impl ApiError {
    /// Map a non-success response to the matching variant.
    pub fn from_response(response: &HttpResponse) -> Self {
        let detail = extract_detail(&response.text());
        match response.status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden { detail },
            404 => ApiError::NotFound { detail },
            400 | 422 => ApiError::Validation {
                status: response.status,
                detail,
            },
            status => ApiError::Http { status, detail },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Validation { status, .. } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for an inline alert banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => NOT_AUTHENTICATED_MESSAGE.to_string(),
            ApiError::Forbidden { detail } if detail.is_empty() => ACCESS_DENIED_MESSAGE.to_string(),
            ApiError::Forbidden { detail }
            | ApiError::NotFound { detail }
            | ApiError::Validation { detail, .. }
            | ApiError::Http { detail, .. }
                if !detail.is_empty() =>
            {
                detail.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Pull a display string out of an error body.
///
/// `{"detail": "..."}` yields the string, `{"detail": [{"msg": ...}, ...]}`
/// yields the messages joined with `"; "`, anything else the trimmed body.
pub fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    match value.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                other => other.get("msg").and_then(Value::as_str).map(str::to_string),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => match value.get("message").and_then(Value::as_str) {
            Some(msg) => msg.to_string(),
            None => body.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_has_login_prompt() {
        let err = ApiError::from_response(&HttpResponse::new(401, r#"{"detail":"Token expired"}"#));
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(err.user_message(), NOT_AUTHENTICATED_MESSAGE);
    }

    #[test]
    fn forbidden_without_detail_says_revoked() {
        let err = ApiError::from_response(&HttpResponse::new(403, ""));
        assert_eq!(err.user_message(), ACCESS_DENIED_MESSAGE);
    }

    #[test]
    fn forbidden_prefers_server_detail() {
        let err = ApiError::from_response(&HttpResponse::new(403, r#"{"detail":"Link revoked"}"#));
        assert_eq!(err.user_message(), "Link revoked");
    }

    #[test]
    fn validation_array_messages_are_joined() {
        let body = r#"{"detail":[{"loc":["body","offer_id"],"msg":"field required"},{"msg":"value is not a valid float"}]}"#;
        let err = ApiError::from_response(&HttpResponse::new(422, body));
        match &err {
            ApiError::Validation { status, detail } => {
                assert_eq!(*status, 422);
                assert_eq!(detail, "field required; value is not a valid float");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_used_verbatim() {
        let err = ApiError::from_response(&HttpResponse::new(502, " Bad Gateway \n"));
        assert!(matches!(err, ApiError::Http { status: 502, ref detail } if detail == "Bad Gateway"));
        assert_eq!(err.user_message(), "Bad Gateway");
    }

    #[test]
    fn empty_detail_falls_back_to_error_text() {
        let err = ApiError::from_response(&HttpResponse::new(500, ""));
        assert_eq!(err.user_message(), "HTTP 500: ");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "transport failed: connection refused");
    }
}
