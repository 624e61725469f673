//! Mapping from HTTP failures to `BackendError`.

use mn_core::BackendError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Error body shapes returned by GoTrue and PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    /// PostgREST sends a string code ("23505"), GoTrue a numeric status.
    code: Option<Value>,
    error_code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    details: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn code(&self) -> Option<String> {
        if let Some(code) = &self.error_code {
            return Some(code.clone());
        }
        match &self.code {
            Some(Value::String(code)) => Some(code.clone()),
            _ => None,
        }
    }

    fn message(&self, status: StatusCode, raw: &str) -> String {
        self.msg
            .as_ref()
            .or(self.message.as_ref())
            .or(self.error_description.as_ref())
            .or(self.error.as_ref())
            .cloned()
            .unwrap_or_else(|| {
                let raw = raw.trim();
                if raw.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    raw.to_string()
                }
            })
    }
}

/// Failed auth endpoint response.
pub(super) fn auth_error(status: StatusCode, body: &str) -> BackendError {
    let parsed = ErrorBody::parse(body);
    BackendError::Auth {
        code: parsed.code(),
        message: parsed.message(status, body),
    }
}

/// Failed row endpoint response.
pub(super) fn query_error(status: StatusCode, body: &str) -> BackendError {
    let parsed = ErrorBody::parse(body);
    BackendError::Query {
        code: parsed.code(),
        message: parsed.message(status, body),
        details: parsed.details.clone(),
    }
}

pub(super) fn transport_error(error: reqwest::Error) -> BackendError {
    if error.is_decode() {
        BackendError::Unexpected(format!("invalid response body: {error}"))
    } else {
        BackendError::Network(error.to_string())
    }
}
