use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by the API clients. Every variant is recoverable; callers
/// show the message inline and return to idle.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not signed in: no auth token in session storage")]
    MissingToken,

    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Build an HTTP error from a status and a best-effort body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Http {
            status,
            message: error_message(status, body),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

const MESSAGE_FIELDS: [&str; 3] = ["detail", "error", "message"];

/// Pull the server's explanation out of an error body, falling back to
/// `Error <status>`.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|parsed| {
            MESSAGE_FIELDS.iter().find_map(|field| {
                parsed
                    .get(field)
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("Error {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_detail_then_error_then_message() {
        let body = r#"{"message":"m","error":"e","detail":"d"}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "d");

        let body = r#"{"message":"m","error":"e"}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "e");

        let body = r#"{"message":"m"}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "m");
    }

    #[test]
    fn falls_back_to_status_code() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Error 500"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Error 502");
        assert_eq!(
            error_message(StatusCode::CONFLICT, r#"{"detail":42}"#),
            "Error 409"
        );
    }

    #[test]
    fn http_error_displays_server_text_verbatim() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"You have already applied to this mission."}"#,
        );
        assert_eq!(err.to_string(), "You have already applied to this mission.");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!err.is_not_found());
    }

    #[test]
    fn status_helpers() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
        assert!(ApiError::MissingToken.status().is_none());
    }
}
