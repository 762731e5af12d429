//! Error type for the HTTP client layer.

/// Errors from the backend API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A wrapped operation did not settle within its timeout window.
    #[error("Timed out waiting for {label}")]
    Timeout { label: &'static str },

    /// The response parsed as JSON but did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// Extract the server-provided error message, when the response body is
    /// the backend's standard `{"error": ..., "code": ...}` shape.
    ///
    /// Returns `None` for transport errors and unparseable bodies; callers
    /// fall back to a generic message.
    pub fn server_detail(&self) -> Option<String> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("error")?.as_str().map(String::from)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_detail_from_standard_error_body() {
        let err = ApiError::Status {
            status: 409,
            body: r#"{"error": "Operation already finalized", "code": "CONFLICT"}"#.into(),
        };
        assert_eq!(
            err.server_detail().as_deref(),
            Some("Operation already finalized")
        );
    }

    #[test]
    fn server_detail_absent_for_plain_body() {
        let err = ApiError::Status {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert!(err.server_detail().is_none());
    }

    #[test]
    fn server_detail_absent_for_timeout() {
        let err = ApiError::Timeout { label: "vessels" };
        assert!(err.server_detail().is_none());
    }

    #[test]
    fn timeout_display_names_the_action() {
        let err = ApiError::Timeout { label: "summary" };
        assert_eq!(err.to_string(), "Timed out waiting for summary");
    }
}
