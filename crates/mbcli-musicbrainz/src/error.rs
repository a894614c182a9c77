// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MusicBrainzError>;

/// Failure talking to the MusicBrainz web service.
///
/// A 404 is not represented here; the client reports it as
/// [`Lookup::NotFound`](crate::models::Lookup::NotFound).
#[derive(Debug, Error)]
pub enum MusicBrainzError {
    #[error("MusicBrainz service unavailable (503). Try again later.")]
    ServiceUnavailable,

    #[error("Bad request (400). Check your query parameters.")]
    BadRequest,

    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Network error: {}", error_chain(.0))]
    Network(#[from] reqwest::Error),

    #[error("Invalid JSON response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl MusicBrainzError {
    /// HTTP status carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServiceUnavailable => Some(503),
            Self::BadRequest => Some(400),
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidResponse(_) | Self::Unexpected(_) => None,
        }
    }
}

/// `err` followed by each of its sources, joined with ": ".
///
/// reqwest keeps the cause (refused connection, timeout, DNS failure) in
/// `source()` rather than in its own message.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl From<url::ParseError> for MusicBrainzError {
    fn from(e: url::ParseError) -> Self {
        Self::Unexpected(format!("invalid request URL: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_status_codes() {
        assert!(MusicBrainzError::ServiceUnavailable
            .to_string()
            .contains("503"));
        assert!(MusicBrainzError::BadRequest.to_string().contains("400"));

        let err = MusicBrainzError::Http {
            status: 418,
            reason: "I'm a teapot".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 418: I'm a teapot");
        assert_eq!(err.status(), Some(418));
    }

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_error_chain_includes_sources() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(
            error_chain(&err),
            "error sending request: Connection refused"
        );
    }

    #[test]
    fn test_parse_failure_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = MusicBrainzError::from(parse_err);
        assert!(err.to_string().starts_with("Invalid JSON response:"));
        assert_eq!(err.status(), None);
    }
}
