//! Error types for the Smartlead client.

use thiserror::Error;

/// Result type for Smartlead operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Smartlead client.
#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with a non-2xx status.
    ///
    /// The remote error shapes are not uniform, so the body is kept verbatim.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        message: String,
    },

    /// A 2xx response body was not valid JSON on an endpoint that only returns JSON.
    #[error("Failed to decode response body: {source}")]
    Decode {
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// Arguments were rejected locally, before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out at the transport level.
    #[error("Request timed out")]
    Timeout,

    /// A JSON payload did not have the shape an endpoint expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw text payload was returned where JSON was required.
    #[error("Expected a JSON payload but received raw text")]
    UnexpectedText,

    /// A JSON payload was returned by an endpoint that answers with text.
    #[error("Expected a text payload but received JSON: {0}")]
    UnexpectedJson(serde_json::Value),

    /// The lead export could not be read as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status of an [`Error::Api`], if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the remote service rejected the request.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Whether the request was rejected locally before being sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Build an [`Error::Api`] from a failed response, keeping the body as-is.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => body,
            Err(e) => return Error::from_transport(e),
        };
        Error::Api { status, message }
    }

    /// The request URL carries the API key, so it is stripped from the error.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(err.without_url())
        }
    }
}

/// Reject a value outside an inclusive range before dispatching.
pub(crate) fn ensure_range<T>(name: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(Error::Validation(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_raw_body() {
        let err = Error::Api {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(err.status(), Some(429));
        assert!(err.is_api_error());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_ensure_range() {
        assert!(ensure_range("weekday", 0, 0, 6).is_ok());
        assert!(ensure_range("weekday", 6, 0, 6).is_ok());

        let err = ensure_range("weekday", 7, 0, 6).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: weekday must be between 0 and 6, got 7"
        );
    }
}
