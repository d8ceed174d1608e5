//! Commerce error types.

use shopfront_data::FetchError;
use thiserror::Error;

/// Errors that can occur while loading products or mutating carts.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The Storefront API rejected the operation with top-level errors.
    #[error("Storefront API error: {}", .0.join("; "))]
    Api(Vec<String>),

    /// Transport or HTTP failure talking to the Storefront API.
    #[error("Storefront API request failed: {0}")]
    Upstream(String),

    /// The response did not match the expected shape.
    #[error("Unexpected Storefront API response: {0}")]
    UnexpectedResponse(String),
}

impl From<FetchError> for CommerceError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::GraphqlError(messages) => CommerceError::Api(messages),
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => {
                CommerceError::UnexpectedResponse(msg)
            }
            FetchError::EmptyData => CommerceError::UnexpectedResponse(e.to_string()),
            other => CommerceError::Upstream(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::UnexpectedResponse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_errors_become_api_errors() {
        let err: CommerceError = FetchError::GraphqlError(vec!["bad id".into()]).into();
        assert!(matches!(err, CommerceError::Api(ref m) if m == &vec!["bad id".to_string()]));
        assert_eq!(err.to_string(), "Storefront API error: bad id");
    }

    #[test]
    fn test_http_errors_become_upstream() {
        let err: CommerceError = FetchError::HttpError {
            status: 503,
            message: "unavailable".into(),
        }
        .into();
        assert!(matches!(err, CommerceError::Upstream(_)));
    }
}
