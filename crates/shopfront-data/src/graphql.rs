//! GraphQL request/response envelope and client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{FetchError, HttpClient, StorefrontConfig};

/// Header carrying the public Storefront API token.
const STOREFRONT_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// A GraphQL operation as posted to the endpoint.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub variables: &'a V,
}

/// One entry of the top-level `errors` array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// The standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<T> GraphqlResponse<T> {
    /// Extract `data`, turning top-level errors into [`FetchError::GraphqlError`].
    ///
    /// Errors win over partial data.
    pub fn into_data(self) -> Result<T, FetchError> {
        if !self.errors.is_empty() {
            return Err(FetchError::GraphqlError(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data.ok_or(FetchError::EmptyData)
    }
}

/// GraphQL client bound to one Storefront API endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: HttpClient,
    endpoint: String,
}

impl GraphqlClient {
    /// Create a client for an arbitrary endpoint.
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Create a client for the configured shop.
    pub fn from_config(config: &StorefrontConfig) -> Self {
        let http = HttpClient::new()
            .with_default_header(STOREFRONT_TOKEN_HEADER, config.public_access_token.clone());
        Self::new(http, config.endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query or mutation and return its `data`.
    pub fn execute<V, T>(&self, query: &str, variables: &V) -> Result<T, FetchError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = GraphqlRequest { query, variables };
        let response = self
            .http
            .post(self.endpoint.as_str())
            .header("Accept", "application/json")
            .json(&body)?
            .send()?
            .error_for_status()?;

        response.json::<GraphqlResponse<T>>()?.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_query_and_variables() {
        let vars = serde_json::json!({"cartId": "gid://shopify/Cart/1"});
        let req = GraphqlRequest {
            query: "mutation { x }",
            variables: &vars,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["query"], "mutation { x }");
        assert_eq!(json["variables"]["cartId"], "gid://shopify/Cart/1");
    }

    #[test]
    fn test_into_data_returns_data() {
        let resp: GraphqlResponse<serde_json::Value> =
            serde_json::from_str(r#"{"data": {"shop": {"name": "Snowdevil"}}}"#).unwrap();
        let data = resp.into_data().unwrap();
        assert_eq!(data["shop"]["name"], "Snowdevil");
    }

    #[test]
    fn test_into_data_prefers_errors() {
        let resp: GraphqlResponse<serde_json::Value> = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "Variable $cartId is invalid"}]}"#,
        )
        .unwrap();
        match resp.into_data() {
            Err(FetchError::GraphqlError(messages)) => {
                assert_eq!(messages, vec!["Variable $cartId is invalid".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_into_data_without_data() {
        let resp: GraphqlResponse<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(matches!(resp.into_data(), Err(FetchError::EmptyData)));
    }

    #[test]
    fn test_client_from_config() {
        let config = StorefrontConfig::new("snowdevil.myshopify.com", "tok");
        let client = GraphqlClient::from_config(&config);
        assert_eq!(
            client.endpoint(),
            format!(
                "https://snowdevil.myshopify.com/api/{}/graphql.json",
                crate::DEFAULT_API_VERSION
            )
        );
    }
}
