//! Outbound HTTP and Storefront GraphQL client for Shopfront.
//!
//! Provides a small builder API for outbound requests from Spin WASM
//! components, and a GraphQL client bound to a shop's Storefront API.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_data::{GraphqlClient, StorefrontConfig};
//!
//! let config = StorefrontConfig::new("hydrogen-preview.myshopify.com", "public-token");
//! let client = GraphqlClient::from_config(&config);
//!
//! let data: serde_json::Value = client.execute(
//!     "query Shop { shop { name } }",
//!     &serde_json::json!({}),
//! )?;
//! ```

mod config;
mod error;
mod graphql;
mod http;

pub use config::{StorefrontConfig, CONFIG_PATH_VAR, DEFAULT_API_VERSION, DEFAULT_CONFIG_PATH};
pub use error::{ConfigError, FetchError};
pub use graphql::{GraphqlClient, GraphqlError, GraphqlRequest, GraphqlResponse};
pub use http::{HttpClient, HttpRequest, HttpResponse, Method};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchError, GraphqlClient, HttpClient, StorefrontConfig};
}
