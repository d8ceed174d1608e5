//! Outbound HTTP for Spin components.
//!
//! Only what the Storefront API needs: JSON POSTs with a few fixed headers.
//! With the `spin` feature requests go through Spin's outbound HTTP; without
//! it [`HttpRequest::send`] fails with [`FetchError::Unsupported`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Client holding headers sent with every request.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    default_headers: BTreeMap<String, String>,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn post(&self, url: impl Into<String>) -> HttpRequest {
        self.request(Method::Post, url)
    }

    pub fn request(&self, method: Method, url: impl Into<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: url.into(),
            headers: self.default_headers.clone(),
            body: None,
        }
    }
}

/// A request under construction.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: String,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serialize `value` as the body and mark it `application/json`.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self.header("Content-Type", "application/json"))
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    #[cfg(feature = "spin")]
    pub fn send(self) -> Result<HttpResponse, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request, Response};

        let mut builder = Request::builder();
        builder
            .method(match self.method {
                Method::Get => SpinMethod::Get,
                Method::Post => SpinMethod::Post,
            })
            .uri(self.url.as_str());
        for (name, value) in &self.headers {
            builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = self.body {
            builder.body(body);
        }

        let response: Response = spin_sdk::http::run(spin_sdk::http::send(builder.build()))
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .map(|(name, value)| {
                (
                    name.to_ascii_lowercase(),
                    value.as_str().unwrap_or("").to_string(),
                )
            })
            .collect();
        Ok(HttpResponse {
            status,
            headers,
            body: response.into_body(),
        })
    }

    #[cfg(not(feature = "spin"))]
    pub fn send(self) -> Result<HttpResponse, FetchError> {
        Err(FetchError::Unsupported)
    }
}

/// A received response. Header names are lowercased.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Non-2xx statuses become [`FetchError::HttpError`] carrying the body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::HttpError {
            status: self.status,
            message: String::from_utf8_lossy(&self.body).into_owned(),
        })
    }
}
