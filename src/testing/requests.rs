//! HTTP request builders for testing handlers

use actix_web::cookie::Cookie;
use actix_web::http::Method;
use actix_web::test::TestRequest;
use actix_web::HttpRequest;
use serde_json::Value;

/// Builder for creating HTTP requests for testing
pub struct RequestBuilder {
    method: Method,
    uri: String,
    cookies: Vec<Cookie<'static>>,
    body: Option<Value>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    /// Create a new request builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            uri: "/".to_string(),
            cookies: Vec::new(),
            body: None,
        }
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the request URI
    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = uri.to_string();
        self
    }

    /// Add a cookie to the request
    #[must_use]
    pub fn cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Build an `HttpRequest` for calling extractor-level code directly
    #[must_use]
    pub fn to_http_request(self) -> HttpRequest {
        self.into_test_request().to_http_request()
    }

    /// Build the underlying `TestRequest` for use with `test::call_service`
    #[must_use]
    pub fn into_test_request(self) -> TestRequest {
        let mut request = TestRequest::default().method(self.method).uri(&self.uri);
        for cookie in self.cookies {
            request = request.cookie(cookie);
        }
        if let Some(body) = self.body {
            request = request.set_json(body);
        }
        request
    }
}
