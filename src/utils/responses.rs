//! JSON error responses
//!
//! One place for the error body shape so every handler and `ResponseError`
//! impl answers clients consistently.

use actix_web::{HttpResponse, HttpResponseBuilder};
use serde_json::json;

/// Builder for the JSON error responses used across the application
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Create an Unauthorized (401) JSON response
    #[must_use]
    pub fn unauthorized_json(description: &str) -> HttpResponse {
        Self::error_json(HttpResponse::Unauthorized(), "unauthorized", description)
    }

    /// Create a `BadRequest` (400) JSON response
    #[must_use]
    pub fn bad_request_json(description: &str) -> HttpResponse {
        Self::error_json(HttpResponse::BadRequest(), "invalid_request", description)
    }

    /// Create a `NotFound` (404) JSON response
    #[must_use]
    pub fn not_found_json(description: &str) -> HttpResponse {
        Self::error_json(HttpResponse::NotFound(), "not_found", description)
    }

    /// Create a `TooManyRequests` (429) JSON response
    #[must_use]
    pub fn rate_limited_json(description: &str) -> HttpResponse {
        Self::error_json(HttpResponse::TooManyRequests(), "rate_limited", description)
    }

    /// Create a `BadGateway` (502) JSON response
    #[must_use]
    pub fn bad_gateway_json(description: &str) -> HttpResponse {
        Self::error_json(HttpResponse::BadGateway(), "bad_gateway", description)
    }

    /// Create an `InternalServerError` (500) JSON response
    #[must_use]
    pub fn internal_error_json(description: &str) -> HttpResponse {
        Self::error_json(
            HttpResponse::InternalServerError(),
            "server_error",
            description,
        )
    }

    fn error_json(
        mut builder: HttpResponseBuilder,
        error: &str,
        description: &str,
    ) -> HttpResponse {
        builder.json(json!({
            "error": error,
            "error_description": description
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ResponseBuilder::unauthorized_json("x").status(), 401);
        assert_eq!(ResponseBuilder::bad_request_json("x").status(), 400);
        assert_eq!(ResponseBuilder::not_found_json("x").status(), 404);
        assert_eq!(ResponseBuilder::rate_limited_json("x").status(), 429);
        assert_eq!(ResponseBuilder::bad_gateway_json("x").status(), 502);
        assert_eq!(ResponseBuilder::internal_error_json("x").status(), 500);
    }
}
