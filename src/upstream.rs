//! Upstream stash API client
//!
//! Thin wrapper around the upstream inventory endpoint. This is an external
//! collaborator of the session core: nothing in `token` or `session` depends
//! on it, and it carries no protocol state of its own beyond translating
//! upstream status codes into this service's error shape.

use actix_web::{HttpResponse, ResponseError};
use log::debug;
use reqwest::{header, Client, StatusCode};
use thiserror::Error;

use crate::settings::UpstreamSettings;
use crate::utils::responses::ResponseBuilder;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("bad request to the stash API")]
    BadRequest,
    #[error("stash not found")]
    NotFound,
    #[error("stash API rate limit exceeded")]
    RateLimited,
    #[error("stash API returned {0}")]
    Upstream(StatusCode),
    #[error("failed to reach the stash API: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ResponseError for UpstreamError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            Self::BadRequest => actix_web::http::StatusCode::BAD_REQUEST,
            Self::NotFound => actix_web::http::StatusCode::NOT_FOUND,
            Self::RateLimited => actix_web::http::StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream(_) | Self::Transport(_) => actix_web::http::StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::BadRequest => ResponseBuilder::bad_request_json("Bad request"),
            Self::NotFound => ResponseBuilder::not_found_json("Not found"),
            Self::RateLimited => {
                ResponseBuilder::rate_limited_json("Too many requests. Please try again later.")
            }
            Self::Upstream(_) | Self::Transport(_) => {
                ResponseBuilder::bad_gateway_json("Failed to connect to upstream server")
            }
        }
    }
}

/// Client for the upstream stash inventory API
#[derive(Clone)]
pub struct StashClient {
    http: Client,
    base_url: String,
    access_token: String,
    user_agent: String,
}

impl StashClient {
    #[must_use]
    pub fn from_settings(settings: &UpstreamSettings) -> Self {
        Self {
            http: Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_token: settings.access_token.clone(),
            user_agent: service_user_agent(&settings.client_id, &settings.contact_email),
        }
    }

    /// Fetch the stash tab listing for a league.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` translated from the upstream status code,
    /// or `UpstreamError::Transport` if the request itself fails.
    pub async fn fetch_tabs(&self, league: &str) -> Result<serde_json::Value, UpstreamError> {
        let url = format!("{}/stash/{league}/", self.base_url);
        debug!("fetching stash tabs from {url}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        translate_status(response.status())?;
        Ok(response.json().await?)
    }
}

/// User-Agent the upstream API expects from OAuth clients:
/// `OAuth <client_id>/1.0.0 (contact: <email>)`
fn service_user_agent(client_id: &str, contact_email: &str) -> String {
    format!("OAuth {client_id}/1.0.0 (contact: {contact_email})")
}

/// Map an upstream status code onto this service's error taxonomy
fn translate_status(status: StatusCode) -> Result<(), UpstreamError> {
    match status {
        StatusCode::BAD_REQUEST => Err(UpstreamError::BadRequest),
        StatusCode::NOT_FOUND => Err(UpstreamError::NotFound),
        StatusCode::TOO_MANY_REQUESTS => Err(UpstreamError::RateLimited),
        status if status.is_success() => Ok(()),
        status => Err(UpstreamError::Upstream(status)),
    }
}
