//! HTTP request handlers

pub mod auth;
pub mod stash;

pub use auth::{login, logout, session_info};
pub use stash::stash_tabs;

use actix_web::HttpResponse;
use serde_json::json;

/// Health check endpoint
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
