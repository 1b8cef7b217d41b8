// Authentication handlers: login, logout and session introspection
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;

use crate::session::{SessionError, SessionManager};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
}

/// Start a session for an already-verified principal.
///
/// Credential checking (passwords, OAuth, ...) happens before this endpoint;
/// its only job is to mint the cookie-carried token.
///
/// # Errors
///
/// Returns `SessionError::Configuration` if the signing secret is unset
pub async fn login(
    body: web::Json<LoginRequest>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse, SessionError> {
    let mut response = HttpResponse::Ok().json(json!({
        "status": "signed_in",
        "user_id": body.user_id
    }));
    session_manager.start_session(&mut response, &body.user_id)?;
    info!("session started for user {}", body.user_id);
    Ok(response)
}

/// Clear the session cookie.
///
/// The issued token stays valid until natural expiry; only the client-side
/// copy is removed.
///
/// # Errors
///
/// Returns `SessionError::Configuration` if the cookie cannot be attached
pub async fn logout(
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse, SessionError> {
    let mut response = HttpResponse::Ok().json(json!({ "status": "signed_out" }));
    session_manager.end_session(&mut response)?;
    info!("session cleared");
    Ok(response)
}

/// Return the claims of the current session.
///
/// # Errors
///
/// Returns a 401-mapped `SessionError` when the request carries no valid
/// session cookie
pub async fn session_info(
    req: HttpRequest,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse, SessionError> {
    let claims = session_manager.authenticate(&req)?;
    debug!("session verified for user {:?}", claims.user_id);
    Ok(HttpResponse::Ok().json(claims))
}
