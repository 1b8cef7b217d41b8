// Authenticated access to the upstream stash inventory
use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;

use crate::session::SessionManager;
use crate::upstream::StashClient;

/// Fetch the stash tab listing for a league on behalf of the session's user.
///
/// # Errors
///
/// Returns a 401-mapped `SessionError` without a valid session, or an
/// `UpstreamError` translated from the stash API response
pub async fn stash_tabs(
    req: HttpRequest,
    path: web::Path<String>,
    session_manager: web::Data<SessionManager>,
    stash_client: web::Data<StashClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let claims = session_manager.authenticate(&req)?;
    let league = path.into_inner();
    debug!(
        "fetching stash tabs in league {league} for user {:?}",
        claims.user_id
    );

    let tabs = stash_client.fetch_tabs(&league).await?;
    Ok(HttpResponse::Ok().json(tabs))
}
