//! Session Manager - Cookie Lifecycle over the Token Codec
//!
//! Bridges [`TokenCodec`](crate::token::TokenCodec) to the request/response
//! cookie channel: reads the credential from an inbound request, writes a
//! freshly issued credential onto an outbound response, and clears it on
//! logout. Holds no state beyond the codec and the cookie `Secure` flag, so
//! cloning one per worker is free of coordination.

use actix_web::{HttpRequest, HttpResponse, ResponseError};
use log::debug;

use crate::session::cookie::{create_expired_cookie, create_session_cookie, COOKIE_NAME};
use crate::settings::StashgateSettings;
use crate::token::{Claims, TokenCodec, TokenError};
use crate::utils::responses::ResponseBuilder;

// =============================================================================
// Types and Error Handling
// =============================================================================

#[derive(Debug)]
pub enum SessionError {
    /// No session cookie on the request: the caller is unauthenticated.
    MissingCredential,
    /// The presented credential did not verify. Malformed, forged and
    /// expired tokens all collapse into this one variant so the client
    /// cannot distinguish tampering from natural expiry.
    SessionExpired,
    /// The session layer itself is misconfigured (missing secret). Never
    /// collapsed into `SessionExpired`; surfaced as a server fault.
    Configuration(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing session cookie"),
            Self::SessionExpired => write!(f, "session is invalid or has expired"),
            Self::Configuration(msg) => write!(f, "session configuration error: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl ResponseError for SessionError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            Self::MissingCredential | Self::SessionExpired => {
                actix_web::http::StatusCode::UNAUTHORIZED
            }
            Self::Configuration(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::MissingCredential | Self::SessionExpired => {
                ResponseBuilder::unauthorized_json("Authentication required")
            }
            Self::Configuration(_) => ResponseBuilder::internal_error_json("Internal server error"),
        }
    }
}

// =============================================================================
// Session Manager
// =============================================================================

/// Session manager for stateless cookie-carried credentials
#[derive(Clone)]
pub struct SessionManager {
    codec: TokenCodec,
    cookie_secure: bool,
}

impl SessionManager {
    /// Create a new session manager with the provided secret and cookie settings
    #[must_use]
    pub fn new(secret: &[u8], cookie_secure: bool) -> Self {
        Self {
            codec: TokenCodec::new(secret),
            cookie_secure,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &StashgateSettings) -> Self {
        Self::new(
            settings.session.session_secret.as_bytes(),
            settings.cookies.secure,
        )
    }

    /// Read and verify the session credential from a request.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingCredential` if the session cookie is
    /// absent, `SessionError::SessionExpired` for any credential that fails
    /// verification, and `SessionError::Configuration` if the signing secret
    /// is unset.
    pub fn authenticate(&self, req: &HttpRequest) -> Result<Claims, SessionError> {
        let cookie = req
            .cookie(COOKIE_NAME)
            .ok_or(SessionError::MissingCredential)?;

        match self.codec.verify(cookie.value()) {
            Ok(claims) => Ok(claims),
            Err(TokenError::Configuration(msg)) => Err(SessionError::Configuration(msg)),
            Err(err) => {
                // Keep the precise cause in the log for audit, return the
                // coarse error to the caller
                debug!("rejecting session cookie: {err}");
                Err(SessionError::SessionExpired)
            }
        }
    }

    /// Issue a credential for `user_id` and attach it to the response as the
    /// session cookie. The response is mutated in place.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if the signing secret is unset
    /// or the cookie cannot be attached.
    pub fn start_session(
        &self,
        response: &mut HttpResponse,
        user_id: &str,
    ) -> Result<(), SessionError> {
        let token = match self.codec.issue(user_id) {
            Ok(token) => token,
            Err(TokenError::Configuration(msg)) => return Err(SessionError::Configuration(msg)),
            Err(err) => return Err(SessionError::Configuration(err.to_string())),
        };

        let cookie = create_session_cookie(token, self.cookie_secure);
        response
            .add_cookie(&cookie)
            .map_err(|e| SessionError::Configuration(format!("failed to attach cookie: {e}")))?;
        Ok(())
    }

    /// Overwrite the session cookie with an empty, immediately expiring one.
    ///
    /// The token itself stays structurally valid until natural expiry; with
    /// no server-side store, logout only removes the client's copy.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if the cookie cannot be attached.
    pub fn end_session(&self, response: &mut HttpResponse) -> Result<(), SessionError> {
        let cookie = create_expired_cookie(self.cookie_secure);
        response
            .add_cookie(&cookie)
            .map_err(|e| SessionError::Configuration(format!("failed to attach cookie: {e}")))?;
        Ok(())
    }

    /// Whether session cookies are written with the `Secure` attribute
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}
