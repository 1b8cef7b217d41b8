//! Cookie construction for the session credential

use actix_web::cookie::{Cookie, SameSite};

use crate::token::TOKEN_VALIDITY_SECS;

/// Name of the session cookie. Read and write sides must agree on it.
pub const COOKIE_NAME: &str = "stashgate_session";

/// Cookie lifetime in seconds, aligned with the token validity window so the
/// client drops the cookie when the credential inside it stops verifying.
pub const COOKIE_MAX_AGE_SECS: i64 = TOKEN_VALIDITY_SECS;

/// Options for cookie creation
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age: actix_web::cookie::time::Duration,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: actix_web::cookie::time::Duration::seconds(COOKIE_MAX_AGE_SECS),
        }
    }
}

/// Build the session cookie carrying a freshly issued token
#[must_use]
pub fn create_session_cookie(token: String, secure: bool) -> Cookie<'static> {
    build_cookie(
        token,
        CookieOptions {
            secure,
            ..CookieOptions::default()
        },
    )
}

/// Build an empty cookie with `Max-Age=0`, instructing the client to delete
/// its copy of the credential immediately
#[must_use]
pub fn create_expired_cookie(secure: bool) -> Cookie<'static> {
    build_cookie(
        String::new(),
        CookieOptions {
            secure,
            max_age: actix_web::cookie::time::Duration::seconds(0),
            ..CookieOptions::default()
        },
    )
}

fn build_cookie(value: String, options: CookieOptions) -> Cookie<'static> {
    Cookie::build(COOKIE_NAME, value)
        .http_only(options.http_only)
        .secure(options.secure)
        .same_site(options.same_site)
        .path(options.path)
        .max_age(options.max_age)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = create_session_cookie("some.signed.token".to_string(), true);
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.value(), "some.signed.token");
        assert!(cookie.http_only().unwrap());
        assert!(cookie.secure().unwrap());
        assert_eq!(cookie.path().unwrap(), "/");
        assert_eq!(
            cookie.max_age().unwrap().whole_seconds(),
            COOKIE_MAX_AGE_SECS
        );
    }

    #[test]
    fn test_secure_flag_follows_configuration() {
        let cookie = create_session_cookie("token".to_string(), false);
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_expired_cookie_clears_the_value() {
        let cookie = create_expired_cookie(true);
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert!(cookie.http_only().unwrap());
        assert_eq!(cookie.max_age().unwrap().whole_seconds(), 0);
    }
}
