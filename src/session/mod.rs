//! Session Management Module
//!
//! Binds the token codec to the transport-level cookie channel.
//!
//! # Modules
//!
//! - [`manager`] - Core session manager for cookie-carried credentials
//! - [`cookie`] - Cookie construction utilities

pub mod cookie;
pub mod manager;

// Re-export commonly used items for convenience
pub use cookie::{create_expired_cookie, create_session_cookie, CookieOptions, COOKIE_NAME};
pub use manager::{SessionError, SessionManager};
