//! Test fixtures providing pre-built test objects

use super::constants::TEST_SESSION_SECRET;
use crate::session::SessionManager;
use crate::settings::{CookieSettings, SessionSettings, StashgateSettings};
use crate::token::TokenCodec;

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// Create a session manager with default test configuration
    /// (insecure cookies, known secret)
    #[must_use]
    pub fn session_manager() -> SessionManager {
        SessionManager::new(TEST_SESSION_SECRET.as_bytes(), false)
    }

    /// Create a token codec keyed with the test secret
    #[must_use]
    pub fn token_codec() -> TokenCodec {
        TokenCodec::new(TEST_SESSION_SECRET)
    }

    /// Create settings preconfigured for tests
    #[must_use]
    pub fn settings() -> StashgateSettings {
        StashgateSettings {
            session: SessionSettings {
                session_secret: TEST_SESSION_SECRET.to_string(),
            },
            cookies: CookieSettings { secure: false },
            ..StashgateSettings::default()
        }
    }
}
