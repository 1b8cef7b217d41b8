//! Token Codec - Signed Session Credentials
//!
//! Single source of truth for the token format used by the session layer:
//! a compact three-segment HS256 JWT (`base64url(header).base64url(payload).base64url(signature)`)
//! carrying the claims of an authenticated principal. Issuing and verifying
//! are pure functions of the token, the injected secret key, and the clock.

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The only signing algorithm this service accepts. Tokens whose header
/// declares anything else are rejected before signature verification.
pub const TOKEN_ALGORITHM: &str = "HS256";

/// Validity window applied to every issued token, embedded in the signed
/// payload as the `exp` claim (24 hours)
pub const TOKEN_VALIDITY_SECS: i64 = 86_400;

/// Entropy of a generated token id (128 bits, base64url-encoded)
const TOKEN_ID_BYTES: usize = 16;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug)]
pub enum TokenError {
    /// The signing secret is missing or empty. Never attributable to the
    /// client; surfaced as a server-side fault.
    Configuration(String),
    /// The token does not parse as a three-segment compact JWT.
    Malformed(String),
    /// The signature does not match, or the header declares a foreign algorithm.
    InvalidSignature,
    /// The token is outside its signed validity window.
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "token configuration error: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed token: {msg}"),
            Self::InvalidSignature => write!(f, "token signature verification failed"),
            Self::Expired => write!(f, "token is outside its validity window"),
        }
    }
}

impl std::error::Error for TokenError {}

// =============================================================================
// Token Structures
// =============================================================================

/// Claims carried inside a signed token.
///
/// A `Claims` value is created once at signing time and never mutated;
/// any change to the serialized payload invalidates the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Unique id of this token instance, fresh per issuance
    pub jti: String,
    /// Issuance time, seconds since epoch
    pub iat: i64,
    /// End of the validity window, seconds since epoch
    pub exp: i64,
    /// The authenticated principal. Structurally optional: a token with no
    /// subject still verifies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

impl TokenHeader {
    fn hs256() -> Self {
        Self {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}

// =============================================================================
// Token Codec
// =============================================================================

/// Issues and verifies signed session tokens with an injected secret key.
///
/// The secret is provided at construction rather than read from ambient
/// process state, so codecs for different keys can coexist in tests.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a signed token for `user_id`, valid for the next 24 hours.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Configuration` if the signing secret is empty.
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Verify a token against the secret and the current wall clock,
    /// returning its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed` for anything that is not a
    /// three-segment compact token, `TokenError::InvalidSignature` for a
    /// signature mismatch or a foreign `alg` header, `TokenError::Expired`
    /// outside the validity window, and `TokenError::Configuration` if the
    /// secret is empty.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Issue a token with an explicit issuance time.
    pub(crate) fn issue_at(&self, user_id: &str, issued_at: i64) -> Result<String, TokenError> {
        let claims = Claims {
            jti: generate_token_id(),
            iat: issued_at,
            exp: issued_at + TOKEN_VALIDITY_SECS,
            user_id: Some(user_id.to_string()),
        };

        let header = serde_json::to_vec(&TokenHeader::hs256())
            .map_err(|e| TokenError::Configuration(format!("failed to encode header: {e}")))?;
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| TokenError::Configuration(format!("failed to encode claims: {e}")))?;

        let signing_input = format!(
            "{}.{}",
            general_purpose::URL_SAFE_NO_PAD.encode(header),
            general_purpose::URL_SAFE_NO_PAD.encode(payload)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{signing_input}.{}",
            general_purpose::URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify a token against an explicit clock reading.
    pub(crate) fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(TokenError::Malformed(
                "expected three dot-separated segments".to_string(),
            ));
        }

        let header_bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(parts[0])
            .map_err(|e| TokenError::Malformed(format!("invalid header encoding: {e}")))?;
        let header: TokenHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| TokenError::Malformed(format!("invalid header JSON: {e}")))?;

        // Algorithm binding: exactly one algorithm is allowed. A token that
        // names any other (or none) fails as if forged, even if its signature
        // would otherwise check out.
        if header.alg != TOKEN_ALGORITHM {
            return Err(TokenError::InvalidSignature);
        }

        let signature = general_purpose::URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|e| TokenError::Malformed(format!("invalid signature encoding: {e}")))?;

        let mut mac = self.mac()?;
        mac.update(parts[0].as_bytes());
        mac.update(b".");
        mac.update(parts[1].as_bytes());
        // verify_slice compares in constant time
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload_bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|e| TokenError::Malformed(format!("invalid claims encoding: {e}")))?;
        let claims: Claims = serde_json::from_slice(&payload_bytes)
            .map_err(|e| TokenError::Malformed(format!("invalid claims JSON: {e}")))?;

        // Zero clock-skew tolerance: valid only within iat <= now < exp
        if now < claims.iat || now >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::Configuration(
                "signing secret is not set".to_string(),
            ));
        }
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| TokenError::Configuration(format!("invalid signing secret: {e}")))
    }
}

/// Generate a fresh token id: 16 bytes of entropy, base64url-encoded.
///
/// More compact than a UUID for the same collision odds, and safe to call
/// from concurrent request handlers (thread-local RNG).
#[must_use]
pub fn generate_token_id() -> String {
    let mut bytes = [0u8; TOKEN_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
