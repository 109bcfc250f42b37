//! JWT-based implementation of the token verification port.
//!
//! The platform's HTTP service signs join tokens as HS256 JWTs with a
//! `userId` claim and no expiry. This adapter verifies the signature with the
//! shared HMAC secret and extracts that identity.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::domain::{AuthError, TokenVerifier, UserId};

/// Claims carried by platform join tokens.
///
/// Tokens also carry a `role` claim; it is irrelevant for presence and
/// ignored here.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: String,
}

/// Token verifier backed by HS256 JWT signatures
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Create a new JwtTokenVerifier from the shared HMAC secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Platform tokens carry no `exp`; accept its absence but still
        // reject a token whose `exp` is present and stale.
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        UserId::new(data.claims.user_id).map_err(|_| AuthError::MissingUserId)
    }
}
