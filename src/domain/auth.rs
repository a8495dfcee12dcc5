use crate::error::{AppError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The claim set carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    #[must_use]
    pub fn new(username: impl Into<String>, ttl_secs: u64) -> Self {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default();
        Self { username: username.into(), iat: now, exp: now.saturating_add(ttl_secs) }
    }

    /// Signs the claims with HS256.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if signing fails.
    pub fn encode(&self, secret: &str) -> Result<String> {
        encode(&Header::default(), self, &EncodingKey::from_secret(secret.as_bytes())).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign identity token");
            AppError::Internal
        })
    }

    /// Verifies the signature and expiry of a token and returns its claims.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` for any malformed, forged or expired token.
    pub fn decode(token: &str, secret: &str) -> Result<Self> {
        let token_data = decode::<Self>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected identity token");
                AppError::Unauthorized
            })?;

        Ok(token_data.claims)
    }
}

/// The authenticated caller of a request. Built once per request from verified claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    username: String,
}

impl Identity {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self { username: claims.username }
    }
}

#[cfg(test)]
impl Identity {
    pub(crate) fn for_tests(username: &str) -> Self {
        Self { username: username.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_roundtrip() {
        let secret = "test_secret";
        let claims = Claims::new("alice", 3600);

        let token = claims.encode(secret).unwrap();
        let decoded = Claims::decode(&token, secret).unwrap();

        assert_eq!(claims, decoded);
        assert_eq!(Identity::from(decoded).username(), "alice");
    }

    #[test]
    fn test_claims_invalid_secret() {
        let claims = Claims::new("alice", 3600);
        let token = claims.encode("secret1").unwrap();

        let result = Claims::decode(&token, "secret2");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_claims_expired() {
        let claims = Claims { username: "alice".to_string(), iat: 1_000, exp: 2_000 };
        let token = claims.encode("secret").unwrap();

        let result = Claims::decode(&token, "secret");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_claims_garbage() {
        let result = Claims::decode("not.a.jwt", "secret");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
