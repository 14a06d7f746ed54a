use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::AccessClaims;
use super::claims::RefreshClaims;
use super::errors::TokenError;

/// Secrets and expiries for both token classes.
///
/// Injected at construction so tests can pin expiries; nothing in the
/// issuer reads ambient process state.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub access_ttl: Duration,
    pub refresh_secret: String,
    pub refresh_ttl: Duration,
}

struct TokenClass {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenClass {
    fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

/// Issues and verifies the two session token classes.
///
/// Access and refresh tokens are signed with independent secrets, so a
/// token of one class never verifies as the other. Uses HS256 (HMAC with
/// SHA-256) with zero clock leeway: a token is expired the second its
/// `exp` claim passes.
///
/// # Security Notes
/// - Each secret should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in configuration or secure vaults, never in code
pub struct TokenIssuer {
    access: TokenClass,
    refresh: TokenClass,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new token issuer from configured secrets and expiries.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            access: TokenClass::new(config.access_secret.as_bytes(), config.access_ttl),
            refresh: TokenClass::new(config.refresh_secret.as_bytes(), config.refresh_ttl),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed access token for a subject.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_access(
        &self,
        sub: &str,
        username: &str,
        email: &str,
        full_name: &str,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims::new(sub, username, email, full_name, self.access.ttl);
        self.encode(&claims, &self.access.encoding_key)
    }

    /// Issue a signed refresh token carrying only the subject.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_refresh(&self, sub: &str) -> Result<String, TokenError> {
        let claims = RefreshClaims::new(sub, self.refresh.ttl);
        self.encode(&claims, &self.refresh.encoding_key)
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Signature or structure check failed (malformed, wrong
    ///   secret, or tampered payload)
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode(token, &self.access.decoding_key)
    }

    /// Verify a refresh token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Signature or structure check failed (malformed, wrong
    ///   secret, or tampered payload)
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decode(token, &self.refresh.decoding_key)
    }

    fn encode<T: Serialize>(&self, claims: &T, key: &EncodingKey) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, key).map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, token: &str, key: &DecodingKey) -> Result<T, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<T>(token, key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig {
            access_secret: "access_secret_at_least_32_bytes_long!".to_string(),
            access_ttl: Duration::minutes(15),
            refresh_secret: "refresh_secret_at_least_32_bytes_long".to_string(),
            refresh_ttl: Duration::days(10),
        }
    }

    #[test]
    fn test_access_round_trip() {
        let issuer = TokenIssuer::new(&test_config());

        let token = issuer
            .issue_access("user123", "alice", "alice@example.com", "Alice Doe")
            .expect("Failed to issue access token");

        let claims = issuer
            .verify_access(&token)
            .expect("Failed to verify access token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.full_name, "Alice Doe");
    }

    #[test]
    fn test_refresh_round_trip() {
        let issuer = TokenIssuer::new(&test_config());

        let token = issuer
            .issue_refresh("user123")
            .expect("Failed to issue refresh token");

        let claims = issuer
            .verify_refresh(&token)
            .expect("Failed to verify refresh token");
        assert_eq!(claims.sub, "user123");
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = TokenConfig {
            access_ttl: Duration::seconds(-5),
            ..test_config()
        };
        let issuer = TokenIssuer::new(&config);

        let token = issuer
            .issue_access("user123", "alice", "alice@example.com", "Alice Doe")
            .expect("Failed to issue access token");

        let result = issuer.verify_access(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let issuer = TokenIssuer::new(&test_config());

        let token = issuer
            .issue_refresh("user123")
            .expect("Failed to issue refresh token");

        // Flip one character in the signature segment.
        let signature_start = token.rfind('.').unwrap() + 1;
        let original = token.as_bytes()[signature_start] as char;
        let flipped = if original == 'A' { 'B' } else { 'A' };
        let mut tampered = token.clone();
        tampered.replace_range(signature_start..signature_start + 1, &flipped.to_string());

        let result = issuer.verify_refresh(&tampered);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_cross_class_verification_rejected() {
        let issuer = TokenIssuer::new(&test_config());

        let refresh = issuer
            .issue_refresh("user123")
            .expect("Failed to issue refresh token");

        // Signed with the refresh secret, so the access verifier must reject it.
        let result = issuer.verify_access(&refresh);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenIssuer::new(&test_config());
        let other = TokenIssuer::new(&TokenConfig {
            refresh_secret: "a_completely_different_32_byte_secret".to_string(),
            ..test_config()
        });

        let token = issuer
            .issue_refresh("user123")
            .expect("Failed to issue refresh token");

        let result = other.verify_refresh(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let issuer = TokenIssuer::new(&test_config());

        let result = issuer.verify_access("not.a.token");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }
}
