//! Operator token utilities using RS256 JWTs.
//!
//! Operator tokens are issued by an external identity system; this module
//! only validates them and exposes the claims the check-in surfaces need
//! (role and assigned serving station). Token generation is kept for the
//! admin tooling and the integration test fixtures.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for operator token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Role carried in an operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorRole {
    /// Full administrative access (inventory resets, bulk import).
    Admin,
    /// Door operator: pure access control, never decrements vouchers.
    Operative,
    /// Meal-station operator: grants decrement meal vouchers.
    Mesa,
}

/// Operator token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorClaims {
    /// Subject (operator ID)
    pub sub: String,
    /// Operator display name
    pub name: String,
    /// Operator email
    pub email: String,
    /// Operator role
    pub role: OperatorRole,
    /// Assigned serving station (mesa operators only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<i32>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for operator token validation (and generation in tooling).
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token expiration in seconds (default: 43200 = 12 hours, one event day)
    pub token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance (default: 30)
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new JwtConfig from an RSA key pair in PEM format.
    pub fn new(
        private_key_pem: &str,
        public_key_pem: &str,
        token_expiry_secs: i64,
    ) -> Result<Self, JwtError> {
        Self::with_leeway(
            private_key_pem,
            public_key_pem,
            token_expiry_secs,
            DEFAULT_LEEWAY_SECS,
        )
    }

    /// Creates a new JwtConfig with custom clock-skew leeway.
    pub fn with_leeway(
        private_key_pem: &str,
        public_key_pem: &str,
        token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            token_expiry_secs,
            leeway_secs,
        })
    }

    /// Creates a JwtConfig for testing with an HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_secs: 43200,
            leeway_secs: 0, // Strict for testing - no leeway
        }
    }

    /// Generates an operator token.
    pub fn generate_token(
        &self,
        operator_id: Uuid,
        name: &str,
        email: &str,
        role: OperatorRole,
        station: Option<i32>,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = OperatorClaims {
            sub: operator_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            station,
            exp: (now + Duration::seconds(self.token_expiry_secs)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header::new(self.algorithm());
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<OperatorClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm());
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data =
            decode::<OperatorClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidToken
                    | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                    _ => JwtError::DecodingError(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Returns the algorithm used by this config.
    /// Tests use HS256, production uses RS256.
    fn algorithm(&self) -> Algorithm {
        #[cfg(test)]
        {
            Algorithm::HS256
        }
        #[cfg(not(test))]
        {
            Algorithm::RS256
        }
    }
}

/// Extracts the operator ID from validated claims.
pub fn extract_operator_id(claims: &OperatorClaims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> JwtConfig {
        JwtConfig::new_for_testing("test_secret_key_for_jwt_testing_12345")
    }

    #[test]
    fn generate_and_validate_round_trip() {
        let config = create_test_config();
        let operator_id = Uuid::new_v4();

        let token = config
            .generate_token(
                operator_id,
                "Mesa Three",
                "mesa3@event.example",
                OperatorRole::Mesa,
                Some(3),
            )
            .expect("token generation should succeed");

        let claims = config.validate_token(&token).expect("validation");
        assert_eq!(claims.sub, operator_id.to_string());
        assert_eq!(claims.role, OperatorRole::Mesa);
        assert_eq!(claims.station, Some(3));
        assert_eq!(extract_operator_id(&claims).unwrap(), operator_id);
    }

    #[test]
    fn admin_claims_carry_no_station() {
        let config = create_test_config();
        let token = config
            .generate_token(
                Uuid::new_v4(),
                "Admin",
                "admin@event.example",
                OperatorRole::Admin,
                None,
            )
            .unwrap();

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.role, OperatorRole::Admin);
        assert!(claims.station.is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut config = create_test_config();
        config.token_expiry_secs = -10;

        let token = config
            .generate_token(
                Uuid::new_v4(),
                "Door",
                "door@event.example",
                OperatorRole::Operative,
                None,
            )
            .unwrap();

        match config.validate_token(&token) {
            Err(JwtError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.err()),
        }
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = create_test_config();
        assert!(config.validate_token("not-a-token").is_err());
    }
}
