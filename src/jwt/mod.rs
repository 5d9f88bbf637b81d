//! JWT token handling
//!
//! Minting and verification for LeadHub access tokens. The permission
//! snapshot embedded at login is advisory only: the guard always re-derives
//! grants from the store, so a stale snapshot can never widen access.

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Token type discriminator (prevents token confusion attacks)
    #[serde(default)]
    pub token_type: String,
    /// Organization ID embedded at login (platform-tier users have none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Permission snapshot captured at login. Advisory only.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

const AUDIENCE: &str = "leadhub";

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let algorithm = if config.private_key_pem.is_some() {
            Algorithm::RS256
        } else {
            Algorithm::HS256
        };
        let encoding_key = match config.private_key_pem.as_ref() {
            Some(private_key) => EncodingKey::from_rsa_pem(private_key.as_bytes())
                .expect("Failed to load JWT private key"),
            None => EncodingKey::from_secret(config.secret.as_bytes()),
        };
        let decoding_key = match config.public_key_pem.as_ref() {
            Some(public_key) => DecodingKey::from_rsa_pem(public_key.as_bytes())
                .expect("Failed to load JWT public key"),
            None => match config.private_key_pem.as_ref() {
                Some(private_key) => DecodingKey::from_rsa_pem(private_key.as_bytes())
                    .expect("Failed to load JWT private key"),
                None => DecodingKey::from_secret(config.secret.as_bytes()),
            },
        };
        Self {
            config,
            encoding_key,
            decoding_key,
            algorithm,
        }
    }

    /// Create a Validation with a strict leeway (5 seconds) instead of the
    /// default 60 seconds, so tokens expire promptly while tolerating minor
    /// clock skew.
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(self.algorithm);
        v.leeway = 5;
        v.set_audience(&[AUDIENCE]);
        v.set_issuer(&[&self.config.issuer]);
        v
    }

    /// Create an access token
    pub fn create_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        org_id: Option<Uuid>,
        permission_snapshot: Vec<String>,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.access_token_ttl_secs);

        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iss: self.config.issuer.clone(),
            aud: AUDIENCE.to_string(),
            token_type: "access".to_string(),
            org_id: org_id.map(|id| id.to_string()),
            permissions: permission_snapshot,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify and decode an access token
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.strict_validation())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken(e.to_string()),
            })?;
        Ok(token_data.claims)
    }

    /// Caller ID from a verified claim set.
    pub fn caller_id(claims: &AccessClaims) -> Result<Uuid> {
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::InvalidToken("Invalid user ID in token".to_string()))
    }

    /// Organization ID from a verified claim set, if present and well-formed.
    pub fn claim_org_id(claims: &AccessClaims) -> Option<Uuid> {
        claims
            .org_id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok())
    }

    /// Get token expiration TTL in seconds
    pub fn access_token_ttl(&self) -> i64 {
        self.config.access_token_ttl_secs
    }
}
