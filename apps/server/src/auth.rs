use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use workwise_core::constants::BEARER_TOKEN_TYPE;
use workwise_core::errors::{Error as CoreError, Result as CoreResult};
use workwise_core::users::{TokenIssuerTrait, UserIdentity};

use crate::error::ApiError;
use crate::main_lib::AppState;

/// Signs and validates HS256 access tokens.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    token_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}

/// The authenticated caller, placed in request extensions by [`require_jwt`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl AuthManager {
    /// `issuer` is used as both issuer and audience.
    pub fn new(secret: &[u8], issuer: &str, token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[issuer]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: issuer.to_string(),
            token_ttl,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("Rejected access token: {:?}", err.kind());
                ApiError::Unauthorized("Invalid or expired access token".to_string())
            })
    }
}

impl TokenIssuerTrait for AuthManager {
    fn issue_token(&self, identity: &UserIdentity) -> CoreResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| {
                CoreError::internal("Unable to issue token", "System clock is before UNIX_EPOCH")
            })?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: identity.user_id.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role.to_string(),
            iss: self.issuer.clone(),
            aud: self.issuer.clone(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            CoreError::internal("Unable to issue token", format!("Failed to sign token: {e}"))
        })
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let unauthorized = || ApiError::Unauthorized("Missing bearer token".to_string());

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(unauthorized());
    };

    if !scheme.eq_ignore_ascii_case(BEARER_TOKEN_TYPE) {
        return Err(unauthorized());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(unauthorized());
    }

    let claims = state.auth.validate_token(token)?;
    request
        .extensions_mut()
        .insert(AuthUser { user_id: claims.sub });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use workwise_core::Role;

    fn identity() -> UserIdentity {
        UserIdentity {
            user_id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_issued_token_validates() {
        let auth = AuthManager::new(&[7u8; 32], "workwise", Duration::from_secs(60));
        let token = auth.issue_token(&identity()).unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.aud, "workwise");
    }

    #[test]
    fn test_token_from_other_issuer_is_rejected() {
        let other = AuthManager::new(&[7u8; 32], "someone-else", Duration::from_secs(60));
        let token = other.issue_token(&identity()).unwrap();
        let auth = AuthManager::new(&[7u8; 32], "workwise", Duration::from_secs(60));
        assert!(auth.validate_token(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = AuthManager::new(&[1u8; 32], "workwise", Duration::from_secs(60));
        let token = other.issue_token(&identity()).unwrap();
        let auth = AuthManager::new(&[7u8; 32], "workwise", Duration::from_secs(60));
        assert!(auth.validate_token(&token).is_err());
    }

    #[test]
    fn test_decode_secret_key() {
        assert_eq!(
            decode_secret_key("not-base64-but-thirty-two-bytes!").unwrap(),
            b"not-base64-but-thirty-two-bytes!".to_vec()
        );
        assert_eq!(decode_secret_key(&BASE64.encode([3u8; 32])).unwrap(), vec![3u8; 32]);
        assert!(decode_secret_key("  ").is_err());
        assert!(decode_secret_key("short").is_err());
    }
}
