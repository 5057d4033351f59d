use crate::app_state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};
use estate_primitives::error::{ApiError, AuthError};
use estate_primitives::models::entities::{User, UserRole};
use estate_primitives::models::JWTInfo;
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

/// Identity of the caller, taken from verified token claims and passed
/// explicitly into every operation that needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|e| {
            error!("Invalid user ID in claims: {}", e);
            AuthError::InvalidToken("Invalid user ID".to_string())
        })
    }

    pub fn auth_user(&self) -> Result<AuthUser, AuthError> {
        Ok(AuthUser {
            id: self.user_id()?,
            email: self.email.clone(),
            role: self.role,
        })
    }
}

pub struct SecurityConfig;

impl SecurityConfig {
    pub fn create_token(jwt: &JWTInfo, user: &User) -> Result<String, ApiError> {
        let now = Utc::now();

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(jwt.jwt_expiration_hours)).timestamp(),
            iss: jwt.jwt_issuer.clone(),
            aud: jwt.jwt_audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(jwt.jwt_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            error!("JWT encoding error: {}", e);
            ApiError::Token("Token creation failed".into())
        })
    }

    fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
        let auth_header = headers
            .get(http::header::AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidFormat)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidFormat)?
            .trim();

        if token.is_empty() {
            return Err(AuthError::InvalidFormat);
        }

        Ok(token)
    }

    pub fn verify_token(jwt: &JWTInfo, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[jwt.jwt_issuer.as_str()]);
        validation.set_audience(&[jwt.jwt_audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(jwt.jwt_secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            AuthError::InvalidToken("Invalid or expired token".into())
        })
    }

    pub async fn auth_middleware(
        State(state): State<Arc<AppState>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, Response> {
        let user = Self::extract_bearer_token(req.headers())
            .and_then(|token| Self::verify_token(&state.config.jwt_details, token))
            .and_then(|claims| claims.auth_user())
            .map_err(|e| ApiError::from(e).into_response())?;

        req.extensions_mut().insert(user);
        Ok(next.run(req).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn jwt() -> JWTInfo {
        JWTInfo {
            jwt_secret: SecretString::new("0123456789abcdef0123456789abcdef".into()),
            jwt_expiration_hours: 1,
            jwt_issuer: "estate".into(),
            jwt_audience: "estate_api".into(),
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "agent@example.com".into(),
            name: None,
            password_hash: String::new(),
            role: UserRole::Admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_identity() {
        let user = user();
        let token = SecurityConfig::create_token(&jwt(), &user).unwrap();
        let claims = SecurityConfig::verify_token(&jwt(), &token).unwrap();
        let auth = claims.auth_user().unwrap();

        assert_eq!(auth.id, user.id);
        assert_eq!(auth.email, user.email);
        assert_eq!(auth.role, UserRole::Admin);
    }

    #[test]
    fn rejects_foreign_audience_and_secret() {
        let token = SecurityConfig::create_token(&jwt(), &user()).unwrap();

        let mut other_aud = jwt();
        other_aud.jwt_audience = "someone_else".into();
        assert!(SecurityConfig::verify_token(&other_aud, &token).is_err());

        let mut other_secret = jwt();
        other_secret.jwt_secret = SecretString::new("ffffffffffffffffffffffffffffffff".into());
        assert!(SecurityConfig::verify_token(&other_secret, &token).is_err());
    }

    #[test]
    fn bearer_header_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            SecurityConfig::extract_bearer_token(&headers),
            Err(AuthError::MissingHeader)
        ));

        headers.insert(http::header::AUTHORIZATION, "Token abc".parse().unwrap());
        assert!(matches!(
            SecurityConfig::extract_bearer_token(&headers),
            Err(AuthError::InvalidFormat)
        ));

        headers.insert(http::header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(SecurityConfig::extract_bearer_token(&headers).unwrap(), "abc");
    }
}
