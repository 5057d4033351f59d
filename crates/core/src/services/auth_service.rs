use crate::app_state::AppState;
use crate::security::{AuthUser, SecurityConfig};
use argon2::password_hash::{PasswordHash, PasswordHasher, SaltString};
use rand_core::OsRng;
use argon2::{Argon2, Params, PasswordVerifier};
use estate_primitives::error::{ApiError, AuthError};
use estate_primitives::models::dtos::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use estate_primitives::models::entities::{NewUser, User};
use secrecy::{ExposeSecret, SecretString};
use std::sync::OnceLock;
use tracing::{error, info, warn};
use validator::Validate;

pub struct AuthService;

impl AuthService {
    pub async fn register(state: &AppState, payload: RegisterRequest) -> Result<AuthResponse, ApiError> {
        let payload = payload.normalize();
        payload.validate()?;

        let password = SecretString::new(payload.password.into());
        let password_hash = Self::blocking(move || Self::hash_password(&password)).await?;

        let user = state
            .users
            .create(NewUser {
                email: payload.email,
                name: payload.name,
                password_hash,
                role: payload.role.unwrap_or_default(),
            })
            .await?;

        let token = SecurityConfig::create_token(&state.config.jwt_details, &user)?;

        info!(user_id = %user.id, email = %user.email, "User registered successfully");

        Ok(AuthResponse {
            token,
            user: UserDto::from(&user),
        })
    }

    pub async fn login(state: &AppState, payload: LoginRequest) -> Result<AuthResponse, ApiError> {
        let payload = payload.normalize();
        payload.validate()?;

        let user = state.users.find_by_email(&payload.email).await?;

        let password = SecretString::new(payload.password.into());
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let verified = Self::blocking(move || Self::verify_password(&password, stored_hash.as_deref())).await?;

        let user = match (verified, user) {
            (true, Some(user)) => user,
            _ => {
                warn!("auth.login: invalid credentials");
                return Err(ApiError::Auth(AuthError::InvalidCredentials));
            }
        };

        let token = SecurityConfig::create_token(&state.config.jwt_details, &user)?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(AuthResponse {
            token,
            user: UserDto::from(&user),
        })
    }

    pub async fn current_user(state: &AppState, auth: &AuthUser) -> Result<UserDto, ApiError> {
        let user: User = state
            .users
            .find_by_id(auth.id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

        Ok(UserDto::from(&user))
    }

    async fn blocking<T, F>(f: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|e| ApiError::Internal(format!("Credential task failed: {}", e)))?
    }

    fn hash_password(password: &SecretString) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);

        Self::create_argon2()?
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| {
                error!("auth.register: password hashing failed");
                ApiError::Internal("Credential processing failed".into())
            })
    }

    /// Always runs a full verification, against a throwaway hash when the
    /// account does not exist, so unknown emails take as long as wrong
    /// passwords.
    fn verify_password(password: &SecretString, stored_hash: Option<&str>) -> Result<bool, ApiError> {
        let hash = match stored_hash {
            Some(hash) => hash,
            None => Self::dummy_hash()?,
        };

        let parsed = PasswordHash::new(hash).map_err(|_| {
            error!("auth.login: invalid password hash");
            ApiError::Internal("Authentication failure".into())
        })?;

        let matches = Self::create_argon2()?
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok();

        Ok(matches && stored_hash.is_some())
    }

    fn dummy_hash() -> Result<&'static str, ApiError> {
        static DUMMY: OnceLock<String> = OnceLock::new();

        if let Some(hash) = DUMMY.get() {
            return Ok(hash.as_str());
        }

        let hash = Self::hash_password(&SecretString::new("estate-dummy-password".into()))?;
        Ok(DUMMY.get_or_init(|| hash).as_str())
    }

    pub fn create_argon2() -> Result<Argon2<'static>, ApiError> {
        let params = Params::new(
            19456, // 19 MiB memory
            2,     // iterations
            1,     // parallelism
            None,
        )
        .map_err(|e| {
            error!("Argon2 params error: {}", e);
            ApiError::Internal("Encryption configuration error".to_string())
        })?;

        Ok(Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params))
    }
}
