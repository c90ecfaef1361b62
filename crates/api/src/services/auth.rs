//! Authentication service.
//!
//! Registration, login, refresh rotation, and logout on top of the user
//! and session repositories. Tokens are JWTs; refresh tokens are stored
//! hashed so a database leak does not leak usable tokens.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::profile::{Profile, ProfileResponse};
use persistence::repositories::{ProfileRepository, UserRepository};
use shared::crypto::sha256_hex;
use shared::jwt::JwtConfig;
use shared::password::{hash_password, verify_password};

use crate::config::JwtAuthConfig;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// Issued token pair plus the caller's profile.
#[derive(Debug)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in_secs: i64,
    pub profile: ProfileResponse,
}

pub struct AuthService {
    users: UserRepository,
    profiles: ProfileRepository,
    jwt: JwtConfig,
    refresh_expiry_secs: i64,
    access_expiry_secs: i64,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_config: &JwtAuthConfig) -> Result<Self, ApiError> {
        let jwt = UserAuth::create_jwt_config(jwt_config).map_err(ApiError::Internal)?;
        Ok(Self {
            users: UserRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool),
            jwt,
            refresh_expiry_secs: jwt_config.refresh_token_expiry_secs,
            access_expiry_secs: jwt_config.access_token_expiry_secs,
        })
    }

    /// Register a new account with its profile and sign the user in.
    #[allow(clippy::too_many_arguments)]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: &str,
        department: Option<&str>,
        batch: Option<&str>,
        roll_number: Option<&str>,
    ) -> Result<AuthTokens, ApiError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".into()));
        }

        let password_hash =
            hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))?;

        let (user, profile) = self
            .users
            .create_with_profile(
                email,
                &password_hash,
                full_name,
                role,
                department,
                batch,
                roll_number,
            )
            .await?;

        self.issue_tokens(user.id, profile.into()).await
    }

    /// Verify credentials and issue a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ApiError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        if !valid {
            return Err(invalid_credentials());
        }

        // Logins double as the session sweep; there is no background job
        // pruning expired rows.
        let purged = self.users.delete_expired_sessions().await?;
        if purged > 0 {
            tracing::debug!(purged, "Dropped expired sessions");
        }

        let profile = self.load_profile(user.id).await?;
        self.issue_tokens(user.id, profile).await
    }

    /// Rotate a refresh token into a fresh token pair.
    ///
    /// The presented token is hashed and matched against live sessions;
    /// a successful rotation invalidates the old pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ApiError> {
        self.jwt
            .validate_refresh_token(refresh_token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired refresh token".into()))?;

        let hash = sha256_hex(refresh_token);
        let session = self
            .users
            .find_session_by_refresh_hash(&hash)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired refresh token".into()))?;

        let (access_token, access_jti) = self
            .jwt
            .generate_access_token(session.user_id)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let (new_refresh_token, _) = self
            .jwt
            .generate_refresh_token(session.user_id)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let expires_at = Utc::now() + Duration::seconds(self.refresh_expiry_secs);
        self.users
            .rotate_session(
                session.id,
                &sha256_hex(&new_refresh_token),
                &access_jti,
                expires_at,
            )
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Session no longer valid".into()))?;

        let profile = self.load_profile(session.user_id).await?;

        Ok(AuthTokens {
            access_token,
            refresh_token: new_refresh_token,
            expires_in_secs: self.access_expiry_secs,
            profile: profile.into(),
        })
    }

    /// Drop the session behind the presented access token.
    pub async fn logout(&self, access_jti: &str) -> Result<(), ApiError> {
        self.users.delete_session_by_access_jti(access_jti).await?;
        Ok(())
    }

    async fn load_profile(&self, user_id: Uuid) -> Result<Profile, ApiError> {
        let entity = self
            .profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| ApiError::Internal("Profile missing for user".into()))?;
        Ok(entity.into())
    }

    async fn issue_tokens(&self, user_id: Uuid, profile: Profile) -> Result<AuthTokens, ApiError> {
        let (access_token, access_jti) = self
            .jwt
            .generate_access_token(user_id)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let (refresh_token, _) = self
            .jwt
            .generate_refresh_token(user_id)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let expires_at = Utc::now() + Duration::seconds(self.refresh_expiry_secs);
        self.users
            .create_session(user_id, &sha256_hex(&refresh_token), &access_jti, expires_at)
            .await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            expires_in_secs: self.access_expiry_secs,
            profile: profile.into(),
        })
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password".into())
}
