//! User and session repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ProfileEntity, SessionEntity, UserEntity};
use crate::metrics::QueryTimer;

/// Repository for auth users and their sessions.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user and its profile in a single transaction.
    ///
    /// Either both rows exist afterwards or neither does; there is no
    /// account-without-profile state.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_with_profile(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
        role: &str,
        department: Option<&str>,
        batch: Option<&str>,
        roll_number: Option<&str>,
    ) -> Result<(UserEntity, ProfileEntity), sqlx::Error> {
        let timer = QueryTimer::new("create_user_with_profile");

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let profile = sqlx::query_as::<_, ProfileEntity>(
            r#"
            INSERT INTO profiles (user_id, email, full_name, role, department, batch, roll_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(email)
        .bind(full_name)
        .bind(role)
        .bind(department)
        .bind(batch)
        .bind(roll_number)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok((user, profile))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record an issued token pair.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        access_jti: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_session");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            INSERT INTO sessions (user_id, refresh_token_hash, access_jti, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(access_jti)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an unexpired session by refresh token hash.
    pub async fn find_session_by_refresh_hash(
        &self,
        refresh_token_hash: &str,
    ) -> Result<Option<SessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_session_by_refresh_hash");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT * FROM sessions
            WHERE refresh_token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(refresh_token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete the session behind an access token.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete_session_by_access_jti(&self, access_jti: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_session_by_access_jti");
        let result = sqlx::query(
            r#"
            DELETE FROM sessions WHERE access_jti = $1
            "#,
        )
        .bind(access_jti)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Replace the token pair recorded for a session (refresh rotation).
    pub async fn rotate_session(
        &self,
        session_id: Uuid,
        refresh_token_hash: &str,
        access_jti: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<SessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("rotate_session");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            UPDATE sessions SET
                refresh_token_hash = $2,
                access_jti = $3,
                expires_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(refresh_token_hash)
        .bind(access_jti)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Drop expired sessions. Returns the number of rows deleted.
    pub async fn delete_expired_sessions(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expired_sessions");
        let result = sqlx::query(
            r#"
            DELETE FROM sessions WHERE expires_at <= NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
