//! Profile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProfileEntity;
use crate::metrics::QueryTimer;

/// Repository for user profiles.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by the owning user's ID.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_user_id");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT * FROM profiles WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List profiles, optionally filtered by role, newest first.
    pub async fn list(
        &self,
        role: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_profiles");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT * FROM profiles
            WHERE ($1::TEXT IS NULL OR role = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(role)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total profile count, optionally filtered by role.
    pub async fn count(&self, role: Option<&str>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_profiles");
        let result = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*) FROM profiles
            WHERE ($1::TEXT IS NULL OR role = $1)
            "#,
        )
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(result.0)
    }

    /// Partial update of a profile's editable fields.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        user_id: Uuid,
        full_name: Option<&str>,
        department: Option<&str>,
        batch: Option<&str>,
        phone: Option<&str>,
        roll_number: Option<&str>,
        bio: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                department = COALESCE($3, department),
                batch = COALESCE($4, batch),
                phone = COALESCE($5, phone),
                roll_number = COALESCE($6, roll_number),
                bio = COALESCE($7, bio),
                avatar_url = COALESCE($8, avatar_url),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(department)
        .bind(batch)
        .bind(phone)
        .bind(roll_number)
        .bind(bio)
        .bind(avatar_url)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Change a user's role. Admin-only at the route layer.
    pub async fn update_role(
        &self,
        user_id: Uuid,
        role: &str,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_profile_role");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            UPDATE profiles SET role = $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Profile counts grouped by role, for the summary report.
    pub async fn count_by_role(&self) -> Result<Vec<(String, i64)>, sqlx::Error> {
        let timer = QueryTimer::new("count_profiles_by_role");
        let result = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT role, COUNT(*) FROM profiles
            GROUP BY role
            ORDER BY role
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
