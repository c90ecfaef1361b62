//! Announcement repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AnnouncementEntity;
use crate::metrics::QueryTimer;

/// Repository for portal announcements.
#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    /// Creates a new AnnouncementRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an announcement. An empty target list means everyone.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        is_urgent: bool,
        target_roles: &[String],
        author_id: Uuid,
    ) -> Result<AnnouncementEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_announcement");
        let result = sqlx::query_as::<_, AnnouncementEntity>(
            r#"
            INSERT INTO announcements (title, content, is_urgent, target_roles, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(is_urgent)
        .bind(target_roles)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an announcement by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AnnouncementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_announcement_by_id");
        let result = sqlx::query_as::<_, AnnouncementEntity>(
            r#"
            SELECT * FROM announcements WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List announcements visible to a role, urgent first, then newest.
    pub async fn list_visible_to(
        &self,
        role: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AnnouncementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_announcements_for_role");
        let result = sqlx::query_as::<_, AnnouncementEntity>(
            r#"
            SELECT * FROM announcements
            WHERE target_roles = '{}' OR $1 = ANY(target_roles)
            ORDER BY is_urgent DESC, created_at DESC
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

    /// List every announcement, newest first. Admin view.
    pub async fn list_all(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AnnouncementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_announcements");
        let result = sqlx::query_as::<_, AnnouncementEntity>(
            r#"
            SELECT * FROM announcements
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an announcement. Returns the number of rows deleted.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_announcement");
        let result = sqlx::query(
            r#"
            DELETE FROM announcements WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
