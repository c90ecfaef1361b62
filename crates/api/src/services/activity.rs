//! Activity logging service.
//!
//! Writes audit trail entries without blocking request handling; a
//! failed write is logged and dropped rather than failing the request.

use persistence::repositories::ActivityLogRepository;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ActivityService {
    repo: ActivityLogRepository,
}

impl ActivityService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ActivityLogRepository::new(pool),
        }
    }

    /// Record an action in the audit trail, fire and forget.
    pub fn log(
        &self,
        user_id: Uuid,
        action: &str,
        target_type: Option<&str>,
        target_id: Option<String>,
        details: Option<serde_json::Value>,
    ) {
        let repo = self.repo.clone();
        let action = action.to_string();
        let target_type = target_type.map(|s| s.to_string());
        tokio::spawn(async move {
            if let Err(e) = repo
                .insert(
                    user_id,
                    &action,
                    target_type.as_deref(),
                    target_id.as_deref(),
                    details.as_ref(),
                )
                .await
            {
                tracing::warn!("Failed to write activity log entry: {}", e);
            }
        });
    }
}
