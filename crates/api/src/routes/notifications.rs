//! Notification preference endpoints.

use axum::{extract::State, Extension, Json};

use domain::models::notification::{
    NotificationPreferences, UpdateNotificationPreferencesRequest,
};
use persistence::repositories::NotificationPreferencesRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::CurrentUser;

/// GET /api/v1/notifications/preferences
///
/// The caller's channel switches. Users without a stored row get the
/// defaults.
pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<NotificationPreferences>, ApiError> {
    let repo = NotificationPreferencesRepository::new(state.pool.clone());
    match repo.find_by_user_id(user.user_id).await? {
        Some(entity) => Ok(Json(entity.into())),
        // No row yet: materialize the defaults so the response always
        // has a stable shape.
        None => {
            let entity = repo.upsert(user.user_id, None, None, None).await?;
            Ok(Json(entity.into()))
        }
    }
}

/// PUT /api/v1/notifications/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<UpdateNotificationPreferencesRequest>,
) -> Result<Json<NotificationPreferences>, ApiError> {
    let repo = NotificationPreferencesRepository::new(state.pool.clone());
    let preferences: NotificationPreferences = repo
        .upsert(
            user.user_id,
            request.email_enabled,
            request.push_enabled,
            request.sms_enabled,
        )
        .await?
        .into();

    Ok(Json(preferences))
}
