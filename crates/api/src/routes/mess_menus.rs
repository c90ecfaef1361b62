//! Mess menu endpoints.
//!
//! Everyone can read the menu; the mess supervisor and admin maintain
//! it. One menu per date and meal, so creates are upserts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::access::Resource;
use domain::models::mess_menu::{
    CreateMessMenuRequest, ListMenusQuery, MessMenu, UpdateMessMenuRequest,
};
use persistence::repositories::MessMenuRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

/// GET /api/v1/mess-menus
pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<ListMenusQuery>,
) -> Result<Json<Vec<MessMenu>>, ApiError> {
    let repo = MessMenuRepository::new(state.pool.clone());
    let menus = repo
        .list(query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(menus))
}

/// POST /api/v1/mess-menus
///
/// Upserts the menu for the given date and meal.
pub async fn upsert_menu(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateMessMenuRequest>,
) -> Result<(StatusCode, Json<MessMenu>), ApiError> {
    ensure_access(&user, Resource::MessMenuManage)?;
    request.validate()?;

    let repo = MessMenuRepository::new(state.pool.clone());
    let menu: MessMenu = repo
        .upsert(
            request.menu_date,
            request.meal_type.as_str(),
            &request.items,
            user.user_id,
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "mess_menu.saved",
        Some("mess_menu"),
        Some(menu.id.to_string()),
        Some(serde_json::json!({
            "date": request.menu_date,
            "meal": request.meal_type.as_str()
        })),
    );

    Ok((StatusCode::CREATED, Json(menu)))
}

/// PATCH /api/v1/mess-menus/:id
pub async fn update_menu(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMessMenuRequest>,
) -> Result<Json<MessMenu>, ApiError> {
    ensure_access(&user, Resource::MessMenuManage)?;
    request.validate()?;

    let repo = MessMenuRepository::new(state.pool.clone());
    let menu: MessMenu = repo
        .update_items(id, &request.items)
        .await?
        .ok_or_else(|| ApiError::NotFound("Menu not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "mess_menu.updated",
        Some("mess_menu"),
        Some(id.to_string()),
        None,
    );

    Ok(Json(menu))
}

/// DELETE /api/v1/mess-menus/:id
pub async fn delete_menu(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::MessMenuManage)?;

    let repo = MessMenuRepository::new(state.pool.clone());
    if repo.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Menu not found".into()));
    }

    state.activity.log(
        user.user_id,
        "mess_menu.deleted",
        Some("mess_menu"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}
