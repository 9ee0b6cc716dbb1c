use crate::api::auth_mw::CurrentUser;
use crate::api::{validate, AppState};
use crate::domain::EntityRef;
use crate::error::{AppError, AppResult};
use crate::storage::repository::{
    ActivityDto, ActivityRepository, NewActivity, NewUser, UserDto, UserPatch, UserRepository,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserDto>>> {
    current.require_admin()?;
    Ok(Json(UserRepository::list(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserDto>> {
    current.require_admin_or_self(id)?;
    UserRepository::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("user"))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(new): Json<NewUser>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    current.require_admin()?;
    validate::new_user(&new)?;
    let dto = UserRepository::create(&state.db, new, state.config.bcrypt_cost).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "user_creation",
            format!("Created user {}", dto.username),
            Some(EntityRef::user(dto.id)),
            Some(current.id),
        ),
    )
    .await;
    Ok((StatusCode::CREATED, Json(dto)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(patch): Json<UserPatch>,
) -> AppResult<Json<UserDto>> {
    current.require_admin_or_self(id)?;
    // 普通用户可以改自己的资料，但角色与状态只有管理员能动
    if !current.is_admin() && (patch.role.is_some() || patch.status.is_some()) {
        return Err(AppError::Forbidden(
            "Only administrators may change role or status".to_string(),
        ));
    }
    validate::user_patch(&patch)?;
    let dto = UserRepository::update(&state.db, id, patch, state.config.bcrypt_cost).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "user_update",
            format!("Updated user {}", dto.username),
            Some(EntityRef::user(dto.id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(Json(dto))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    current.require_admin()?;
    if !UserRepository::delete(&state.db, id).await? {
        return Err(AppError::NotFound("user"));
    }
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "user_deletion",
            format!("Deleted user #{id}"),
            Some(EntityRef::user(id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_activities(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ActivityDto>>> {
    current.require_admin_or_self(id)?;
    if UserRepository::get(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("user"));
    }
    Ok(Json(ActivityRepository::list_for_user(&state.db, id).await?))
}

pub async fn create_activity(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(mut new): Json<NewActivity>,
) -> AppResult<(StatusCode, Json<ActivityDto>)> {
    current.require_admin_or_self(id)?;
    if UserRepository::get(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("user"));
    }
    validate::new_activity(&new)?;
    new.performed_by = Some(id);
    let dto = ActivityRepository::create(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}
