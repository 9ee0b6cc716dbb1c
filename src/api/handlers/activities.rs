use crate::api::auth_mw::CurrentUser;
use crate::api::{validate, AppState};
use crate::error::{AppError, AppResult};
use crate::storage::repository::{ActivityDto, ActivityRepository, NewActivity};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ActivityDto>>> {
    Ok(Json(ActivityRepository::list(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActivityDto>> {
    ActivityRepository::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("activity"))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(mut new): Json<NewActivity>,
) -> AppResult<(StatusCode, Json<ActivityDto>)> {
    validate::new_activity(&new)?;
    if new.performed_by.is_none() {
        new.performed_by = Some(current.id);
    }
    let dto = ActivityRepository::create(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

/// 活动记录本体不可改写，PATCH 只接受 metadata 的浅合并
#[derive(Debug, Default, Deserialize)]
pub struct ActivityPatch {
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<ActivityPatch>,
) -> AppResult<Json<ActivityDto>> {
    let incoming = patch.metadata.unwrap_or_default();
    Ok(Json(
        ActivityRepository::merge_metadata(&state.db, id, incoming).await?,
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    if ActivityRepository::delete(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("activity"))
    }
}
