use crate::api::auth_mw::CurrentUser;
use crate::api::{validate, AppState};
use crate::domain::EntityRef;
use crate::error::{AppError, AppResult};
use crate::storage::repository::{
    ActivityRepository, AssetDto, AssetPatch, AssetRepository, NewActivity, NewAsset,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<AssetDto>>> {
    Ok(Json(AssetRepository::list(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AssetDto>> {
    AssetRepository::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("asset"))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(new): Json<NewAsset>,
) -> AppResult<(StatusCode, Json<AssetDto>)> {
    validate::new_asset(&new)?;
    let dto = AssetRepository::create(&state.db, new).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "asset_creation",
            format!("Created asset {}", dto.name),
            Some(EntityRef::asset(dto.id)),
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
    Json(patch): Json<AssetPatch>,
) -> AppResult<Json<AssetDto>> {
    validate::asset_patch(&patch)?;
    let dto = AssetRepository::update(&state.db, id, patch).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "asset_update",
            format!("Updated asset {}", dto.name),
            Some(EntityRef::asset(dto.id)),
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
    if !AssetRepository::delete(&state.db, id).await? {
        return Err(AppError::NotFound("asset"));
    }
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "asset_deletion",
            format!("Deleted asset #{id}"),
            Some(EntityRef::asset(id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}
