use crate::api::{validate, AppState};
use crate::error::{AppError, AppResult};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::storage::repository::{DistrictDto, DistrictPatch, DistrictRepository, NewDistrict};

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DistrictDto>>> {
    Ok(Json(DistrictRepository::list(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DistrictDto>> {
    DistrictRepository::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("district"))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewDistrict>,
) -> AppResult<(StatusCode, Json<DistrictDto>)> {
    validate::new_district(&new)?;
    let dto = DistrictRepository::create(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<DistrictPatch>,
) -> AppResult<Json<DistrictDto>> {
    validate::district_patch(&patch)?;
    Ok(Json(DistrictRepository::update(&state.db, id, patch).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    if DistrictRepository::delete(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("district"))
    }
}
