use crate::api::auth_mw::CurrentUser;
use crate::api::{validate, AppState};
use crate::domain::EntityRef;
use crate::error::{AppError, AppResult};
use crate::storage::repository::{
    ActivityRepository, NewActivity, NewStaff, StaffDto, StaffPatch, StaffRepository,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<StaffDto>>> {
    Ok(Json(StaffRepository::list(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<StaffDto>> {
    StaffRepository::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("staff"))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(new): Json<NewStaff>,
) -> AppResult<(StatusCode, Json<StaffDto>)> {
    validate::new_staff(&new)?;
    let dto = StaffRepository::create(&state.db, new).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "staff_creation",
            format!("Created staff member {} {}", dto.first_name, dto.last_name),
            Some(EntityRef::staff(dto.id)),
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
    Json(patch): Json<StaffPatch>,
) -> AppResult<Json<StaffDto>> {
    validate::staff_patch(&patch)?;
    let dto = StaffRepository::update(&state.db, id, patch).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "staff_update",
            format!("Updated staff member {} {}", dto.first_name, dto.last_name),
            Some(EntityRef::staff(dto.id)),
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
    if !StaffRepository::delete(&state.db, id).await? {
        return Err(AppError::NotFound("staff"));
    }
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "staff_deletion",
            format!("Deleted staff member #{id}"),
            Some(EntityRef::staff(id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}
