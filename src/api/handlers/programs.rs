use crate::api::auth_mw::CurrentUser;
use crate::api::{validate, AppState};
use crate::domain::EntityRef;
use crate::error::{AppError, AppResult};
use crate::storage::repository::{
    ActivityRepository, NewActivity, NewProgram, ProgramDto, ProgramPatch, ProgramRepository,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProgramDto>>> {
    Ok(Json(ProgramRepository::list(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ProgramDto>> {
    ProgramRepository::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("program"))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(new): Json<NewProgram>,
) -> AppResult<(StatusCode, Json<ProgramDto>)> {
    validate::new_program(&new)?;
    let dto = ProgramRepository::create(&state.db, new).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "program_creation",
            format!("Created program {}", dto.name),
            Some(EntityRef::program(dto.id)),
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
    Json(patch): Json<ProgramPatch>,
) -> AppResult<Json<ProgramDto>> {
    validate::program_patch(&patch)?;
    let dto = ProgramRepository::update(&state.db, id, patch).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "program_update",
            format!("Updated program {}", dto.name),
            Some(EntityRef::program(dto.id)),
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
    if !ProgramRepository::delete(&state.db, id).await? {
        return Err(AppError::NotFound("program"));
    }
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "program_deletion",
            format!("Deleted program #{id}"),
            Some(EntityRef::program(id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}
