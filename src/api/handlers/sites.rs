use crate::api::auth_mw::CurrentUser;
use crate::api::{validate, AppState};
use crate::domain::EntityRef;
use crate::error::{AppError, AppResult};
use crate::storage::repository::{
    ActivityDto, ActivityRepository, AssetDto, AssetRepository, NewActivity, NewSite, ProgramDto,
    ProgramRepository, SiteDto, SitePatch, SiteRepository, StaffDto, StaffRepository,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SiteDto>>> {
    Ok(Json(SiteRepository::list(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<SiteDto>> {
    SiteRepository::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("site"))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(mut new): Json<NewSite>,
) -> AppResult<(StatusCode, Json<SiteDto>)> {
    validate::new_site(&new)?;
    new.created_by = Some(current.id);
    let dto = SiteRepository::create(&state.db, new).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "site_creation",
            format!("Created site {}", dto.name),
            Some(EntityRef::site(dto.id)),
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
    Json(mut patch): Json<SitePatch>,
) -> AppResult<Json<SiteDto>> {
    validate::site_patch(&patch)?;
    // 每次编辑都算一次到访
    patch.last_visited_by = Some(current.id);
    patch.last_visit_date = Some(Utc::now().timestamp());
    let dto = SiteRepository::update(&state.db, id, patch).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "site_update",
            format!("Updated site {}", dto.name),
            Some(EntityRef::site(dto.id)),
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
    if !SiteRepository::delete(&state.db, id).await? {
        return Err(AppError::NotFound("site"));
    }
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "site_deletion",
            format!("Deleted site #{id}"),
            Some(EntityRef::site(id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_site(state: &AppState, id: i32) -> AppResult<()> {
    if SiteRepository::exists(&state.db, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("site"))
    }
}

pub async fn list_staff(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<StaffDto>>> {
    ensure_site(&state, id).await?;
    Ok(Json(StaffRepository::list_for_site(&state.db, id).await?))
}

pub async fn list_assets(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AssetDto>>> {
    ensure_site(&state, id).await?;
    Ok(Json(AssetRepository::list_for_site(&state.db, id).await?))
}

pub async fn list_programs(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ProgramDto>>> {
    ensure_site(&state, id).await?;
    Ok(Json(ProgramRepository::list_for_site(&state.db, id).await?))
}

pub async fn list_activities(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ActivityDto>>> {
    ensure_site(&state, id).await?;
    Ok(Json(ActivityRepository::list_for_site(&state.db, id).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddImagesRequest {
    pub urls: Vec<String>,
}

pub async fn add_images(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(req): Json<AddImagesRequest>,
) -> AppResult<Json<SiteDto>> {
    if req.urls.is_empty() {
        return Err(AppError::validation("urls", "urls must not be empty"));
    }
    let site = SiteRepository::get(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("site"))?;

    let mut images = site.images;
    images.extend(req.urls);
    let patch = SitePatch {
        images: Some(images),
        ..Default::default()
    };
    let dto = SiteRepository::update(&state.db, id, patch).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "photo_upload",
            format!("Added photos to site {}", dto.name),
            Some(EntityRef::site(dto.id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(Json(dto))
}

pub async fn remove_image(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((id, index)): Path<(i32, usize)>,
) -> AppResult<Json<SiteDto>> {
    let site = SiteRepository::get(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("site"))?;

    let mut images = site.images;
    if index >= images.len() {
        return Err(AppError::validation("index", "image index out of range"));
    }
    images.remove(index);
    let patch = SitePatch {
        images: Some(images),
        ..Default::default()
    };
    let dto = SiteRepository::update(&state.db, id, patch).await?;
    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "photo_deletion",
            format!("Removed a photo from site {}", dto.name),
            Some(EntityRef::site(dto.id)),
            Some(current.id),
        ),
    )
    .await;
    Ok(Json(dto))
}
