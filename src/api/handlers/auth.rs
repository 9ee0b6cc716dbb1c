use crate::api::AppState;
use crate::auth;
use crate::domain::EntityRef;
use crate::error::{AppError, AppResult};
use crate::storage::repository::{ActivityRepository, NewActivity};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Value>> {
    if req.username.is_empty() {
        return Err(AppError::validation("username", "username is required"));
    }
    if req.password.is_empty() {
        return Err(AppError::validation("password", "password is required"));
    }

    let outcome = auth::login(
        &state.db,
        &state.config.jwt_secret,
        &req.username,
        &req.password,
    )
    .await?;

    ActivityRepository::record_best_effort(
        &state.db,
        NewActivity::audit(
            "user_login",
            format!("User {} logged in", outcome.user.username),
            Some(EntityRef::user(outcome.user.id)),
            Some(outcome.user.id),
        ),
    )
    .await;

    Ok(Json(json!({ "token": outcome.token, "user": outcome.user })))
}
