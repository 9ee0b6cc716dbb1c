use crate::api::AppState;
use crate::auth::token;
use crate::error::{AppError, AppResult};
use crate::storage::repository::{UserDto, UserRepository};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

/// 中间件解析出的当前用户，handler 通过 Extension 取用
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "Admin"
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    pub fn require_admin_or_self(&self, user_id: i32) -> AppResult<()> {
        if self.is_admin() || self.id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied".to_string()))
        }
    }
}

fn bearer_token(req: &Request) -> AppResult<&str> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;
    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}

/// 签名有效还不够：每个请求都按数据库当前状态重查一次，
/// 这样封禁/降权立即生效，而不是等 token 过期
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let claims = token::verify(&state.config.jwt_secret, bearer_token(&req)?)?;

    let user: UserDto = UserRepository::get(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

    match user.status.as_str() {
        "active" => {}
        "suspended" => {
            return Err(AppError::Forbidden(
                "Account is suspended. Please contact administrator.".to_string(),
            ))
        }
        _ => {
            return Err(AppError::Forbidden(
                "Account is inactive. Please contact administrator.".to_string(),
            ))
        }
    }

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
        role: user.role,
    });
    Ok(next.run(req).await)
}
