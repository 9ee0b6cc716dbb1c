pub mod password;
pub mod token;

use crate::error::{AppError, AppResult};
use crate::storage::repository::{UserDto, UserRepository};
use sea_orm::DatabaseConnection;

/// 未知用户名与密码错误必须返回同一条消息，避免用户名枚举
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserDto,
}

/// 登录主路径：先验证凭证，验证通过后才检查账号状态
pub async fn login(
    db: &DatabaseConnection,
    jwt_secret: &str,
    username: &str,
    password_input: &str,
) -> AppResult<LoginOutcome> {
    let Some(user) = UserRepository::find_by_username(db, username).await? else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !password::verify(password_input, &user.password)? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    match user.status.as_str() {
        "suspended" => {
            return Err(AppError::Forbidden(
                "Account is suspended. Please contact administrator.".to_string(),
            ))
        }
        "inactive" => {
            return Err(AppError::Forbidden(
                "Account is inactive. Please contact administrator.".to_string(),
            ))
        }
        _ => {}
    }

    UserRepository::touch_last_login(db, user.id).await?;
    let token = token::issue(jwt_secret, user.id, &user.username, &user.role)?;
    let user = UserRepository::get(db, user.id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(LoginOutcome { token, user })
}
