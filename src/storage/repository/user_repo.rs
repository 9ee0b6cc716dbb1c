use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::storage::entity::user::{
    self, ActiveModel as UserActiveModel, Entity as User, Model as UserModel,
};
use chrono::Utc;
use log::warn;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

/// 对外的用户表示，不含密码哈希
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<UserModel> for UserDto {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
            role: model.role,
            email: model.email,
            phone: model.phone,
            status: model.status,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub username: Option<String>,
    /// 空字符串表示“不修改密码”；不允许清空
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UserPatch {
    fn wants_password_change(&self) -> bool {
        matches!(&self.password, Some(p) if !p.is_empty())
    }

    fn is_empty(&self) -> bool {
        self.username.is_none()
            && !self.wants_password_change()
            && self.name.is_none()
            && self.role.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.status.is_none()
    }
}

pub struct UserRepository;

impl UserRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<UserDto>> {
        let models = User::find().order_by_asc(user::Column::Name).all(db).await?;
        Ok(models.into_iter().map(UserDto::from).collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<UserDto>> {
        Ok(User::find_by_id(id).one(db).await?.map(UserDto::from))
    }

    /// 登录路径需要密码哈希，返回完整 Model（仅限内部使用）
    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> AppResult<Option<UserModel>> {
        Ok(User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?)
    }

    pub async fn create(
        db: &DatabaseConnection,
        new: NewUser,
        bcrypt_cost: u32,
    ) -> AppResult<UserDto> {
        if Self::find_by_username(db, &new.username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let now = Utc::now().timestamp();
        let hashed = password::hash(&new.password, bcrypt_cost)?;
        let model = UserActiveModel {
            username: Set(new.username),
            password: Set(hashed),
            name: Set(new.name),
            role: Set(new.role),
            email: Set(new.email),
            phone: Set(new.phone),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let res = User::insert(model).exec(db).await?;
        Self::get(db, res.last_insert_id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        patch: UserPatch,
        bcrypt_cost: u32,
    ) -> AppResult<UserDto> {
        let model = User::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("user"))?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        let change_password = patch.wants_password_change();
        let mut active: UserActiveModel = model.into();
        if let Some(v) = patch.username {
            active.username = Set(v);
        }
        if change_password {
            let plain = patch.password.unwrap_or_default();
            active.password = Set(password::hash(&plain, bcrypt_cost)?);
        }
        if let Some(v) = patch.name {
            active.name = Set(v);
        }
        if let Some(v) = patch.role {
            active.role = Set(v);
        }
        if let Some(v) = patch.email {
            active.email = Set(Some(v));
        }
        if let Some(v) = patch.phone {
            active.phone = Set(Some(v));
        }
        if let Some(v) = patch.status {
            active.status = Set(v);
        }
        active.updated_at = Set(Utc::now().timestamp());
        active.update(db).await?;

        Self::get(db, id).await?.ok_or(AppError::NotFound("user"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let res = User::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn touch_last_login(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let Some(model) = User::find_by_id(id).one(db).await? else {
            return Ok(());
        };
        let mut active: UserActiveModel = model.into();
        active.last_login = Set(Some(Utc::now().timestamp()));
        active.update(db).await?;
        Ok(())
    }

    /// 空库时写入初始管理员，否则受保护的 API 无法访问
    pub async fn ensure_seed_admin(db: &DatabaseConnection, bcrypt_cost: u32) -> AppResult<()> {
        let count = User::find().count(db).await?;
        if count > 0 {
            return Ok(());
        }
        let seed = NewUser {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            name: "Administrator".to_string(),
            role: "Admin".to_string(),
            email: None,
            phone: None,
        };
        Self::create(db, seed, bcrypt_cost).await?;
        warn!("seeded default admin user 'admin'; change its password immediately");
        Ok(())
    }
}
