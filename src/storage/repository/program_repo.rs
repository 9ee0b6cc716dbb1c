use crate::error::{AppError, AppResult};
use crate::storage::entity::program::{
    self, ActiveModel as ProgramActiveModel, Entity as Program, Model as ProgramModel,
};
use crate::storage::repository::site_repo::SiteRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDto {
    pub id: i32,
    pub program_id: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub enrollment_count: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub site_id: Option<i32>,
}

impl From<ProgramModel> for ProgramDto {
    fn from(model: ProgramModel) -> Self {
        Self {
            id: model.id,
            program_id: model.program_id,
            name: model.name,
            category: model.category,
            description: model.description,
            enrollment_count: model.enrollment_count,
            start_date: model.start_date,
            end_date: model.end_date,
            status: model.status,
            notes: model.notes,
            site_id: model.site_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
    #[serde(default)]
    pub program_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enrollment_count: Option<i32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub site_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPatch {
    #[serde(default)]
    pub program_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enrollment_count: Option<i32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub site_id: Option<i32>,
}

impl ProgramPatch {
    fn is_empty(&self) -> bool {
        self.program_id.is_none()
            && self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.enrollment_count.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
            && self.notes.is_none()
            && self.site_id.is_none()
    }
}

pub struct ProgramRepository;

impl ProgramRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<ProgramDto>> {
        let models = Program::find()
            .order_by_asc(program::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ProgramDto::from).collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<ProgramDto>> {
        Ok(Program::find_by_id(id).one(db).await?.map(ProgramDto::from))
    }

    pub async fn list_for_site(
        db: &DatabaseConnection,
        site_id: i32,
    ) -> AppResult<Vec<ProgramDto>> {
        let models = Program::find()
            .filter(program::Column::SiteId.eq(site_id))
            .order_by_asc(program::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ProgramDto::from).collect())
    }

    pub async fn create(db: &DatabaseConnection, new: NewProgram) -> AppResult<ProgramDto> {
        if let Some(site_id) = new.site_id {
            if !SiteRepository::exists(db, site_id).await? {
                return Err(AppError::NotFound("site"));
            }
        }

        let model = ProgramActiveModel {
            program_id: Set(new.program_id),
            name: Set(new.name),
            category: Set(new.category),
            description: Set(new.description),
            enrollment_count: Set(new.enrollment_count),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            status: Set(new.status),
            notes: Set(new.notes),
            site_id: Set(new.site_id),
            ..Default::default()
        };
        let res = Program::insert(model).exec(db).await?;
        Self::get(db, res.last_insert_id)
            .await?
            .ok_or(AppError::NotFound("program"))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        patch: ProgramPatch,
    ) -> AppResult<ProgramDto> {
        let model = Program::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("program"))?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        if let Some(site_id) = patch.site_id {
            if !SiteRepository::exists(db, site_id).await? {
                return Err(AppError::NotFound("site"));
            }
        }

        let mut active: ProgramActiveModel = model.into();
        if let Some(v) = patch.program_id {
            active.program_id = Set(v);
        }
        if let Some(v) = patch.name {
            active.name = Set(v);
        }
        if let Some(v) = patch.category {
            active.category = Set(v);
        }
        if let Some(v) = patch.description {
            active.description = Set(Some(v));
        }
        if let Some(v) = patch.enrollment_count {
            active.enrollment_count = Set(Some(v));
        }
        if let Some(v) = patch.start_date {
            active.start_date = Set(Some(v));
        }
        if let Some(v) = patch.end_date {
            active.end_date = Set(Some(v));
        }
        if let Some(v) = patch.status {
            active.status = Set(v);
        }
        if let Some(v) = patch.notes {
            active.notes = Set(Some(v));
        }
        if let Some(v) = patch.site_id {
            active.site_id = Set(Some(v));
        }
        active.update(db).await?;

        Self::get(db, id).await?.ok_or(AppError::NotFound("program"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let res = Program::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
