use crate::error::{AppError, AppResult};
use crate::storage::entity::district::{
    self, ActiveModel as DistrictActiveModel, Entity as District, Model as DistrictModel,
};
use crate::storage::entity::site::{self, Entity as Site};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDto {
    pub id: i32,
    pub name: String,
    pub region: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl From<DistrictModel> for DistrictDto {
    fn from(model: DistrictModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            region: model.region,
            contact_person: model.contact_person,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDistrict {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// 部分更新：缺省字段保持原值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

impl DistrictPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.region.is_none()
            && self.contact_person.is_none()
            && self.contact_email.is_none()
            && self.contact_phone.is_none()
    }
}

pub struct DistrictRepository;

impl DistrictRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<DistrictDto>> {
        let models = District::find()
            .order_by_asc(district::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(DistrictDto::from).collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<DistrictDto>> {
        Ok(District::find_by_id(id).one(db).await?.map(DistrictDto::from))
    }

    pub async fn exists_by_name(db: &DatabaseConnection, name: &str) -> AppResult<bool> {
        let count = District::find()
            .filter(district::Column::Name.eq(name))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(db: &DatabaseConnection, new: NewDistrict) -> AppResult<DistrictDto> {
        let model = DistrictActiveModel {
            name: Set(new.name),
            region: Set(new.region),
            contact_person: Set(new.contact_person),
            contact_email: Set(new.contact_email),
            contact_phone: Set(new.contact_phone),
            ..Default::default()
        };
        let res = District::insert(model).exec(db).await?;
        // 回读以拿到数据库分配的默认值
        Self::get(db, res.last_insert_id)
            .await?
            .ok_or(AppError::NotFound("district"))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        patch: DistrictPatch,
    ) -> AppResult<DistrictDto> {
        let model = District::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("district"))?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        let mut active: DistrictActiveModel = model.into();
        if let Some(v) = patch.name {
            active.name = Set(v);
        }
        if let Some(v) = patch.region {
            active.region = Set(Some(v));
        }
        if let Some(v) = patch.contact_person {
            active.contact_person = Set(Some(v));
        }
        if let Some(v) = patch.contact_email {
            active.contact_email = Set(Some(v));
        }
        if let Some(v) = patch.contact_phone {
            active.contact_phone = Set(Some(v));
        }
        active.update(db).await?;

        Self::get(db, id).await?.ok_or(AppError::NotFound("district"))
    }

    /// 仍被 site 引用时拒绝删除
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let Some(model) = District::find_by_id(id).one(db).await? else {
            return Ok(false);
        };

        let dependents = Site::find()
            .filter(site::Column::District.eq(model.name.clone()))
            .count(db)
            .await?;
        if dependents > 0 {
            return Err(AppError::Conflict(format!(
                "district '{}' still has {} associated site(s)",
                model.name, dependents
            )));
        }

        let res = District::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
