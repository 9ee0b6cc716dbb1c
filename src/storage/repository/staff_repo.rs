use crate::error::{AppError, AppResult};
use crate::storage::entity::staff::{
    self, ActiveModel as StaffActiveModel, Entity as Staff, Model as StaffModel,
};
use crate::storage::repository::site_repo::SiteRepository;
use crate::storage::repository::{decode_list, encode_list};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffDto {
    pub id: i32,
    pub staff_id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub verified: bool,
    pub qualifications: Vec<String>,
    pub skills: Vec<String>,
    pub workload: Option<i32>,
    pub site_id: Option<i32>,
    pub department: Option<String>,
    pub start_date: Option<String>,
    pub contract_end_date: Option<String>,
    pub employment_status: Option<String>,
    pub notes: Option<String>,
}

impl From<StaffModel> for StaffDto {
    fn from(model: StaffModel) -> Self {
        Self {
            id: model.id,
            staff_id: model.staff_id,
            first_name: model.first_name,
            last_name: model.last_name,
            position: model.position,
            email: model.email,
            phone: model.phone,
            verified: model.verified,
            qualifications: decode_list(model.qualifications.as_deref()),
            skills: decode_list(model.skills.as_deref()),
            workload: model.workload,
            site_id: model.site_id,
            department: model.department,
            start_date: model.start_date,
            contract_end_date: model.contract_end_date,
            employment_status: model.employment_status,
            notes: model.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    #[serde(default)]
    pub staff_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub qualifications: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub workload: Option<i32>,
    #[serde(default)]
    pub site_id: Option<i32>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub contract_end_date: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPatch {
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub qualifications: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub workload: Option<i32>,
    #[serde(default)]
    pub site_id: Option<i32>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub contract_end_date: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl StaffPatch {
    fn is_empty(&self) -> bool {
        self.staff_id.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.position.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.verified.is_none()
            && self.qualifications.is_none()
            && self.skills.is_none()
            && self.workload.is_none()
            && self.site_id.is_none()
            && self.department.is_none()
            && self.start_date.is_none()
            && self.contract_end_date.is_none()
            && self.employment_status.is_none()
            && self.notes.is_none()
    }
}

pub struct StaffRepository;

impl StaffRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<StaffDto>> {
        let models = Staff::find()
            .order_by_asc(staff::Column::LastName)
            .order_by_asc(staff::Column::FirstName)
            .all(db)
            .await?;
        Ok(models.into_iter().map(StaffDto::from).collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<StaffDto>> {
        Ok(Staff::find_by_id(id).one(db).await?.map(StaffDto::from))
    }

    pub async fn list_for_site(db: &DatabaseConnection, site_id: i32) -> AppResult<Vec<StaffDto>> {
        let models = Staff::find()
            .filter(staff::Column::SiteId.eq(site_id))
            .order_by_asc(staff::Column::LastName)
            .all(db)
            .await?;
        Ok(models.into_iter().map(StaffDto::from).collect())
    }

    pub async fn create(db: &DatabaseConnection, new: NewStaff) -> AppResult<StaffDto> {
        if let Some(site_id) = new.site_id {
            if !SiteRepository::exists(db, site_id).await? {
                return Err(AppError::NotFound("site"));
            }
        }

        let model = StaffActiveModel {
            staff_id: Set(new.staff_id),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            position: Set(new.position),
            email: Set(new.email),
            phone: Set(new.phone),
            verified: Set(new.verified),
            qualifications: Set(new.qualifications.as_deref().and_then(encode_list)),
            skills: Set(new.skills.as_deref().and_then(encode_list)),
            workload: Set(new.workload),
            site_id: Set(new.site_id),
            department: Set(new.department),
            start_date: Set(new.start_date),
            contract_end_date: Set(new.contract_end_date),
            employment_status: Set(new.employment_status),
            notes: Set(new.notes),
            ..Default::default()
        };
        let res = Staff::insert(model).exec(db).await?;
        Self::get(db, res.last_insert_id)
            .await?
            .ok_or(AppError::NotFound("staff"))
    }

    pub async fn update(db: &DatabaseConnection, id: i32, patch: StaffPatch) -> AppResult<StaffDto> {
        let model = Staff::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("staff"))?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        if let Some(site_id) = patch.site_id {
            if !SiteRepository::exists(db, site_id).await? {
                return Err(AppError::NotFound("site"));
            }
        }

        let mut active: StaffActiveModel = model.into();
        if let Some(v) = patch.staff_id {
            active.staff_id = Set(v);
        }
        if let Some(v) = patch.first_name {
            active.first_name = Set(v);
        }
        if let Some(v) = patch.last_name {
            active.last_name = Set(v);
        }
        if let Some(v) = patch.position {
            active.position = Set(Some(v));
        }
        if let Some(v) = patch.email {
            active.email = Set(Some(v));
        }
        if let Some(v) = patch.phone {
            active.phone = Set(Some(v));
        }
        if let Some(v) = patch.verified {
            active.verified = Set(v);
        }
        if let Some(v) = patch.qualifications {
            active.qualifications = Set(encode_list(&v));
        }
        if let Some(v) = patch.skills {
            active.skills = Set(encode_list(&v));
        }
        if let Some(v) = patch.workload {
            active.workload = Set(Some(v));
        }
        if let Some(v) = patch.site_id {
            active.site_id = Set(Some(v));
        }
        if let Some(v) = patch.department {
            active.department = Set(Some(v));
        }
        if let Some(v) = patch.start_date {
            active.start_date = Set(Some(v));
        }
        if let Some(v) = patch.contract_end_date {
            active.contract_end_date = Set(Some(v));
        }
        if let Some(v) = patch.employment_status {
            active.employment_status = Set(Some(v));
        }
        if let Some(v) = patch.notes {
            active.notes = Set(Some(v));
        }
        active.update(db).await?;

        Self::get(db, id).await?.ok_or(AppError::NotFound("staff"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let res = Staff::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
