use crate::error::{AppError, AppResult};
use crate::storage::entity::site::{
    self, ActiveModel as SiteActiveModel, Entity as Site, Model as SiteModel,
};
use crate::storage::repository::{decode_list, encode_list};
use crate::storage::repository::district_repo::DistrictRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteDto {
    pub id: i32,
    pub site_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub site_type: String,
    pub district: String,
    pub physical_address: Option<String>,
    pub gps_lat: Option<f64>,
    pub gps_lng: Option<f64>,
    pub host_department: Option<String>,
    pub agreement_type: Option<String>,
    pub agreement_details: Option<String>,
    pub contract_number: Option<String>,
    pub contract_term: Option<String>,
    pub renewal_date: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub establishment_date: Option<String>,
    pub operational_status: String,
    pub assessment_status: String,
    pub total_area: Option<i32>,
    pub classrooms: Option<i32>,
    pub offices: Option<i32>,
    pub computer_labs: Option<i32>,
    pub workshops: Option<i32>,
    pub has_library: Option<bool>,
    pub has_student_common_areas: Option<bool>,
    pub has_staff_facilities: Option<bool>,
    pub accessibility_features: Option<String>,
    pub internet_connectivity: Option<String>,
    pub security_features: Option<String>,
    pub building_condition: Option<String>,
    pub electrical_condition: Option<String>,
    pub plumbing_condition: Option<String>,
    pub interior_condition: Option<String>,
    pub exterior_condition: Option<String>,
    pub last_renovation_date: Option<String>,
    pub notes: Option<String>,
    pub images: Vec<String>,
    pub created_by: Option<i32>,
    pub last_visited_by: Option<i32>,
    pub last_visit_date: Option<i64>,
}

impl From<SiteModel> for SiteDto {
    fn from(model: SiteModel) -> Self {
        Self {
            id: model.id,
            site_id: model.site_id,
            name: model.name,
            site_type: model.site_type,
            district: model.district,
            physical_address: model.physical_address,
            gps_lat: model.gps_lat,
            gps_lng: model.gps_lng,
            host_department: model.host_department,
            agreement_type: model.agreement_type,
            agreement_details: model.agreement_details,
            contract_number: model.contract_number,
            contract_term: model.contract_term,
            renewal_date: model.renewal_date,
            contact_person: model.contact_person,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            establishment_date: model.establishment_date,
            operational_status: model.operational_status,
            assessment_status: model.assessment_status,
            total_area: model.total_area,
            classrooms: model.classrooms,
            offices: model.offices,
            computer_labs: model.computer_labs,
            workshops: model.workshops,
            has_library: model.has_library,
            has_student_common_areas: model.has_student_common_areas,
            has_staff_facilities: model.has_staff_facilities,
            accessibility_features: model.accessibility_features,
            internet_connectivity: model.internet_connectivity,
            security_features: model.security_features,
            building_condition: model.building_condition,
            electrical_condition: model.electrical_condition,
            plumbing_condition: model.plumbing_condition,
            interior_condition: model.interior_condition,
            exterior_condition: model.exterior_condition,
            last_renovation_date: model.last_renovation_date,
            notes: model.notes,
            images: decode_list(model.images.as_deref()),
            created_by: model.created_by,
            last_visited_by: model.last_visited_by,
            last_visit_date: model.last_visit_date,
        }
    }
}

/// 必填字符串也给 default：缺字段要走字段级校验返回 400，
/// 而不是在反序列化阶段被拒掉
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSite {
    #[serde(default)]
    pub site_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub site_type: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub physical_address: Option<String>,
    #[serde(default)]
    pub gps_lat: Option<f64>,
    #[serde(default)]
    pub gps_lng: Option<f64>,
    #[serde(default)]
    pub host_department: Option<String>,
    #[serde(default)]
    pub agreement_type: Option<String>,
    #[serde(default)]
    pub agreement_details: Option<String>,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub contract_term: Option<String>,
    #[serde(default)]
    pub renewal_date: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub establishment_date: Option<String>,
    #[serde(default)]
    pub operational_status: String,
    #[serde(default)]
    pub assessment_status: String,
    #[serde(default)]
    pub total_area: Option<i32>,
    #[serde(default)]
    pub classrooms: Option<i32>,
    #[serde(default)]
    pub offices: Option<i32>,
    #[serde(default)]
    pub computer_labs: Option<i32>,
    #[serde(default)]
    pub workshops: Option<i32>,
    #[serde(default)]
    pub has_library: Option<bool>,
    #[serde(default)]
    pub has_student_common_areas: Option<bool>,
    #[serde(default)]
    pub has_staff_facilities: Option<bool>,
    #[serde(default)]
    pub accessibility_features: Option<String>,
    #[serde(default)]
    pub internet_connectivity: Option<String>,
    #[serde(default)]
    pub security_features: Option<String>,
    #[serde(default)]
    pub building_condition: Option<String>,
    #[serde(default)]
    pub electrical_condition: Option<String>,
    #[serde(default)]
    pub plumbing_condition: Option<String>,
    #[serde(default)]
    pub interior_condition: Option<String>,
    #[serde(default)]
    pub exterior_condition: Option<String>,
    #[serde(default)]
    pub last_renovation_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub created_by: Option<i32>,
    #[serde(default)]
    pub last_visited_by: Option<i32>,
    #[serde(default)]
    pub last_visit_date: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePatch {
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub site_type: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub physical_address: Option<String>,
    #[serde(default)]
    pub gps_lat: Option<f64>,
    #[serde(default)]
    pub gps_lng: Option<f64>,
    #[serde(default)]
    pub host_department: Option<String>,
    #[serde(default)]
    pub agreement_type: Option<String>,
    #[serde(default)]
    pub agreement_details: Option<String>,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub contract_term: Option<String>,
    #[serde(default)]
    pub renewal_date: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub establishment_date: Option<String>,
    #[serde(default)]
    pub operational_status: Option<String>,
    #[serde(default)]
    pub assessment_status: Option<String>,
    #[serde(default)]
    pub total_area: Option<i32>,
    #[serde(default)]
    pub classrooms: Option<i32>,
    #[serde(default)]
    pub offices: Option<i32>,
    #[serde(default)]
    pub computer_labs: Option<i32>,
    #[serde(default)]
    pub workshops: Option<i32>,
    #[serde(default)]
    pub has_library: Option<bool>,
    #[serde(default)]
    pub has_student_common_areas: Option<bool>,
    #[serde(default)]
    pub has_staff_facilities: Option<bool>,
    #[serde(default)]
    pub accessibility_features: Option<String>,
    #[serde(default)]
    pub internet_connectivity: Option<String>,
    #[serde(default)]
    pub security_features: Option<String>,
    #[serde(default)]
    pub building_condition: Option<String>,
    #[serde(default)]
    pub electrical_condition: Option<String>,
    #[serde(default)]
    pub plumbing_condition: Option<String>,
    #[serde(default)]
    pub interior_condition: Option<String>,
    #[serde(default)]
    pub exterior_condition: Option<String>,
    #[serde(default)]
    pub last_renovation_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub last_visited_by: Option<i32>,
    #[serde(default)]
    pub last_visit_date: Option<i64>,
}

impl SitePatch {
    fn is_empty(&self) -> bool {
        self.site_id.is_none()
            && self.name.is_none()
            && self.site_type.is_none()
            && self.district.is_none()
            && self.physical_address.is_none()
            && self.gps_lat.is_none()
            && self.gps_lng.is_none()
            && self.host_department.is_none()
            && self.agreement_type.is_none()
            && self.agreement_details.is_none()
            && self.contract_number.is_none()
            && self.contract_term.is_none()
            && self.renewal_date.is_none()
            && self.contact_person.is_none()
            && self.contact_email.is_none()
            && self.contact_phone.is_none()
            && self.establishment_date.is_none()
            && self.operational_status.is_none()
            && self.assessment_status.is_none()
            && self.total_area.is_none()
            && self.classrooms.is_none()
            && self.offices.is_none()
            && self.computer_labs.is_none()
            && self.workshops.is_none()
            && self.has_library.is_none()
            && self.has_student_common_areas.is_none()
            && self.has_staff_facilities.is_none()
            && self.accessibility_features.is_none()
            && self.internet_connectivity.is_none()
            && self.security_features.is_none()
            && self.building_condition.is_none()
            && self.electrical_condition.is_none()
            && self.plumbing_condition.is_none()
            && self.interior_condition.is_none()
            && self.exterior_condition.is_none()
            && self.last_renovation_date.is_none()
            && self.notes.is_none()
            && self.images.is_none()
            && self.last_visited_by.is_none()
            && self.last_visit_date.is_none()
    }
}

pub struct SiteRepository;

impl SiteRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<SiteDto>> {
        let models = Site::find().order_by_asc(site::Column::Name).all(db).await?;
        Ok(models.into_iter().map(SiteDto::from).collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<SiteDto>> {
        Ok(Site::find_by_id(id).one(db).await?.map(SiteDto::from))
    }

    pub async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let count = Site::find()
            .filter(site::Column::Id.eq(id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(db: &DatabaseConnection, new: NewSite) -> AppResult<SiteDto> {
        // district 按名称引用，插入前必须存在
        if !DistrictRepository::exists_by_name(db, &new.district).await? {
            return Err(AppError::NotFound("district"));
        }

        let model = SiteActiveModel {
            site_id: Set(new.site_id),
            name: Set(new.name),
            site_type: Set(new.site_type),
            district: Set(new.district),
            physical_address: Set(new.physical_address),
            gps_lat: Set(new.gps_lat),
            gps_lng: Set(new.gps_lng),
            host_department: Set(new.host_department),
            agreement_type: Set(new.agreement_type),
            agreement_details: Set(new.agreement_details),
            contract_number: Set(new.contract_number),
            contract_term: Set(new.contract_term),
            renewal_date: Set(new.renewal_date),
            contact_person: Set(new.contact_person),
            contact_email: Set(new.contact_email),
            contact_phone: Set(new.contact_phone),
            establishment_date: Set(new.establishment_date),
            operational_status: Set(new.operational_status),
            assessment_status: Set(new.assessment_status),
            total_area: Set(new.total_area),
            classrooms: Set(new.classrooms),
            offices: Set(new.offices),
            computer_labs: Set(new.computer_labs),
            workshops: Set(new.workshops),
            has_library: Set(new.has_library),
            has_student_common_areas: Set(new.has_student_common_areas),
            has_staff_facilities: Set(new.has_staff_facilities),
            accessibility_features: Set(new.accessibility_features),
            internet_connectivity: Set(new.internet_connectivity),
            security_features: Set(new.security_features),
            building_condition: Set(new.building_condition),
            electrical_condition: Set(new.electrical_condition),
            plumbing_condition: Set(new.plumbing_condition),
            interior_condition: Set(new.interior_condition),
            exterior_condition: Set(new.exterior_condition),
            last_renovation_date: Set(new.last_renovation_date),
            notes: Set(new.notes),
            images: Set(new.images.as_deref().and_then(encode_list)),
            created_by: Set(new.created_by),
            last_visited_by: Set(new.last_visited_by),
            last_visit_date: Set(new.last_visit_date),
            ..Default::default()
        };
        let res = Site::insert(model).exec(db).await?;
        Self::get(db, res.last_insert_id)
            .await?
            .ok_or(AppError::NotFound("site"))
    }

    pub async fn update(db: &DatabaseConnection, id: i32, patch: SitePatch) -> AppResult<SiteDto> {
        let model = Site::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("site"))?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        if let Some(district) = &patch.district {
            if !DistrictRepository::exists_by_name(db, district).await? {
                return Err(AppError::NotFound("district"));
            }
        }

        let mut active: SiteActiveModel = model.into();
        if let Some(v) = patch.site_id {
            active.site_id = Set(v);
        }
        if let Some(v) = patch.name {
            active.name = Set(v);
        }
        if let Some(v) = patch.site_type {
            active.site_type = Set(v);
        }
        if let Some(v) = patch.district {
            active.district = Set(v);
        }
        if let Some(v) = patch.physical_address {
            active.physical_address = Set(Some(v));
        }
        if let Some(v) = patch.gps_lat {
            active.gps_lat = Set(Some(v));
        }
        if let Some(v) = patch.gps_lng {
            active.gps_lng = Set(Some(v));
        }
        if let Some(v) = patch.host_department {
            active.host_department = Set(Some(v));
        }
        if let Some(v) = patch.agreement_type {
            active.agreement_type = Set(Some(v));
        }
        if let Some(v) = patch.agreement_details {
            active.agreement_details = Set(Some(v));
        }
        if let Some(v) = patch.contract_number {
            active.contract_number = Set(Some(v));
        }
        if let Some(v) = patch.contract_term {
            active.contract_term = Set(Some(v));
        }
        if let Some(v) = patch.renewal_date {
            active.renewal_date = Set(Some(v));
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
        if let Some(v) = patch.establishment_date {
            active.establishment_date = Set(Some(v));
        }
        if let Some(v) = patch.operational_status {
            active.operational_status = Set(v);
        }
        if let Some(v) = patch.assessment_status {
            active.assessment_status = Set(v);
        }
        if let Some(v) = patch.total_area {
            active.total_area = Set(Some(v));
        }
        if let Some(v) = patch.classrooms {
            active.classrooms = Set(Some(v));
        }
        if let Some(v) = patch.offices {
            active.offices = Set(Some(v));
        }
        if let Some(v) = patch.computer_labs {
            active.computer_labs = Set(Some(v));
        }
        if let Some(v) = patch.workshops {
            active.workshops = Set(Some(v));
        }
        if let Some(v) = patch.has_library {
            active.has_library = Set(Some(v));
        }
        if let Some(v) = patch.has_student_common_areas {
            active.has_student_common_areas = Set(Some(v));
        }
        if let Some(v) = patch.has_staff_facilities {
            active.has_staff_facilities = Set(Some(v));
        }
        if let Some(v) = patch.accessibility_features {
            active.accessibility_features = Set(Some(v));
        }
        if let Some(v) = patch.internet_connectivity {
            active.internet_connectivity = Set(Some(v));
        }
        if let Some(v) = patch.security_features {
            active.security_features = Set(Some(v));
        }
        if let Some(v) = patch.building_condition {
            active.building_condition = Set(Some(v));
        }
        if let Some(v) = patch.electrical_condition {
            active.electrical_condition = Set(Some(v));
        }
        if let Some(v) = patch.plumbing_condition {
            active.plumbing_condition = Set(Some(v));
        }
        if let Some(v) = patch.interior_condition {
            active.interior_condition = Set(Some(v));
        }
        if let Some(v) = patch.exterior_condition {
            active.exterior_condition = Set(Some(v));
        }
        if let Some(v) = patch.last_renovation_date {
            active.last_renovation_date = Set(Some(v));
        }
        if let Some(v) = patch.notes {
            active.notes = Set(Some(v));
        }
        if let Some(v) = patch.images {
            active.images = Set(encode_list(&v));
        }
        if let Some(v) = patch.last_visited_by {
            active.last_visited_by = Set(Some(v));
        }
        if let Some(v) = patch.last_visit_date {
            active.last_visit_date = Set(Some(v));
        }
        active.update(db).await?;

        Self::get(db, id).await?.ok_or(AppError::NotFound("site"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let res = Site::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
