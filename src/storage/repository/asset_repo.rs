use crate::error::{AppError, AppResult};
use crate::storage::entity::asset::{
    self, ActiveModel as AssetActiveModel, Entity as Asset, Model as AssetModel,
};
use crate::storage::repository::site_repo::SiteRepository;
use crate::storage::repository::{decode_list, encode_list, encode_list_always};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    pub id: i32,
    pub asset_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    pub category: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_numbers: Vec<String>,
    pub purchase_date: Option<String>,
    pub purchase_price: Option<f64>,
    pub location: Option<String>,
    pub assigned_to: Option<String>,
    pub last_maintenance_date: Option<String>,
    pub next_maintenance_date: Option<String>,
    pub description: Option<String>,
    pub condition: String,
    pub acquisition_date: Option<String>,
    pub last_service_date: Option<String>,
    pub notes: Option<String>,
    pub images: Vec<String>,
    pub site_id: Option<i32>,
}

impl From<AssetModel> for AssetDto {
    fn from(model: AssetModel) -> Self {
        Self {
            id: model.id,
            asset_id: model.asset_id,
            name: model.name,
            asset_type: model.asset_type,
            category: model.category,
            manufacturer: model.manufacturer,
            model: model.model,
            serial_numbers: decode_list(Some(&model.serial_numbers)),
            purchase_date: model.purchase_date,
            purchase_price: model.purchase_price,
            location: model.location,
            assigned_to: model.assigned_to,
            last_maintenance_date: model.last_maintenance_date,
            next_maintenance_date: model.next_maintenance_date,
            description: model.description,
            condition: model.condition,
            acquisition_date: model.acquisition_date,
            last_service_date: model.last_service_date,
            notes: model.notes,
            images: decode_list(model.images.as_deref()),
            site_id: model.site_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_numbers: Vec<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub last_maintenance_date: Option<String>,
    #[serde(default)]
    pub next_maintenance_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    #[serde(default)]
    pub last_service_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub site_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub last_maintenance_date: Option<String>,
    #[serde(default)]
    pub next_maintenance_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    #[serde(default)]
    pub last_service_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub site_id: Option<i32>,
}

impl AssetPatch {
    fn is_empty(&self) -> bool {
        self.asset_id.is_none()
            && self.name.is_none()
            && self.asset_type.is_none()
            && self.category.is_none()
            && self.manufacturer.is_none()
            && self.model.is_none()
            && self.serial_numbers.is_none()
            && self.purchase_date.is_none()
            && self.purchase_price.is_none()
            && self.location.is_none()
            && self.assigned_to.is_none()
            && self.last_maintenance_date.is_none()
            && self.next_maintenance_date.is_none()
            && self.description.is_none()
            && self.condition.is_none()
            && self.acquisition_date.is_none()
            && self.last_service_date.is_none()
            && self.notes.is_none()
            && self.images.is_none()
            && self.site_id.is_none()
    }
}

pub struct AssetRepository;

impl AssetRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<AssetDto>> {
        let models = Asset::find()
            .order_by_asc(asset::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(AssetDto::from).collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<AssetDto>> {
        Ok(Asset::find_by_id(id).one(db).await?.map(AssetDto::from))
    }

    pub async fn list_for_site(db: &DatabaseConnection, site_id: i32) -> AppResult<Vec<AssetDto>> {
        let models = Asset::find()
            .filter(asset::Column::SiteId.eq(site_id))
            .order_by_asc(asset::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(AssetDto::from).collect())
    }

    pub async fn create(db: &DatabaseConnection, new: NewAsset) -> AppResult<AssetDto> {
        if let Some(site_id) = new.site_id {
            if !SiteRepository::exists(db, site_id).await? {
                return Err(AppError::NotFound("site"));
            }
        }

        let model = AssetActiveModel {
            asset_id: Set(new.asset_id),
            name: Set(new.name),
            asset_type: Set(new.asset_type),
            category: Set(new.category),
            manufacturer: Set(new.manufacturer),
            model: Set(new.model),
            serial_numbers: Set(encode_list_always(&new.serial_numbers)),
            purchase_date: Set(new.purchase_date),
            purchase_price: Set(new.purchase_price),
            location: Set(new.location),
            assigned_to: Set(new.assigned_to),
            last_maintenance_date: Set(new.last_maintenance_date),
            next_maintenance_date: Set(new.next_maintenance_date),
            description: Set(new.description),
            condition: Set(new.condition),
            acquisition_date: Set(new.acquisition_date),
            last_service_date: Set(new.last_service_date),
            notes: Set(new.notes),
            images: Set(new.images.as_deref().and_then(encode_list)),
            site_id: Set(new.site_id),
            ..Default::default()
        };
        let res = Asset::insert(model).exec(db).await?;
        Self::get(db, res.last_insert_id)
            .await?
            .ok_or(AppError::NotFound("asset"))
    }

    pub async fn update(db: &DatabaseConnection, id: i32, patch: AssetPatch) -> AppResult<AssetDto> {
        let model = Asset::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("asset"))?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        if let Some(site_id) = patch.site_id {
            if !SiteRepository::exists(db, site_id).await? {
                return Err(AppError::NotFound("site"));
            }
        }

        let mut active: AssetActiveModel = model.into();
        if let Some(v) = patch.asset_id {
            active.asset_id = Set(v);
        }
        if let Some(v) = patch.name {
            active.name = Set(v);
        }
        if let Some(v) = patch.asset_type {
            active.asset_type = Set(Some(v));
        }
        if let Some(v) = patch.category {
            active.category = Set(v);
        }
        if let Some(v) = patch.manufacturer {
            active.manufacturer = Set(Some(v));
        }
        if let Some(v) = patch.model {
            active.model = Set(Some(v));
        }
        if let Some(v) = patch.serial_numbers {
            active.serial_numbers = Set(encode_list_always(&v));
        }
        if let Some(v) = patch.purchase_date {
            active.purchase_date = Set(Some(v));
        }
        if let Some(v) = patch.purchase_price {
            active.purchase_price = Set(Some(v));
        }
        if let Some(v) = patch.location {
            active.location = Set(Some(v));
        }
        if let Some(v) = patch.assigned_to {
            active.assigned_to = Set(Some(v));
        }
        if let Some(v) = patch.last_maintenance_date {
            active.last_maintenance_date = Set(Some(v));
        }
        if let Some(v) = patch.next_maintenance_date {
            active.next_maintenance_date = Set(Some(v));
        }
        if let Some(v) = patch.description {
            active.description = Set(Some(v));
        }
        if let Some(v) = patch.condition {
            active.condition = Set(v);
        }
        if let Some(v) = patch.acquisition_date {
            active.acquisition_date = Set(Some(v));
        }
        if let Some(v) = patch.last_service_date {
            active.last_service_date = Set(Some(v));
        }
        if let Some(v) = patch.notes {
            active.notes = Set(Some(v));
        }
        if let Some(v) = patch.images {
            active.images = Set(encode_list(&v));
        }
        if let Some(v) = patch.site_id {
            active.site_id = Set(Some(v));
        }
        active.update(db).await?;

        Self::get(db, id).await?.ok_or(AppError::NotFound("asset"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let res = Asset::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
