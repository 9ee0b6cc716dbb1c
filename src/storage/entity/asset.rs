use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub asset_id: String,
    pub name: String,
    #[sea_orm(column_name = "type", nullable)]
    pub asset_type: Option<String>,
    pub category: String,
    #[sea_orm(nullable)]
    pub manufacturer: Option<String>,
    #[sea_orm(nullable)]
    pub model: Option<String>,
    /// JSON 数组文本，空列表存 "[]" 而不是 NULL
    #[sea_orm(column_type = "Text")]
    pub serial_numbers: String,
    #[sea_orm(nullable)]
    pub purchase_date: Option<String>,
    #[sea_orm(nullable)]
    pub purchase_price: Option<f64>,
    #[sea_orm(nullable)]
    pub location: Option<String>,
    #[sea_orm(nullable)]
    pub assigned_to: Option<String>,
    #[sea_orm(nullable)]
    pub last_maintenance_date: Option<String>,
    #[sea_orm(nullable)]
    pub next_maintenance_date: Option<String>,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    pub condition: String,
    #[sea_orm(nullable)]
    pub acquisition_date: Option<String>,
    #[sea_orm(nullable)]
    pub last_service_date: Option<String>,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub images: Option<String>,
    #[sea_orm(nullable)]
    pub site_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
