use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 自由标签：site_visit / photo_upload / data_verification ...
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub description: String,
    #[sea_orm(nullable)]
    pub related_entity_id: Option<i32>,
    #[sea_orm(nullable)]
    pub related_entity_type: Option<String>,
    #[sea_orm(nullable)]
    pub performed_by: Option<i32>,
    pub timestamp: i64,
    /// JSON 对象文本
    #[sea_orm(column_type = "Text", nullable)]
    pub metadata: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
