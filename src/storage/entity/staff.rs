use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub staff_id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(nullable)]
    pub position: Option<String>,
    #[sea_orm(nullable)]
    pub email: Option<String>,
    #[sea_orm(nullable)]
    pub phone: Option<String>,
    pub verified: bool,
    /// JSON 数组文本，空列表存 NULL
    #[sea_orm(column_type = "Text", nullable)]
    pub qualifications: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub skills: Option<String>,
    /// 每周工时
    #[sea_orm(nullable)]
    pub workload: Option<i32>,
    #[sea_orm(nullable)]
    pub site_id: Option<i32>,
    #[sea_orm(nullable)]
    pub department: Option<String>,
    #[sea_orm(nullable)]
    pub start_date: Option<String>,
    #[sea_orm(nullable)]
    pub contract_end_date: Option<String>,
    #[sea_orm(nullable)]
    pub employment_status: Option<String>,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
