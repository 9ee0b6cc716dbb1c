use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 业务编号，如 CLC-001
    #[sea_orm(unique)]
    pub site_id: String,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub site_type: String,
    /// 按名称引用 district（非外键 id）
    pub district: String,
    #[sea_orm(nullable)]
    pub physical_address: Option<String>,
    #[sea_orm(nullable)]
    pub gps_lat: Option<f64>,
    #[sea_orm(nullable)]
    pub gps_lng: Option<f64>,
    #[sea_orm(nullable)]
    pub host_department: Option<String>,
    #[sea_orm(nullable)]
    pub agreement_type: Option<String>,
    #[sea_orm(nullable)]
    pub agreement_details: Option<String>,
    #[sea_orm(nullable)]
    pub contract_number: Option<String>,
    #[sea_orm(nullable)]
    pub contract_term: Option<String>,
    #[sea_orm(nullable)]
    pub renewal_date: Option<String>,
    #[sea_orm(nullable)]
    pub contact_person: Option<String>,
    #[sea_orm(nullable)]
    pub contact_email: Option<String>,
    #[sea_orm(nullable)]
    pub contact_phone: Option<String>,
    #[sea_orm(nullable)]
    pub establishment_date: Option<String>,
    pub operational_status: String,
    pub assessment_status: String,

    // 基础设施
    #[sea_orm(nullable)]
    pub total_area: Option<i32>,
    #[sea_orm(nullable)]
    pub classrooms: Option<i32>,
    #[sea_orm(nullable)]
    pub offices: Option<i32>,
    #[sea_orm(nullable)]
    pub computer_labs: Option<i32>,
    #[sea_orm(nullable)]
    pub workshops: Option<i32>,
    #[sea_orm(nullable)]
    pub has_library: Option<bool>,
    #[sea_orm(nullable)]
    pub has_student_common_areas: Option<bool>,
    #[sea_orm(nullable)]
    pub has_staff_facilities: Option<bool>,
    #[sea_orm(nullable)]
    pub accessibility_features: Option<String>,
    #[sea_orm(nullable)]
    pub internet_connectivity: Option<String>,
    #[sea_orm(nullable)]
    pub security_features: Option<String>,

    // 状况评估
    #[sea_orm(nullable)]
    pub building_condition: Option<String>,
    #[sea_orm(nullable)]
    pub electrical_condition: Option<String>,
    #[sea_orm(nullable)]
    pub plumbing_condition: Option<String>,
    #[sea_orm(nullable)]
    pub interior_condition: Option<String>,
    #[sea_orm(nullable)]
    pub exterior_condition: Option<String>,
    #[sea_orm(nullable)]
    pub last_renovation_date: Option<String>,

    #[sea_orm(nullable)]
    pub notes: Option<String>,
    /// JSON 数组文本，空列表存 NULL
    #[sea_orm(column_type = "Text", nullable)]
    pub images: Option<String>,
    #[sea_orm(nullable)]
    pub created_by: Option<i32>,
    #[sea_orm(nullable)]
    pub last_visited_by: Option<i32>,
    #[sea_orm(nullable)]
    pub last_visit_date: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
