use serde::{Deserialize, Serialize};

pub const USER_ROLES: &[&str] = &[
    "Admin",
    "Project Manager",
    "Data Analyst",
    "Field Assessor",
    "Viewer",
];

pub const USER_STATUSES: &[&str] = &["active", "inactive", "suspended"];

pub const ASSET_CONDITIONS: &[&str] = &["Good", "Fair", "Poor", "Critical"];

pub const PROGRAM_STATUSES: &[&str] = &["Active", "Inactive", "Planned"];

/// 活动记录可关联的实体种类（多态引用的封闭集合）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    District,
    User,
    Site,
    Staff,
    Asset,
    Program,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::District => "district",
            EntityKind::User => "user",
            EntityKind::Site => "site",
            EntityKind::Staff => "staff",
            EntityKind::Asset => "asset",
            EntityKind::Program => "program",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "district" => Some(EntityKind::District),
            "user" => Some(EntityKind::User),
            "site" => Some(EntityKind::Site),
            "staff" => Some(EntityKind::Staff),
            "asset" => Some(EntityKind::Asset),
            "program" => Some(EntityKind::Program),
            _ => None,
        }
    }
}

/// 类型化的 (kind, id) 对，替代裸的 related_entity_type/related_entity_id 字段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i32,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i32) -> Self {
        Self { kind, id }
    }

    pub fn site(id: i32) -> Self {
        Self::new(EntityKind::Site, id)
    }

    pub fn user(id: i32) -> Self {
        Self::new(EntityKind::User, id)
    }

    pub fn staff(id: i32) -> Self {
        Self::new(EntityKind::Staff, id)
    }

    pub fn asset(id: i32) -> Self {
        Self::new(EntityKind::Asset, id)
    }

    pub fn program(id: i32) -> Self {
        Self::new(EntityKind::Program, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            EntityKind::District,
            EntityKind::User,
            EntityKind::Site,
            EntityKind::Staff,
            EntityKind::Asset,
            EntityKind::Program,
        ] {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::parse("vehicle"), None);
    }
}
