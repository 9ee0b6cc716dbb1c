use crate::domain::{EntityKind, EntityRef};
use crate::error::{AppError, AppResult};
use crate::storage::entity::activity::{
    self, ActiveModel as ActivityActiveModel, Entity as Activity, Model as ActivityModel,
};
use chrono::Utc;
use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub related_entity_id: Option<i32>,
    pub related_entity_type: Option<EntityKind>,
    pub performed_by: Option<i32>,
    pub timestamp: i64,
    pub metadata: Option<Value>,
}

impl From<ActivityModel> for ActivityDto {
    fn from(model: ActivityModel) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            description: model.description,
            related_entity_id: model.related_entity_id,
            // 库里是自由文本，集合之外的值按缺失处理
            related_entity_type: model.related_entity_type.as_deref().and_then(EntityKind::parse),
            performed_by: model.performed_by,
            timestamp: model.timestamp,
            metadata: model
                .metadata
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub related_entity_id: Option<i32>,
    #[serde(default)]
    pub related_entity_type: Option<EntityKind>,
    #[serde(default)]
    pub performed_by: Option<i32>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl NewActivity {
    /// 便于各 handler 在写操作之后顺手记一笔
    pub fn audit(
        kind: &str,
        description: String,
        related: Option<EntityRef>,
        performed_by: Option<i32>,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            description,
            related_entity_id: related.as_ref().map(|r| r.id),
            related_entity_type: related.map(|r| r.kind),
            performed_by,
            metadata: None,
        }
    }
}

pub struct ActivityRepository;

impl ActivityRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<ActivityDto>> {
        let models = Activity::find()
            .order_by_desc(activity::Column::Timestamp)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ActivityDto::from).collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<ActivityDto>> {
        Ok(Activity::find_by_id(id).one(db).await?.map(ActivityDto::from))
    }

    pub async fn list_for_site(
        db: &DatabaseConnection,
        site_id: i32,
    ) -> AppResult<Vec<ActivityDto>> {
        let models = Activity::find()
            .filter(activity::Column::RelatedEntityType.eq(EntityKind::Site.as_str()))
            .filter(activity::Column::RelatedEntityId.eq(site_id))
            .order_by_desc(activity::Column::Timestamp)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ActivityDto::from).collect())
    }

    /// 用户执行的，或与该用户相关的
    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> AppResult<Vec<ActivityDto>> {
        let models = Activity::find()
            .filter(
                Condition::any()
                    .add(activity::Column::PerformedBy.eq(user_id))
                    .add(
                        Condition::all()
                            .add(
                                activity::Column::RelatedEntityType.eq(EntityKind::User.as_str()),
                            )
                            .add(activity::Column::RelatedEntityId.eq(user_id)),
                    ),
            )
            .order_by_desc(activity::Column::Timestamp)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ActivityDto::from).collect())
    }

    pub async fn create(db: &DatabaseConnection, new: NewActivity) -> AppResult<ActivityDto> {
        let metadata = match &new.metadata {
            Some(v) if !v.is_null() => serde_json::to_string(v).ok(),
            _ => None,
        };
        let model = ActivityActiveModel {
            kind: Set(new.kind),
            description: Set(new.description),
            related_entity_id: Set(new.related_entity_id),
            related_entity_type: Set(new.related_entity_type.map(|k| k.as_str().to_string())),
            performed_by: Set(new.performed_by),
            timestamp: Set(Utc::now().timestamp()),
            metadata: Set(metadata),
            ..Default::default()
        };
        let res = Activity::insert(model).exec(db).await?;
        Self::get(db, res.last_insert_id)
            .await?
            .ok_or(AppError::NotFound("activity"))
    }

    /// 浅合并：传入对象的键覆盖已有键，其余保留
    pub async fn merge_metadata(
        db: &DatabaseConnection,
        id: i32,
        incoming: Map<String, Value>,
    ) -> AppResult<ActivityDto> {
        let model = Activity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("activity"))?;

        if incoming.is_empty() {
            return Ok(model.into());
        }

        let mut merged: Map<String, Value> = model
            .metadata
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default();
        for (key, value) in incoming {
            merged.insert(key, value);
        }

        let mut active: ActivityActiveModel = model.into();
        active.metadata = Set(serde_json::to_string(&Value::Object(merged)).ok());
        active.update(db).await?;

        Self::get(db, id).await?.ok_or(AppError::NotFound("activity"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let res = Activity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    /// 审计写入失败不应影响主操作，只记日志
    pub async fn record_best_effort(db: &DatabaseConnection, new: NewActivity) {
        if let Err(e) = Self::create(db, new).await {
            log::warn!("failed to record activity: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_helper_carries_entity_ref() {
        let new = NewActivity::audit(
            "site_update",
            "Updated site Central Hub".to_string(),
            Some(EntityRef::site(7)),
            Some(3),
        );
        assert_eq!(new.kind, "site_update");
        assert_eq!(new.related_entity_id, Some(7));
        assert_eq!(new.related_entity_type, Some(EntityKind::Site));
        assert_eq!(new.performed_by, Some(3));
    }
}
