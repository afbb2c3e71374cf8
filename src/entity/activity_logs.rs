//! 操作日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    pub activity_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub ip_address: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_activity(self) -> crate::models::activities::entities::ActivityLog {
        use crate::models::activities::entities::{ActivityLog, ActivityType};

        ActivityLog {
            id: self.id,
            user_id: self.user_id,
            activity_type: self
                .activity_type
                .parse::<ActivityType>()
                .unwrap_or(ActivityType::Update),
            description: self.description,
            ip_address: self.ip_address,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
