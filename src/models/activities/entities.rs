use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 操作类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub enum ActivityType {
    Login,
    Logout,
    Create,
    Update,
    Delete,
}

crate::models::string_enum!(ActivityType {
    Login => "login",
    Logout => "logout",
    Create => "create",
    Update => "update",
    Delete => "delete",
});

// 审计日志，只追加
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub activity_type: ActivityType,
    pub description: String,
    pub ip_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
