use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师档案状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub enum TeacherStatus {
    Active,
    Inactive,
}

crate::models::string_enum!(TeacherStatus {
    Active => "active",
    Inactive => "inactive",
});

// 教师档案：一个教师账号对应一条档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherProfile {
    pub id: i64,
    pub user_id: i64,
    pub staff_number: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub status: TeacherStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TeacherProfile {
    pub fn is_active(&self) -> bool {
        self.status == TeacherStatus::Active
    }
}
