use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    // 学分，计算 GPA 时作为权重
    pub credits: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
