use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩组成部分
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub enum MarkComponent {
    Midterm,    // 期中
    ClassScore, // 平时
    Exam,       // 期末考试
}

crate::models::string_enum!(MarkComponent {
    Midterm => "midterm",
    ClassScore => "class_score",
    Exam => "exam",
});

// 单条原始成绩，total_marks 为百分制
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkRecord {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub term: String,
    pub academic_year: String,
    pub component: MarkComponent,
    pub total_marks: f64,
    pub recorded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
