use super::entities::MarkComponent;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkEntry {
    pub student_id: i64,
    pub total_marks: f64,
}

// 批量录入某班某科某一组成部分的成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct UpsertMarksRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub term: String,
    pub academic_year: String,
    pub component: MarkComponent,
    pub entries: Vec<MarkEntry>,
}

// 成绩查询参数（HTTP 与存储层共用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkListQuery {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub component: Option<MarkComponent>,
}
