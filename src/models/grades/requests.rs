use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateWeightsRequest {
    pub mid_weight: f64,
    pub class_weight: f64,
    pub exam_weight: f64,
}

// 成绩单 / 班级总表的学期参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TermQuery {
    pub term: String,
    pub academic_year: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ClassReportQuery {
    pub class_id: i64,
    pub term: String,
    pub academic_year: String,
}
