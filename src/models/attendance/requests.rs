use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEntry {
    pub student_id: i64,
    // 原始状态文本，服务端规范化
    pub status: String,
    pub remarks: Option<String>,
}

// 提交一个班级某日的考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub class_id: i64,
    pub date: String,
    pub academic_year: String,
    pub term: String,
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListQuery {
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
    pub date: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub academic_year: Option<String>,
    pub term: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryQuery {
    pub class_id: i64,
    pub academic_year: String,
    pub term: String,
}
