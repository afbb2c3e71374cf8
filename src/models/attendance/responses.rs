use super::entities::AttendanceRecord;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub saved: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
}

// 学生考勤汇总
#[derive(Debug, Clone, Default, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceSummary {
    pub student_id: i64,
    pub student_name: String,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    pub total_days: i64,
    // (present + late) / total_days * 100，保留两位小数
    pub attendance_rate: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryResponse {
    pub class_id: i64,
    pub academic_year: String,
    pub term: String,
    pub students: Vec<StudentAttendanceSummary>,
}
