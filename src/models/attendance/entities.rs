use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

crate::models::string_enum!(AttendanceStatus {
    Present => "present",
    Absent => "absent",
    Late => "late",
    Excused => "excused",
});

impl AttendanceStatus {
    /// 宽松解析表单提交的状态，大小写与首尾空白不敏感，未知值记为缺勤
    pub fn normalize(raw: &str) -> Self {
        raw.trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(AttendanceStatus::Absent)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    // YYYY-MM-DD
    pub date: String,
    pub academic_year: String,
    pub term: String,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 考勤批次的写入键（班级、日期、学年、学期）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSheet {
    pub class_id: i64,
    pub date: String,
    pub academic_year: String,
    pub term: String,
    pub teacher_id: i64,
}

// 规范化后的单个学生考勤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_values() {
        assert_eq!(AttendanceStatus::normalize("present"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::normalize(" LATE "), AttendanceStatus::Late);
        assert_eq!(AttendanceStatus::normalize("Excused"), AttendanceStatus::Excused);
    }

    #[test]
    fn test_normalize_unknown_defaults_to_absent() {
        assert_eq!(AttendanceStatus::normalize(""), AttendanceStatus::Absent);
        assert_eq!(AttendanceStatus::normalize("sick"), AttendanceStatus::Absent);
        assert_eq!(AttendanceStatus::normalize("1"), AttendanceStatus::Absent);
    }
}
