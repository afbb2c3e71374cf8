use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::error;

use super::AttendanceService;
use super::resolve::resolve_teacher_id;
use crate::errors::SchoolAdminError;
use crate::models::activities::entities::ActivityType;
use crate::models::attendance::entities::{AttendanceMark, AttendanceSheet, AttendanceStatus};
use crate::models::attendance::requests::{AttendanceEntry, MarkAttendanceRequest};
use crate::models::attendance::responses::MarkAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{current_user, not_found};
use crate::utils::validate::{parse_iso_date, require_text};

fn attendance_failed(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::AttendanceFailed, message))
}

/// 规范化提交的条目；同一学生出现多次时以最后一次为准
pub(crate) fn normalize_entries(entries: Vec<AttendanceEntry>) -> Vec<AttendanceMark> {
    let mut seen = HashSet::new();
    let mut marks: Vec<AttendanceMark> = entries
        .into_iter()
        .rev()
        .filter(|entry| seen.insert(entry.student_id))
        .map(|entry| AttendanceMark {
            student_id: entry.student_id,
            status: AttendanceStatus::normalize(&entry.status),
            remarks: entry
                .remarks
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        })
        .collect();
    marks.reverse();
    marks
}

pub async fn mark_attendance(
    service: &AttendanceService,
    req: MarkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if req.entries.is_empty() {
        return Ok(attendance_failed("entries must not be empty"));
    }
    let date = match parse_iso_date(&req.date) {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(msg) => return Ok(attendance_failed(msg)),
    };
    let academic_year = match require_text("academic_year", &req.academic_year) {
        Ok(v) => v,
        Err(msg) => return Ok(attendance_failed(msg)),
    };
    let term = match require_text("term", &req.term) {
        Ok(v) => v,
        Err(msg) => return Ok(attendance_failed(msg)),
    };

    let storage = service.get_storage(request)?;

    let class = match storage.get_class_by_id(req.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => {
            error!("Failed to look up class {}: {}", req.class_id, e);
            return Ok(attendance_failed("Failed to mark attendance"));
        }
    };

    let teacher_id = match resolve_teacher_id(storage.as_ref(), &user, &class).await {
        Ok(id) => id,
        Err(SchoolAdminError::Authorization(msg)) => {
            return Ok(HttpResponse::Forbidden()
                .json(ApiResponse::error_empty(ErrorCode::TeacherUnavailable, msg)));
        }
        Err(SchoolAdminError::NotFound(msg)) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::TeacherUnavailable, msg)));
        }
        Err(e) => {
            error!("Failed to resolve teacher for class {}: {}", class.id, e);
            return Ok(attendance_failed("Failed to mark attendance"));
        }
    };

    let sheet = AttendanceSheet {
        class_id: class.id,
        date,
        academic_year,
        term,
        teacher_id,
    };
    let marks = normalize_entries(req.entries);
    let description = format!(
        "Marked attendance for {} student(s) in {} on {}",
        marks.len(),
        class.name,
        sheet.date
    );

    match storage.upsert_attendance(sheet, marks).await {
        Ok(saved) => {
            log_request_activity(storage.as_ref(), request, ActivityType::Create, description)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MarkAttendanceResponse { saved, teacher_id },
                "Attendance marked successfully",
            )))
        }
        Err(e) => {
            // 整批已回滚
            error!("Attendance batch for class {} rolled back: {}", class.id, e);
            Ok(attendance_failed(
                "Failed to mark attendance, no records were saved",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: i64, status: &str) -> AttendanceEntry {
        AttendanceEntry {
            student_id,
            status: status.to_string(),
            remarks: None,
        }
    }

    #[test]
    fn test_normalize_entries_keeps_last_per_student() {
        let marks = normalize_entries(vec![
            entry(1, "present"),
            entry(2, "LATE"),
            entry(1, "excused"),
            entry(3, "unknown"),
        ]);
        let got: Vec<(i64, AttendanceStatus)> =
            marks.iter().map(|m| (m.student_id, m.status)).collect();
        assert_eq!(
            got,
            vec![
                (2, AttendanceStatus::Late),
                (1, AttendanceStatus::Excused),
                (3, AttendanceStatus::Absent),
            ]
        );
    }

    #[test]
    fn test_normalize_entries_drops_blank_remarks() {
        let marks = normalize_entries(vec![AttendanceEntry {
            student_id: 1,
            status: "absent".to_string(),
            remarks: Some("   ".to_string()),
        }]);
        assert_eq!(marks[0].remarks, None);
    }
}
