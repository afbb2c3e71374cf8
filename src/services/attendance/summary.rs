use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::AttendanceService;
use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::attendance::requests::{AttendanceListQuery, AttendanceSummaryQuery};
use crate::models::attendance::responses::{
    AttendanceListResponse, AttendanceSummaryResponse, StudentAttendanceSummary,
};
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::parse_iso_date;

/// 按学生汇总考勤，出勤率 = (出勤 + 迟到) / 总天数
pub fn summarize_attendance(
    students: &[Student],
    records: &[AttendanceRecord],
) -> Vec<StudentAttendanceSummary> {
    let mut by_student: HashMap<i64, StudentAttendanceSummary> = students
        .iter()
        .map(|s| {
            (
                s.id,
                StudentAttendanceSummary {
                    student_id: s.id,
                    student_name: s.full_name(),
                    ..Default::default()
                },
            )
        })
        .collect();

    for record in records {
        let Some(summary) = by_student.get_mut(&record.student_id) else {
            continue;
        };
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Late => summary.late += 1,
            AttendanceStatus::Excused => summary.excused += 1,
        }
        summary.total_days += 1;
    }

    students
        .iter()
        .filter_map(|s| by_student.remove(&s.id))
        .map(|mut summary| {
            if summary.total_days > 0 {
                let rate = (summary.present + summary.late) as f64 / summary.total_days as f64;
                summary.attendance_rate = (rate * 10000.0).round() / 100.0;
            }
            summary
        })
        .collect()
}

pub async fn list_attendance(
    service: &AttendanceService,
    query: AttendanceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for date in [&query.date, &query.date_from, &query.date_to]
        .into_iter()
        .flatten()
    {
        if let Err(msg) = parse_iso_date(date) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
    }

    let storage = service.get_storage(request)?;
    match storage.list_attendance(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceListResponse { items },
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to retrieve attendance",
            e,
            ErrorCode::AttendanceFailed,
        )),
    }
}

pub async fn attendance_summary(
    service: &AttendanceService,
    query: AttendanceSummaryQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(query.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(error_response("Failed to look up class", e, ErrorCode::ClassNotFound)),
    }

    let students = match storage.list_students_by_class(query.class_id).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(error_response(
                "Failed to load class students",
                e,
                ErrorCode::ClassNotFound,
            ));
        }
    };
    let records = match storage
        .list_attendance(AttendanceListQuery {
            class_id: Some(query.class_id),
            academic_year: Some(query.academic_year.clone()),
            term: Some(query.term.clone()),
            ..Default::default()
        })
        .await
    {
        Ok(records) => records,
        Err(e) => {
            return Ok(error_response(
                "Failed to retrieve attendance",
                e,
                ErrorCode::AttendanceFailed,
            ));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceSummaryResponse {
            class_id: query.class_id,
            academic_year: query.academic_year,
            term: query.term,
            students: summarize_attendance(&students, &records),
        },
        "Attendance summary generated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::StudentStatus;

    fn student(id: i64, first_name: &str) -> Student {
        let now = chrono::Utc::now();
        Student {
            id,
            admission_number: format!("ADM{id:03}"),
            first_name: first_name.to_string(),
            last_name: "Mensah".to_string(),
            gender: None,
            date_of_birth: None,
            class_id: Some(1),
            guardian_name: None,
            guardian_phone: None,
            status: StudentStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn record(student_id: i64, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        let now = chrono::Utc::now();
        AttendanceRecord {
            id: 0,
            student_id,
            class_id: 1,
            teacher_id: 1,
            date: date.to_string(),
            academic_year: "2025/2026".to_string(),
            term: "Term 1".to_string(),
            status,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_summarize_attendance() {
        let students = vec![student(1, "Ama"), student(2, "Kofi")];
        let records = vec![
            record(1, "2025-09-01", AttendanceStatus::Present),
            record(1, "2025-09-02", AttendanceStatus::Late),
            record(1, "2025-09-03", AttendanceStatus::Absent),
            record(9, "2025-09-01", AttendanceStatus::Present),
        ];
        let summary = summarize_attendance(&students, &records);
        assert_eq!(summary.len(), 2);

        let ama = &summary[0];
        assert_eq!(ama.student_name, "Ama Mensah");
        assert_eq!((ama.present, ama.late, ama.absent, ama.total_days), (1, 1, 1, 3));
        assert_eq!(ama.attendance_rate, 66.67);

        let kofi = &summary[1];
        assert_eq!(kofi.total_days, 0);
        assert_eq!(kofi.attendance_rate, 0.0);
    }
}
