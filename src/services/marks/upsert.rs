use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::MarkService;
use crate::models::activities::entities::ActivityType;
use crate::models::marks::requests::{MarkEntry, UpsertMarksRequest};
use crate::models::marks::responses::UpsertMarksResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, current_user, error_response};
use crate::utils::validate::require_text;

/// 成绩必须在 0..=100 之间，且同一批内学生不重复
pub(crate) fn validate_entries(entries: &[MarkEntry]) -> Result<(), String> {
    if entries.is_empty() {
        return Err("entries must not be empty".to_string());
    }
    let mut seen = HashSet::new();
    for entry in entries {
        if !entry.total_marks.is_finite() || !(0.0..=100.0).contains(&entry.total_marks) {
            return Err(format!(
                "Mark for student #{} must be between 0 and 100",
                entry.student_id
            ));
        }
        if !seen.insert(entry.student_id) {
            return Err(format!(
                "Student #{} appears more than once",
                entry.student_id
            ));
        }
    }
    Ok(())
}

pub async fn upsert_marks(
    service: &MarkService,
    mut req: UpsertMarksRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_entries(&req.entries) {
        return Ok(bad_request(ErrorCode::MarksInvalid, msg));
    }
    for (field, value) in [("term", &mut req.term), ("academic_year", &mut req.academic_year)] {
        match require_text(field, value) {
            Ok(v) => *value = v,
            Err(msg) => return Ok(bad_request(ErrorCode::MarksInvalid, msg)),
        }
    }

    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(req.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(bad_request(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(error_response("Failed to look up class", e, ErrorCode::ClassNotFound)),
    }
    match storage.get_subject_by_id(req.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(bad_request(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to look up subject",
                e,
                ErrorCode::SubjectNotFound,
            ));
        }
    }

    let description = format!(
        "Recorded {} {} marks for class #{} subject #{} ({} {})",
        req.entries.len(),
        req.component,
        req.class_id,
        req.subject_id,
        req.term,
        req.academic_year
    );

    match storage.upsert_marks(req, user.id).await {
        Ok(saved) => {
            log_request_activity(storage.as_ref(), request, ActivityType::Create, description)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UpsertMarksResponse { saved },
                "Marks saved successfully",
            )))
        }
        Err(e) => Ok(error_response(
            "Saving marks failed",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: i64, total_marks: f64) -> MarkEntry {
        MarkEntry {
            student_id,
            total_marks,
        }
    }

    #[test]
    fn test_validate_entries() {
        assert!(validate_entries(&[entry(1, 0.0), entry(2, 100.0)]).is_ok());
        assert!(validate_entries(&[]).is_err());
        assert!(validate_entries(&[entry(1, 100.5)]).is_err());
        assert!(validate_entries(&[entry(1, -1.0)]).is_err());
        assert!(validate_entries(&[entry(1, f64::NAN)]).is_err());
        assert!(validate_entries(&[entry(1, 50.0), entry(1, 60.0)]).is_err());
    }
}
