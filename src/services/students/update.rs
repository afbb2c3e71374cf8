use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, check_class, check_date_of_birth};
use crate::models::activities::entities::ActivityType;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::require_text;

pub async fn update_student(
    service: &StudentService,
    id: i64,
    mut req: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (field, value) in [
        ("first_name", req.first_name.as_mut()),
        ("last_name", req.last_name.as_mut()),
    ] {
        if let Some(value) = value {
            match require_text(field, value) {
                Ok(v) => *value = v,
                Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
            }
        }
    }
    if let Err(resp) = check_date_of_birth(req.date_of_birth.as_deref()) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    if let Some(class_id) = req.class_id
        && let Err(resp) = check_class(storage.as_ref(), class_id).await
    {
        return Ok(resp);
    }

    match storage.update_student(id, req).await {
        Ok(Some(student)) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Update,
                format!("Updated student {}", student.admission_number),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response(
            "Student update failed",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}
