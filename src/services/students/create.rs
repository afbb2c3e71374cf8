use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, check_class, check_date_of_birth};
use crate::models::activities::entities::ActivityType;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, error_response};
use crate::utils::validate::{require_text, validate_admission_number};

pub async fn create_student(
    service: &StudentService,
    mut req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.admission_number = req.admission_number.trim().to_string();
    if let Err(msg) = validate_admission_number(&req.admission_number) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    for (field, value) in [
        ("first_name", &mut req.first_name),
        ("last_name", &mut req.last_name),
    ] {
        match require_text(field, value) {
            Ok(v) => *value = v,
            Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
        }
    }
    if let Err(resp) = check_date_of_birth(req.date_of_birth.as_deref()) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = check_class(storage.as_ref(), req.class_id).await {
        return Ok(resp);
    }

    match storage.create_student(req).await {
        Ok(student) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Create,
                format!(
                    "Registered student {} ({})",
                    student.full_name(),
                    student.admission_number
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(error_response(
            "Student creation failed",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}
