use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, ensure_teacher_exists};
use crate::models::activities::entities::ActivityType;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, error_response};
use crate::utils::validate::require_text;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    class_data.name = match require_text("name", &class_data.name) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };
    class_data.academic_year = match require_text("academic_year", &class_data.academic_year) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };

    let storage = service.get_storage(request)?;

    if let Some(teacher_id) = class_data.teacher_id
        && let Err(resp) = ensure_teacher_exists(storage.as_ref(), teacher_id).await
    {
        return Ok(resp);
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} ({}) created", class.name, class.academic_year);
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Create,
                format!("Created class {} ({})", class.name, class.academic_year),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(error_response("Class creation failed", e, ErrorCode::ClassNotFound)),
    }
}
