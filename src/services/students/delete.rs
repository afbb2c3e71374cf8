use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::activities::entities::ActivityType;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{error_response, not_found};

pub async fn delete_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_student(id).await {
        Ok(true) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Delete,
                format!("Deleted student #{id}"),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response(
            "Student deletion failed",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}
