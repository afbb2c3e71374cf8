use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::activities::entities::ActivityType;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{error_response, not_found};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_class(class_id).await {
        Ok(true) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Delete,
                format!("Deleted class #{class_id}"),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response("Class deletion failed", e, ErrorCode::ClassNotFound)),
    }
}
