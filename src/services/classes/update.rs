use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, ensure_teacher_exists};
use crate::models::activities::entities::ActivityType;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{error_response, not_found};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 显式传 null 表示取消班主任
    if let Some(Some(teacher_id)) = update_data.teacher_id
        && let Err(resp) = ensure_teacher_exists(storage.as_ref(), teacher_id).await
    {
        return Ok(resp);
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Update,
                format!("Updated class {} ({})", class.name, class.academic_year),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response("Class update failed", e, ErrorCode::ClassNotFound)),
    }
}
